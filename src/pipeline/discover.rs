//! Input file discovery.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Default name pattern for generated log files.
pub const DEFAULT_PATTERN: &str = "logs-*.log";

/// Compile a glob-style file name pattern (`*` and `?` wildcards) into a
/// whole-name regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let mut translated = String::with_capacity(pattern.len() * 2);
    for ch in pattern.chars() {
        match ch {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            _ => translated.push_str(&regex::escape(&ch.to_string())),
        }
    }
    Regex::new(&format!("^{translated}$"))
        .with_context(|| format!("invalid file pattern: {pattern}"))
}

/// List the files in `dir` (non-recursive) whose names match `pattern`,
/// sorted by name. No matches is a valid, empty outcome.
pub fn discover_logs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = compile_pattern(pattern)?;

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if matcher.is_match(name) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pattern_matches_whole_name() {
        let matcher = compile_pattern("logs-*.log").unwrap();
        assert!(matcher.is_match("logs-2024-01-01.log"));
        assert!(!matcher.is_match("logs-2024-01-01.log.bak"));
        assert!(!matcher.is_match("other-2024-01-01.log"));
    }

    #[test]
    fn pattern_escapes_regex_metacharacters() {
        let matcher = compile_pattern("logs-*.log").unwrap();
        // The dot must be literal, not "any character".
        assert!(!matcher.is_match("logs-xxlog"));
    }

    #[test]
    fn discovers_matching_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logs-2024-01-02.log"), "").unwrap();
        fs::write(dir.path().join("logs-2024-01-01.log"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("logs-2024-01-03.log")).unwrap();

        let files = discover_logs(dir.path(), DEFAULT_PATTERN).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        // Sorted, non-files ignored.
        assert_eq!(names, vec!["logs-2024-01-01.log", "logs-2024-01-02.log"]);
    }

    #[test]
    fn empty_directory_is_a_valid_empty_outcome() {
        let dir = TempDir::new().unwrap();
        let files = discover_logs(dir.path(), DEFAULT_PATTERN).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_logs(&missing, DEFAULT_PATTERN).is_err());
    }
}

//! Configuration management.
//!
//! Loads optional YAML configuration from `.logtally.yml` (or an explicit
//! `--config` path) and fills everything else with defaults. Command-line
//! flags override loaded values field by field in the commands that use
//! them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::generator::GeneratorConfig;
use crate::parallel::PoolConfig;
use crate::pipeline::discover::DEFAULT_PATTERN;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".logtally.yml";

/// Main configuration structure for logtally.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogtallyConfig {
    /// Analysis settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Worker pool settings
    #[serde(default)]
    pub pool: PoolConfig,

    /// Synthetic log generation settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Analysis-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob-style name pattern for input files.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// WARN/ERROR lines shown per file in reports.
    #[serde(default = "default_sample_lines")]
    pub sample_lines: usize,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_sample_lines() -> usize {
    5
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            pattern: default_pattern(),
            sample_lines: default_sample_lines(),
        }
    }
}

impl LogtallyConfig {
    /// Load configuration from `path` if given, from `.logtally.yml` in
    /// the working directory if present, and from defaults otherwise. An
    /// explicit path that cannot be read is an error; a missing implicit
    /// file is not.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let candidate = match path {
            Some(explicit) => Some(PathBuf::from(explicit)),
            None => {
                let implicit = PathBuf::from(CONFIG_FILE);
                implicit.exists().then_some(implicit)
            }
        };

        match candidate {
            Some(file) => {
                let raw = std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read config file {}", file.display()))?;
                serde_yml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", file.display()))
            }
            None => Ok(LogtallyConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_sensible() {
        let config = LogtallyConfig::default();
        assert_eq!(config.analyzer.pattern, "logs-*.log");
        assert_eq!(config.analyzer.sample_lines, 5);
        assert_eq!(config.pool.max_threads, 0);
        assert_eq!(config.pool.thread_percentage, 100);
        assert_eq!(config.generator.files, 5);
        assert_eq!(config.generator.min_lines, 10);
        assert_eq!(config.generator.max_lines, 50);
    }

    #[test]
    fn loads_partial_yaml_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logtally.yml");
        fs::write(
            &path,
            "analyzer:\n  pattern: \"app-*.log\"\npool:\n  max_threads: 2\n",
        )
        .unwrap();

        let config = LogtallyConfig::load(path.to_str()).unwrap();
        assert_eq!(config.analyzer.pattern, "app-*.log");
        // Unspecified fields keep their defaults.
        assert_eq!(config.analyzer.sample_lines, 5);
        assert_eq!(config.pool.max_threads, 2);
        assert_eq!(config.pool.thread_percentage, 100);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        assert!(LogtallyConfig::load(Some("/definitely/not/here.yml")).is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "analyzer: [not, a, mapping").unwrap();

        assert!(LogtallyConfig::load(path.to_str()).is_err());
    }
}

//! Synthetic log file producer.
//!
//! Writes the dated `logs-*.log` files the analyzer consumes: one file
//! per day starting at a given date, each with a random number of
//! timestamped lines. WARN and ERROR lines sometimes carry one of the
//! known exception keywords so the analyzer has something to find. The
//! analysis pipeline never depends on this module; it only ever sees the
//! resulting paths.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analyzer::{ERROR_KEYWORDS, LogLevel};

/// Generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory the files are written into (created if missing).
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Number of daily files to produce.
    #[serde(default = "default_files")]
    pub files: usize,
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_files() -> usize {
    5
}

fn default_min_lines() -> usize {
    10
}

fn default_max_lines() -> usize {
    50
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            dir: default_dir(),
            files: default_files(),
            min_lines: default_min_lines(),
            max_lines: default_max_lines(),
        }
    }
}

/// Start date that makes the newest generated file today's.
pub fn default_start_date(files: usize) -> NaiveDate {
    let span = files.saturating_sub(1) as i64;
    Local::now().date_naive() - Duration::days(span)
}

const MESSAGES: &[&str] = &[
    "request handled",
    "cache refreshed",
    "user session opened",
    "user session closed",
    "heartbeat ok",
    "connection pool resized",
    "configuration reloaded",
    "scheduled job finished",
    "retrying upstream call",
    "slow response",
    "queue depth rising",
    "disk usage above threshold",
    "request rejected",
    "upstream call failed",
];

/// Write the configured batch of files, returning the paths in date
/// order.
pub fn generate_logs(config: &GeneratorConfig, start_date: NaiveDate) -> Result<Vec<PathBuf>> {
    if config.min_lines > config.max_lines {
        anyhow::bail!(
            "min_lines ({}) exceeds max_lines ({})",
            config.min_lines,
            config.max_lines
        );
    }

    fs::create_dir_all(&config.dir)
        .with_context(|| format!("failed to create directory {}", config.dir.display()))?;

    let mut rng = rand::rng();
    let mut written = Vec::with_capacity(config.files);

    for day in 0..config.files {
        let date = start_date + Duration::days(day as i64);
        let path = config.dir.join(format!("logs-{}.log", date.format("%Y-%m-%d")));
        let lines = rng.random_range(config.min_lines..=config.max_lines);
        write_file(&path, date, lines, &mut rng)?;
        debug!(file = %path.display(), lines, "wrote log file");
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, date: NaiveDate, lines: usize, rng: &mut impl Rng) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    // Lines advance a few seconds at a time through the day.
    let mut timestamp = date.and_time(chrono::NaiveTime::MIN) + Duration::hours(8);

    for _ in 0..lines {
        timestamp += Duration::seconds(rng.random_range(1..=30));
        let level = pick_level(rng);
        let message = MESSAGES[rng.random_range(0..MESSAGES.len())];

        let line = if level.is_severe() && rng.random_bool(0.6) {
            let keyword = ERROR_KEYWORDS[rng.random_range(0..ERROR_KEYWORDS.len())];
            format!(
                "{} {} {}: {} at worker-{}",
                timestamp.format("%Y-%m-%d %H:%M:%S"),
                level,
                message,
                keyword,
                rng.random_range(1..=8)
            )
        } else {
            format!("{} {} {}", timestamp.format("%Y-%m-%d %H:%M:%S"), level, message)
        };

        writeln!(writer, "{line}")
            .with_context(|| format!("failed to write to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}

fn pick_level(rng: &mut impl Rng) -> LogLevel {
    match rng.random_range(0..100) {
        0..10 => LogLevel::Trace,
        10..35 => LogLevel::Debug,
        35..75 => LogLevel::Info,
        75..90 => LogLevel::Warn,
        _ => LogLevel::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::classify;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            dir: dir.path().to_path_buf(),
            files: 3,
            min_lines: 5,
            max_lines: 12,
        }
    }

    #[test]
    fn writes_one_dated_file_per_day() {
        let dir = TempDir::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let written = generate_logs(&config(&dir), start).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "logs-2024-01-01.log",
                "logs-2024-01-02.log",
                "logs-2024-01-03.log",
            ]
        );
        assert!(written.iter().all(|p| p.is_file()));
    }

    #[test]
    fn line_counts_stay_within_bounds() {
        let dir = TempDir::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for path in generate_logs(&config(&dir), start).unwrap() {
            let content = std::fs::read_to_string(&path).unwrap();
            let count = content.lines().count();
            assert!((5..=12).contains(&count), "unexpected line count {count}");
        }
    }

    #[test]
    fn every_generated_line_is_classifiable() {
        let dir = TempDir::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for path in generate_logs(&config(&dir), start).unwrap() {
            let content = std::fs::read_to_string(&path).unwrap();
            for line in content.lines() {
                assert!(classify(line).is_some(), "unclassifiable line: {line}");
            }
        }
    }

    #[test]
    fn rejects_inverted_line_bounds() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir);
        cfg.min_lines = 20;
        cfg.max_lines = 10;

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(generate_logs(&cfg, start).is_err());
    }

    #[test]
    fn default_start_date_spans_back_one_day_per_file() {
        let today = Local::now().date_naive();
        assert_eq!(default_start_date(5), today - Duration::days(4));
        assert_eq!(default_start_date(1), today);
        assert_eq!(default_start_date(0), today);
    }
}

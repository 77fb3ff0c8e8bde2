//! Analysis result types.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use super::classify::LogLevel;

/// Classified line count per severity level. An absent key means zero;
/// counts are never negative.
pub type LevelCounts = HashMap<LogLevel, u64>;

/// Occurrence count per recognized exception keyword, same absence
/// convention.
pub type ErrorTypeCounts = HashMap<&'static str, u64>;

/// Everything learned from one scan of one file.
///
/// A scan always produces a result, even when reading fails: an I/O error
/// partway through keeps the counts accumulated up to that point and
/// records the diagnostic in `failure`, and a file that cannot be opened
/// yields empty counts with the diagnostic set. Aggregation can therefore
/// rely on one result per input file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileAnalysis {
    pub path: String,
    pub levels: LevelCounts,
    /// WARN/ERROR line texts in the order they appeared in the file.
    pub samples: Vec<String>,
    pub error_types: ErrorTypeCounts,
    pub failure: Option<String>,
}

impl FileAnalysis {
    pub fn new(path: &Path) -> Self {
        FileAnalysis {
            path: path.display().to_string(),
            ..FileAnalysis::default()
        }
    }

    /// Total classified lines across all levels.
    pub fn classified_lines(&self) -> u64 {
        self.levels.values().sum()
    }
}

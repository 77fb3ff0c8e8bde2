//! Log line classification.
//!
//! Severity detection is substring based, not a parser: a line belongs to
//! the first level whose marker (the level name surrounded by single
//! spaces) occurs anywhere in it. Keyword detection is plain substring
//! search over a fixed set of exception names.

use serde::Serialize;
use std::fmt;

/// Severity levels recognized in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Fixed order in which level markers are checked. A line matching
    /// several markers counts only under the first one in this order.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Marker searched for within a line, spaces included.
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Trace => " TRACE ",
            LogLevel::Debug => " DEBUG ",
            LogLevel::Info => " INFO ",
            LogLevel::Warn => " WARN ",
            LogLevel::Error => " ERROR ",
        }
    }

    /// WARN and ERROR lines are the ones sampled and scanned for
    /// exception keywords.
    pub fn is_severe(self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exception and error type names searched for within WARN/ERROR lines.
pub const ERROR_KEYWORDS: &[&str] = &[
    "NullPointerException",
    "ArrayIndexOutOfBoundsException",
    "IllegalArgumentException",
    "IllegalStateException",
    "ClassCastException",
    "NumberFormatException",
    "SQLException",
    "IOException",
    "FileNotFoundException",
    "TimeoutException",
    "OutOfMemoryError",
    "StackOverflowError",
];

/// Returns the severity of a line, or `None` if no marker matches.
pub fn classify(line: &str) -> Option<LogLevel> {
    LogLevel::ALL
        .into_iter()
        .find(|level| line.contains(level.marker()))
}

/// Returns every known exception keyword occurring in the line.
///
/// Matching is exact-substring with no word-boundary check, so a keyword
/// embedded in a longer identifier still counts. Each keyword is reported
/// at most once per line, however often it repeats.
pub fn find_keywords(line: &str) -> Vec<&'static str> {
    ERROR_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| line.contains(keyword))
        .collect()
}

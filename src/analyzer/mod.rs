pub mod aggregate;
pub mod classify;
pub mod file;
pub mod types;

// Re-export main types for easier access
pub use aggregate::{Aggregate, merge_counts};
pub use classify::{ERROR_KEYWORDS, LogLevel, classify, find_keywords};
pub use file::{analyze, count_levels};
pub use types::{ErrorTypeCounts, FileAnalysis, LevelCounts};

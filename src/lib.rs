//! # Logtally - Log File Statistics
//!
//! Scans directories of generated log files and reports per-severity
//! line counts plus, for WARN/ERROR lines, recognized exception keywords
//! and line samples. The same analysis runs twice — sequentially and on a
//! bounded worker pool — so the two passes can be compared and must agree
//! on their totals.
//!
//! ## Quick Start
//!
//! ```bash
//! # Produce a few days of synthetic logs
//! logtally generate --dir logs
//!
//! # Analyze them with both passes
//! logtally analyze logs
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod generator;
pub mod parallel;
pub mod pipeline;

pub use cli::{Cli, Output};
pub use config::LogtallyConfig;

/// Result type alias for logtally operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

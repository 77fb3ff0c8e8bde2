//! Orchestration of analysis passes.
//!
//! The driver holds no analysis logic: it hands the file list to the
//! scheduler in the requested mode, substitutes an empty result where a
//! task failed outright, folds everything into the pass totals on the
//! calling thread, and captures the elapsed wall clock per pass. Each
//! pass is an independent scan; the parallel pass never reuses the
//! sequential pass's results.

pub mod discover;

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use crate::analyzer::{self, Aggregate, FileAnalysis};
use crate::parallel::{RunMode, TaskScheduler};

/// Which per-file analysis the passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Severity level counts only.
    Levels,
    /// Level counts plus WARN/ERROR samples and exception keyword counts.
    Errors,
}

/// Everything one pass produced.
#[derive(Debug, Serialize)]
pub struct PassReport {
    pub mode: RunMode,
    pub aggregate: Aggregate,
    /// One entry per input file, in input order.
    pub files: Vec<FileAnalysis>,
    pub elapsed_ms: u64,
}

impl PassReport {
    /// Files whose analysis recorded an I/O or task failure.
    pub fn failures(&self) -> impl Iterator<Item = &FileAnalysis> {
        self.files.iter().filter(|f| f.failure.is_some())
    }
}

/// The outcome of a full run: up to one report per mode.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub file_count: usize,
    pub sequential: Option<PassReport>,
    pub parallel: Option<PassReport>,
}

impl PipelineReport {
    pub fn passes(&self) -> impl Iterator<Item = &PassReport> {
        self.sequential.iter().chain(self.parallel.iter())
    }
}

/// Run one pass over `files` in the given mode and fold the results.
pub fn run_pass(
    files: &[PathBuf],
    mode: RunMode,
    kind: AnalysisKind,
    scheduler: &TaskScheduler,
) -> Result<PassReport> {
    let start = Instant::now();

    let analyze: fn(&Path) -> FileAnalysis = match kind {
        AnalysisKind::Levels => analyzer::count_levels,
        AnalysisKind::Errors => analyzer::analyze,
    };

    let outcomes = scheduler.run_all(files.to_vec(), mode, move |path: PathBuf| {
        Ok(analyze(&path))
    })?;

    let mut reports = Vec::with_capacity(files.len());
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(message) => {
                // A failed task still contributes an entry, so every pass
                // yields exactly one result per file.
                warn!(file = %path.display(), error = %message, "analysis task failed");
                let mut empty = FileAnalysis::new(path);
                empty.failure = Some(message);
                reports.push(empty);
            }
        }
    }

    let mut aggregate = Aggregate::default();
    for report in &reports {
        aggregate.absorb(report);
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;
    debug!(mode = mode.label(), files = reports.len(), elapsed_ms, "pass complete");

    Ok(PassReport {
        mode,
        aggregate,
        files: reports,
        elapsed_ms,
    })
}

/// Run the requested passes over `files`, each as its own scan.
pub fn run(
    files: &[PathBuf],
    kind: AnalysisKind,
    scheduler: &TaskScheduler,
    modes: &[RunMode],
) -> Result<PipelineReport> {
    let mut report = PipelineReport {
        file_count: files.len(),
        sequential: None,
        parallel: None,
    };

    for &mode in modes {
        let pass = run_pass(files, mode, kind, scheduler)?;
        match mode {
            RunMode::Sequential => report.sequential = Some(pass),
            RunMode::Parallel => report.parallel = Some(pass),
        }
    }

    Ok(report)
}

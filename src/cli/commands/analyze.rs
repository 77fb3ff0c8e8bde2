//! Analyze command: the full discover → scan → aggregate → report run.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::analyzer::{ErrorTypeCounts, LevelCounts, LogLevel};
use crate::cli::Output;
use crate::config::LogtallyConfig;
use crate::parallel::{RunMode, TaskScheduler};
use crate::pipeline::{self, AnalysisKind, PassReport, PipelineReport, discover};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory containing log files
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// File name pattern to analyze (glob-style)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Which passes to run
    #[arg(long, value_enum, default_value = "both")]
    pub mode: ModeArg,

    /// Count severity levels only; skip keyword scanning and samples
    #[arg(long)]
    pub levels_only: bool,

    /// Worker threads for the parallel pass (0 = one per core)
    #[arg(long)]
    pub max_threads: Option<usize>,

    /// WARN/ERROR lines to show per file
    #[arg(long)]
    pub sample_lines: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show pass statistics after the report
    #[arg(long)]
    pub stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    Sequential,
    Parallel,
    Both,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON format
    Json,
}

pub fn execute(args: AnalyzeArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = LogtallyConfig::load(config_path)?;

    // Apply CLI overrides
    let mut pool = config.pool.clone();
    if let Some(threads) = args.max_threads {
        pool.max_threads = threads;
    }
    let pattern = args
        .pattern
        .clone()
        .unwrap_or_else(|| config.analyzer.pattern.clone());
    let sample_lines = args.sample_lines.unwrap_or(config.analyzer.sample_lines);

    let files = discover::discover_logs(&args.dir, &pattern)?;
    let text = matches!(args.format, OutputFormat::Text);

    if files.is_empty() && text {
        // Zero totals over zero files is a valid outcome, not an error.
        output.warning(&format!(
            "no files matching {} in {}",
            pattern,
            args.dir.display()
        ));
    }

    let kind = if args.levels_only {
        AnalysisKind::Levels
    } else {
        AnalysisKind::Errors
    };
    let modes: &[RunMode] = match args.mode {
        ModeArg::Sequential => &[RunMode::Sequential],
        ModeArg::Parallel => &[RunMode::Parallel],
        ModeArg::Both => &[RunMode::Sequential, RunMode::Parallel],
    };

    let scheduler = TaskScheduler::new(pool);
    let report = pipeline::run(&files, kind, &scheduler, modes)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print_report(&report, &scheduler, sample_lines, args.stats, output)
        }
    }

    Ok(())
}

fn print_report(
    report: &PipelineReport,
    scheduler: &TaskScheduler,
    sample_lines: usize,
    stats: bool,
    output: &Output,
) {
    for pass in report.passes() {
        print_pass(pass, report.file_count, scheduler, output);
    }

    // The two passes aggregate identically, so keyword totals and samples
    // are reported once, preferring the parallel pass.
    let detail = report.parallel.as_ref().or(report.sequential.as_ref());
    if let Some(pass) = detail {
        print_error_details(pass, sample_lines, output);
    }

    output.blank_line();
    let timings: Vec<String> = report
        .passes()
        .map(|pass| format!("{} {} ms", pass.mode.label(), pass.elapsed_ms))
        .collect();
    output.success(&format!(
        "analyzed {} files: {}",
        report.file_count,
        timings.join(", ")
    ));

    if stats {
        print_stats(report, scheduler, output);
    }
}

fn print_pass(pass: &PassReport, file_count: usize, scheduler: &TaskScheduler, output: &Output) {
    let title = match pass.mode {
        RunMode::Sequential => "Sequential pass".to_string(),
        RunMode::Parallel => format!(
            "Parallel pass ({} workers)",
            scheduler.worker_count(file_count)
        ),
    };
    output.header(&title);

    for file in &pass.files {
        output.table_row(&file.path, &format_levels(&file.levels));
        if let Some(failure) = &file.failure {
            output.warning(failure);
        }
    }
    output.table_row("Totals", &format_levels(&pass.aggregate.levels));
    output.table_row("Time", &format!("{} ms", pass.elapsed_ms));
}

fn print_error_details(pass: &PassReport, sample_lines: usize, output: &Output) {
    let keywords = sorted_error_counts(&pass.aggregate.error_types);
    if !keywords.is_empty() {
        output.section("Exception keywords");
        for (keyword, count) in keywords {
            output.list_item(&format!("{count} × {keyword}"));
        }
    }

    if sample_lines == 0 || pass.files.iter().all(|f| f.samples.is_empty()) {
        return;
    }

    output.section(&format!("WARN/ERROR samples (first {sample_lines} per file)"));
    for file in &pass.files {
        if file.samples.is_empty() {
            continue;
        }
        output.list_item(&file.path);
        for line in file.samples.iter().take(sample_lines) {
            output.indent(line);
        }
        let hidden = file.samples.len().saturating_sub(sample_lines);
        if hidden > 0 {
            output.indent(&format!("(+{hidden} more)"));
        }
    }
}

fn print_stats(report: &PipelineReport, scheduler: &TaskScheduler, output: &Output) {
    output.section("Statistics");
    output.key_value("Files analyzed:", &report.file_count.to_string());
    output.key_value(
        "Pool size:",
        &scheduler.worker_count(report.file_count).to_string(),
    );
    for pass in report.passes() {
        output.key_value(
            &format!("{} pass:", pass.mode.label()),
            &format!(
                "{} classified lines, {} failures, {} ms",
                pass.aggregate.total_lines(),
                pass.failures().count(),
                pass.elapsed_ms
            ),
        );
    }
}

/// Render level counts in check order, skipping absent levels.
fn format_levels(counts: &LevelCounts) -> String {
    let parts: Vec<String> = LogLevel::ALL
        .iter()
        .filter_map(|level| counts.get(level).map(|n| format!("{level}: {n}")))
        .collect();
    if parts.is_empty() {
        "(no classified lines)".to_string()
    } else {
        parts.join(", ")
    }
}

/// Keyword totals, most frequent first, ties by name.
fn sorted_error_counts(counts: &ErrorTypeCounts) -> Vec<(&'static str, u64)> {
    let mut entries: Vec<_> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    entries
}

//! Generate command: produce synthetic log files to analyze.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::LogtallyConfig;
use crate::generator;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output directory for the generated files
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Number of daily files to produce
    #[arg(long)]
    pub files: Option<usize>,

    /// Minimum lines per file
    #[arg(long)]
    pub min_lines: Option<usize>,

    /// Maximum lines per file
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Date of the first file (YYYY-MM-DD); later files advance one day
    /// each. Defaults so the newest file is today's.
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn execute(args: GenerateArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = LogtallyConfig::load(config_path)?;

    // Apply CLI overrides
    let mut generator_config = config.generator.clone();
    if let Some(dir) = args.dir {
        generator_config.dir = dir;
    }
    if let Some(files) = args.files {
        generator_config.files = files;
    }
    if let Some(min_lines) = args.min_lines {
        generator_config.min_lines = min_lines;
    }
    if let Some(max_lines) = args.max_lines {
        generator_config.max_lines = max_lines;
    }

    let start_date = args
        .start_date
        .unwrap_or_else(|| generator::default_start_date(generator_config.files));

    let written = generator::generate_logs(&generator_config, start_date)?;

    if output.is_verbose() {
        for path in &written {
            output.verbose(&path.display().to_string());
        }
    }
    output.success(&format!(
        "generated {} log files in {}",
        written.len(),
        generator_config.dir.display()
    ));

    Ok(())
}

//! Command-line interface for logtally
//!
//! This module provides the main CLI structure and command handling. It
//! uses clap for argument parsing and keeps each command in its own
//! module under `commands/`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

/// Logtally - log file statistics with sequential and worker-pool passes
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze log files sequentially and on a worker pool
    Analyze(commands::analyze::AnalyzeArgs),
    /// Generate synthetic log files to analyze
    Generate(commands::generate::GenerateArgs),
    /// Show version information
    Version,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Analyze(args)) => {
                commands::analyze::execute(args, self.config.as_deref(), &output)
            }
            Some(Commands::Generate(args)) => {
                commands::generate::execute(args, self.config.as_deref(), &output)
            }
            Some(Commands::Version) => commands::version::execute(&output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

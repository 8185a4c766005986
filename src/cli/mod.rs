//! CLI argument parsing for pairjudge
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};

pub use args::{ExtractArgs, PromptArgs, RunArgs, SummarizeArgs};
pub use pairjudge_core::format::OutputFormat;
use parse::parse_output_format;

/// Pairjudge - blind pairwise LLM-as-judge evaluation
#[derive(Parser, Debug)]
#[command(name = "pairjudge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_parser = parse_output_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "info", "pairjudge_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every item of an input CSV and write the realigned results
    Run(RunArgs),

    /// Parse score blocks out of a saved judge verdict
    Extract(ExtractArgs),

    /// Print the rubric prompt sent to the judge
    Prompt(PromptArgs),

    /// Report mean scores and head-to-head counts for a results file
    Summarize(SummarizeArgs),
}

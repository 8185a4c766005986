//! Pairjudge - blind pairwise LLM-as-judge evaluation CLI
//!
//! Presents a base and a fine-tuned answer to a judge model in random order,
//! parses the rubric scores it returns and attributes them to the right model.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::Cli;
use commands::dispatch;
use pairjudge_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return dispatch::reject_args(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let outcome = dispatch::run(&cli, start);
    dispatch::finish(&cli, outcome)
}

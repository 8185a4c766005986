//! `pairjudge summarize` - aggregate a results file

use crate::cli::{Cli, OutputFormat, SummarizeArgs};
use pairjudge_core::error::Result;
use pairjudge_core::format::{format_delta, format_mean};
use pairjudge_core::sink::read_results;
use pairjudge_core::summary::Summary;

pub fn execute(cli: &Cli, args: &SummarizeArgs) -> Result<()> {
    let rows = read_results(&args.results)?;
    let summary = Summary::from_rows(&rows);

    if cli.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.rows == 0 {
        println!("No scored rows in {}", args.results.display());
        return Ok(());
    }

    println!("{} scored item(s)", summary.rows);
    println!();
    println!("{:<12} {:>6} {:>6} {:>7}", "criterion", "base", "fine", "delta");
    for c in &summary.criteria {
        println!(
            "{:<12} {:>6} {:>6} {:>7}",
            c.criterion,
            format_mean(c.base_mean),
            format_mean(c.fine_mean),
            format_delta(c.delta)
        );
    }
    println!();
    let outcomes = summary.outcomes;
    println!(
        "fine-tuned wins: {}  ties: {}  base wins: {}",
        outcomes.fine_wins, outcomes.ties, outcomes.base_wins
    );
    Ok(())
}

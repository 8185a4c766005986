//! `pairjudge run` - evaluate an input file end to end

use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::{Cli, OutputFormat, RunArgs};
use pairjudge_core::assign::Assigner;
use pairjudge_core::config::{api_key_from_env, JudgeConfig, WriteMode};
use pairjudge_core::error::{PairJudgeError, Result};
use pairjudge_core::judge::openai::OpenAiJudge;
use pairjudge_core::pipeline::{Pipeline, RunStats};
use pairjudge_core::score::ScorePolicy;
use pairjudge_core::sink::CsvSink;
use pairjudge_core::source::load_items;
use pairjudge_core::trace_time;

/// Summary of a finished (or interrupted) run
#[derive(Debug, Serialize)]
struct RunReport {
    input: PathBuf,
    output: PathBuf,
    model: String,
    seed: Option<u64>,
    score_policy: ScorePolicy,
    write_mode: WriteMode,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    written: usize,
    #[serde(flatten)]
    stats: RunStats,
}

/// Load config and let command-line flags take precedence
fn resolve_config(args: &RunArgs) -> Result<JudgeConfig> {
    let cwd = env::current_dir()?;
    let mut config = JudgeConfig::resolve(args.config.as_deref(), &cwd)?;

    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(api_base) = &args.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(policy) = args.score_policy {
        config.score_policy = policy;
    }
    if args.incremental {
        config.write_mode = WriteMode::Incremental;
    }

    config.validate()?;
    Ok(config)
}

pub fn execute(cli: &Cli, args: &RunArgs, start: Instant) -> Result<()> {
    let config = resolve_config(args)?;
    let api_key = api_key_from_env()?;

    let items = load_items(&args.input, args.limit)?;
    trace_time!(start, "load_items", items = items.len());

    let client = Arc::new(OpenAiJudge::from_config(&config, api_key)?);
    let pipeline = Pipeline::new(client, &config);
    let mut assigner = Assigner::from_seed_option(args.seed);

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    let _ = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| PairJudgeError::Other(format!("failed to start async runtime: {}", e)))?;

    let mut sink = CsvSink::create(&args.output, config.write_mode)?;
    let started_at = Utc::now();
    tracing::info!(
        items = items.len(),
        model = %config.model,
        concurrency = config.concurrency,
        "starting evaluation"
    );

    let acc = runtime.block_on(pipeline.run(
        items,
        &mut assigner,
        &interrupted,
        &mut |row| sink.on_row(row),
    ))?;
    let (rows, stats) = acc.into_parts();
    let written = sink.finish(&rows)?;

    let report = RunReport {
        input: args.input.clone(),
        output: args.output.clone(),
        model: config.model.clone(),
        seed: args.seed,
        score_policy: config.score_policy,
        write_mode: config.write_mode,
        started_at,
        finished_at: Utc::now(),
        written,
        stats,
    };
    print_report(cli, &report)?;
    trace_time!(start, "run_complete");

    if report.stats.interrupted {
        return Err(PairJudgeError::Interrupted { written });
    }
    Ok(())
}

fn print_report(cli: &Cli, report: &RunReport) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Human => {
            if cli.quiet {
                return Ok(());
            }
            print_human(report);
        }
    }
    Ok(())
}

fn print_human(report: &RunReport) {
    let stats = &report.stats;
    let elapsed = report.finished_at - report.started_at;
    println!(
        "Evaluated {} of {} item(s) with {} in {:.1}s",
        stats.processed,
        stats.items,
        report.model,
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    println!(
        "  rows written:   {} ({})",
        report.written,
        report.output.display()
    );
    println!("  judge failures: {}", stats.judge_failures);
    println!(
        "  parse failures: {} ({} out of range)",
        stats.parse_failures, stats.out_of_range
    );
    if let Some(seed) = report.seed {
        println!("  seed:           {}", seed);
    }
    if stats.interrupted {
        println!("  interrupted:    {} item(s) not evaluated", stats.skipped);
    }
}

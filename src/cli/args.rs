use std::path::PathBuf;

use super::parse::parse_score_policy;
use clap::Args;
use pairjudge_core::score::ScorePolicy;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// CSV with question, base_response and finetuned_response columns
    #[arg(long, short)]
    pub input: PathBuf,

    /// Destination CSV for result rows
    #[arg(long, short)]
    pub output: PathBuf,

    /// Config file (defaults to ./pairjudge.toml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Judge model
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long)]
    pub api_base: Option<String>,

    /// Seed for the A/B assignment (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum judge calls in flight
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Only evaluate the first N items
    #[arg(long)]
    pub limit: Option<usize>,

    /// Handling of scores outside 1-5: reject, clamp or accept
    #[arg(long, value_parser = parse_score_policy)]
    pub score_policy: Option<ScorePolicy>,

    /// Write each row as soon as it is scored
    #[arg(long)]
    pub incremental: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// File holding the verdict text, or "-" for stdin
    pub file: PathBuf,

    /// Handling of scores outside 1-5: reject, clamp or accept
    #[arg(long, value_parser = parse_score_policy, default_value = "reject")]
    pub score_policy: ScorePolicy,
}

#[derive(Args, Debug, Clone)]
pub struct PromptArgs {
    #[arg(long)]
    pub question: String,

    /// Answer shown under label A
    #[arg(long)]
    pub answer_a: String,

    /// Answer shown under label B
    #[arg(long)]
    pub answer_b: String,
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Results CSV written by `pairjudge run`
    pub results: PathBuf,
}

//! Run configuration for pairjudge
//!
//! Settings come from `pairjudge.toml` (or the file given with `--config`),
//! then CLI flags override individual fields. The judge API key is only read
//! from the environment.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PairJudgeError, Result};
use crate::judge::RetryPolicy;
use crate::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::score::ScorePolicy;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pairjudge.toml";

/// Environment variables consulted for the judge API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["OPENAI_API_KEY", "PAIRJUDGE_API_KEY"];

/// When result rows reach the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Write every row once the whole input has been processed
    #[default]
    Batch,
    /// Append and flush each row as soon as it is produced
    Incremental,
}

impl FromStr for WriteMode {
    type Err = PairJudgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batch" => Ok(WriteMode::Batch),
            "incremental" => Ok(WriteMode::Incremental),
            other => Err(PairJudgeError::invalid_config(
                "write_mode",
                format!("{other} (expected: batch or incremental)"),
            )),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Batch => write!(f, "batch"),
            WriteMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Judge and pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Judge model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API (without `/v1/...`)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// System instruction sent with every rubric prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Decoding temperature; kept low for near-deterministic verdicts
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for transient judge errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Judge calls allowed in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Handling of scores outside 1..=5
    #[serde(default)]
    pub score_policy: ScorePolicy,

    #[serde(default)]
    pub write_mode: WriteMode,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_concurrency() -> usize {
    1
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            concurrency: default_concurrency(),
            score_policy: ScorePolicy::default(),
            write_mode: WriteMode::default(),
        }
    }
}

impl JudgeConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PairJudgeError::io_operation("read config", path.display(), e))?;
        let config: JudgeConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file, else `pairjudge.toml` in `dir` if it
    /// exists, else defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(PairJudgeError::invalid_config("model", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(PairJudgeError::invalid_config(
                "temperature",
                format!("{} (must be within 0..=2)", self.temperature),
            ));
        }
        if self.concurrency == 0 {
            return Err(PairJudgeError::invalid_config(
                "concurrency",
                "must be at least 1",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PairJudgeError::invalid_config(
                "timeout_secs",
                "must be at least 1",
            ));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(PairJudgeError::invalid_config(
                "api_base",
                format!("{} (must be an http(s) URL)", self.api_base),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

/// Read the judge API key from the environment
pub fn api_key_from_env() -> Result<String> {
    API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            PairJudgeError::UsageError(format!(
                "{} or {} environment variable must be set",
                API_KEY_ENV_VARS[0], API_KEY_ENV_VARS[1]
            ))
        })
}

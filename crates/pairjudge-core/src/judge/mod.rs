//! Judge client for LLM-as-judge scoring.
//!
//! A [`JudgeClient`] turns `(system_instruction, rubric_prompt)` into verdict
//! text. [`judge_with_retry`] wraps a client so that errors never escape:
//! transient failures are retried per [`RetryPolicy`], and anything left over
//! becomes [`Verdict::Failed`].
//!
//! # Example
//!
//! ```rust,no_run
//! use pairjudge_core::config::JudgeConfig;
//! use pairjudge_core::judge::{judge_with_retry, openai::OpenAiJudge};
//!
//! # async fn demo() -> pairjudge_core::error::Result<()> {
//! let config = JudgeConfig::default();
//! let client = OpenAiJudge::from_config(&config, "sk-...".to_string())?;
//! let verdict = judge_with_retry(&client, &config.system_prompt, "...", &config.retry_policy()).await;
//! println!("{:?}", verdict.text());
//! # Ok(())
//! # }
//! ```

pub mod openai;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Raw outcome of one judge call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Text(String),
    /// The call failed; never produced by a judge reply
    Failed { reason: String },
}

impl Verdict {
    pub fn text(&self) -> Option<&str> {
        match self {
            Verdict::Text(text) => Some(text),
            Verdict::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Verdict::Failed { .. })
    }
}

/// Errors from a single judge request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JudgeError {
    #[error("judge request timed out: {0}")]
    Timeout(String),

    #[error("judge transport error: {0}")]
    Transport(String),

    #[error("judge API request failed: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("invalid judge API response: {0}")]
    MalformedResponse(String),
}

impl JudgeError {
    /// Whether a retry may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            JudgeError::Timeout(_) | JudgeError::Transport(_) => true,
            JudgeError::Status { status, .. } => *status == 429 || *status >= 500,
            JudgeError::MalformedResponse(_) => false,
        }
    }
}

/// A judging model behind a request/response boundary.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Send the rubric prompt and return the judge's free-text reply.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, JudgeError>;

    /// Model identifier, for logs
    fn model(&self) -> &str;
}

/// Retry settings for transient judge errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Call the judge, retrying transient errors, and fold any final error into
/// [`Verdict::Failed`].
pub async fn judge_with_retry(
    client: &dyn JudgeClient,
    system: &str,
    prompt: &str,
    policy: &RetryPolicy,
) -> Verdict {
    let mut attempt = 0u32;
    loop {
        match client.complete(system, prompt).await {
            Ok(text) => return Verdict::Text(text),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                tracing::debug!(
                    model = client.model(),
                    attempt,
                    error = %err,
                    "transient judge error, retrying"
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(err) => {
                tracing::warn!(model = client.model(), attempts = attempt + 1, error = %err, "judge call failed");
                return Verdict::Failed {
                    reason: err.to_string(),
                };
            }
        }
    }
}

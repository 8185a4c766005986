//! Error types and exit codes for pairjudge
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, interrupted run)
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (missing input file, missing column, malformed record)
//!
//! Judge-call and verdict-parse failures are not represented here: they are
//! recovered per item by the pipeline and only show up in run statistics.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable or malformed input (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that abort a pairjudge run
#[derive(Error, Debug)]
pub enum PairJudgeError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // Data errors (exit code 3)
    #[error("input file not found: {path:?}")]
    InputNotFound { path: PathBuf },

    #[error("missing required column '{column}' in {path:?}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("malformed record {record} in {path:?}: {reason}")]
    InvalidRecord {
        path: PathBuf,
        record: usize,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("run interrupted after {written} result row(s) were saved")]
    Interrupted { written: usize },

    #[error("{0}")]
    Other(String),
}

impl PairJudgeError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        PairJudgeError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid configuration value
    pub fn invalid_config(field: &str, reason: impl std::fmt::Display) -> Self {
        PairJudgeError::InvalidConfig {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PairJudgeError::UnknownFormat(_)
            | PairJudgeError::UsageError(_)
            | PairJudgeError::InvalidConfig { .. } => ExitCode::Usage,

            PairJudgeError::InputNotFound { .. }
            | PairJudgeError::MissingColumn { .. }
            | PairJudgeError::InvalidRecord { .. } => ExitCode::Data,

            PairJudgeError::Io(_)
            | PairJudgeError::Csv(_)
            | PairJudgeError::Json(_)
            | PairJudgeError::Toml(_)
            | PairJudgeError::FailedOperationWithTarget { .. }
            | PairJudgeError::Interrupted { .. }
            | PairJudgeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            PairJudgeError::UnknownFormat(_) => "unknown_format",
            PairJudgeError::UsageError(_) => "usage_error",
            PairJudgeError::InvalidConfig { .. } => "invalid_config",
            PairJudgeError::InputNotFound { .. } => "input_not_found",
            PairJudgeError::MissingColumn { .. } => "missing_column",
            PairJudgeError::InvalidRecord { .. } => "invalid_record",
            PairJudgeError::Io(_) => "io_error",
            PairJudgeError::Csv(_) => "csv_error",
            PairJudgeError::Json(_) => "json_error",
            PairJudgeError::Toml(_) => "toml_error",
            PairJudgeError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            PairJudgeError::Interrupted { .. } => "interrupted",
            PairJudgeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for pairjudge operations
pub type Result<T> = std::result::Result<T, PairJudgeError>;

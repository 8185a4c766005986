//! Output format handling for pairjudge
//!
//! - human: readable, concise output for terminal use
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PairJudgeError;

/// Output format for pairjudge commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = PairJudgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(PairJudgeError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Format a mean score for terminal output
pub fn format_mean(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a signed difference, always showing the sign
pub fn format_delta(value: f64) -> String {
    format!("{:+.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        let err = "records".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, PairJudgeError::UnknownFormat(ref f) if f == "records"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_mean(11.0 / 3.0), "3.67");
        assert_eq!(format_delta(0.5), "+0.50");
        assert_eq!(format_delta(-0.25), "-0.25");
    }
}

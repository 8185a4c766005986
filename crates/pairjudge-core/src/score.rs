//! Rubric criteria and per-candidate score sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PairJudgeError;

/// Lowest score on the rubric scale
pub const MIN_SCORE: u8 = 1;
/// Highest score on the rubric scale
pub const MAX_SCORE: u8 = 5;

/// The four rubric criteria, in the order the judge must list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Clarity,
    Accuracy,
    Helpfulness,
    Relevance,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Clarity,
        Criterion::Accuracy,
        Criterion::Helpfulness,
        Criterion::Relevance,
    ];

    /// Name as it appears in the judge prompt and verdict
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Clarity => "Clarity",
            Criterion::Accuracy => "Accuracy",
            Criterion::Helpfulness => "Helpfulness",
            Criterion::Relevance => "Relevance",
        }
    }

    /// Column suffix in result files
    pub fn key(self) -> &'static str {
        match self {
            Criterion::Clarity => "clarity",
            Criterion::Accuracy => "accuracy",
            Criterion::Helpfulness => "helpfulness",
            Criterion::Relevance => "relevance",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scores for one candidate on one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub clarity: u8,
    pub accuracy: u8,
    pub helpfulness: u8,
    pub relevance: u8,
}

impl ScoreSet {
    pub fn new(clarity: u8, accuracy: u8, helpfulness: u8, relevance: u8) -> Self {
        Self {
            clarity,
            accuracy,
            helpfulness,
            relevance,
        }
    }

    /// Build from values listed in `Criterion::ALL` order
    pub fn from_ordered(values: [u8; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Clarity => self.clarity,
            Criterion::Accuracy => self.accuracy,
            Criterion::Helpfulness => self.helpfulness,
            Criterion::Relevance => self.relevance,
        }
    }

    pub fn total(&self) -> u32 {
        Criterion::ALL.iter().map(|c| u32::from(self.get(*c))).sum()
    }
}

/// What to do with a criterion value outside `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicy {
    /// Treat the whole block as malformed
    #[default]
    Reject,
    /// Clamp into the rubric range
    Clamp,
    /// Record the value unchanged
    Accept,
}

impl ScorePolicy {
    /// Apply the policy to a raw digit. `None` means the block is rejected.
    pub fn apply(self, value: u8) -> Option<u8> {
        let in_range = (MIN_SCORE..=MAX_SCORE).contains(&value);
        match self {
            _ if in_range => Some(value),
            ScorePolicy::Reject => None,
            ScorePolicy::Clamp => Some(value.clamp(MIN_SCORE, MAX_SCORE)),
            ScorePolicy::Accept => Some(value),
        }
    }
}

impl FromStr for ScorePolicy {
    type Err = PairJudgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(ScorePolicy::Reject),
            "clamp" => Ok(ScorePolicy::Clamp),
            "accept" => Ok(ScorePolicy::Accept),
            other => Err(PairJudgeError::invalid_config(
                "score_policy",
                format!("{other} (expected: reject, clamp, or accept)"),
            )),
        }
    }
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorePolicy::Reject => write!(f, "reject"),
            ScorePolicy::Clamp => write!(f, "clamp"),
            ScorePolicy::Accept => write!(f, "accept"),
        }
    }
}

//! Evaluation items and the identities involved in a blind comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One question with the answers of both models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationItem {
    /// Zero-based position in the input file
    pub index: usize,
    pub question: String,
    pub candidate_base: String,
    pub candidate_fine: String,
}

impl EvaluationItem {
    pub fn new(
        index: usize,
        question: impl Into<String>,
        candidate_base: impl Into<String>,
        candidate_fine: impl Into<String>,
    ) -> Self {
        Self {
            index,
            question: question.into(),
            candidate_base: candidate_base.into(),
            candidate_fine: candidate_fine.into(),
        }
    }

    /// Answer text of the given candidate
    pub fn answer(&self, candidate: Candidate) -> &str {
        match candidate {
            Candidate::Base => &self.candidate_base,
            Candidate::Fine => &self.candidate_fine,
        }
    }
}

/// Anonymous position shown to the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::A, Label::B];

    pub fn other(self) -> Label {
        match self {
            Label::A => Label::B,
            Label::B => Label::A,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Label::A => 'A',
            Label::B => 'B',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// True identity of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Candidate {
    Base,
    Fine,
}

impl Candidate {
    /// Column prefix used in result files
    pub fn prefix(self) -> &'static str {
        match self {
            Candidate::Base => "base",
            Candidate::Fine => "fine",
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

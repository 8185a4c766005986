//! Score extraction from free-text judge verdicts.
//!
//! The verdict is treated as a small token grammar:
//!
//! ```text
//! verdict   := (noise | block)*
//! block     := header noise* clarity accuracy helpfulness relevance
//! header    := "Answer A:" or "Answer B:" anywhere in a line
//! criterion := "- " Name ":" digit   (blank lines allowed between criteria)
//! ```
//!
//! Criteria may sit one per line or inline after the header:
//!
//! ```text
//! ### Evaluation for Answer A: - Clarity: 4 - Accuracy: 4 - Helpfulness: 3 - Relevance: 4
//! ```
//!
//! A block either yields all four scores or nothing. The first complete block
//! for a label wins; an item is only usable once both labels are recovered.

pub mod lexer;

use serde::Serialize;

use crate::item::Label;
use crate::score::{Criterion, ScorePolicy, ScoreSet};
use lexer::{tokenize, Token};

/// Result of parsing one verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Extraction {
    /// Both labels had a complete, well-formed block
    Complete { a: ScoreSet, b: ScoreSet },
    /// At least one label is missing; no scores are exposed
    Incomplete {
        recovered: Vec<Label>,
        /// A block was dropped because a value fell outside the rubric range
        out_of_range: bool,
    },
}

impl Extraction {
    pub fn is_complete(&self) -> bool {
        matches!(self, Extraction::Complete { .. })
    }

    /// Score sets in label order, only when complete
    pub fn into_pair(self) -> Option<(ScoreSet, ScoreSet)> {
        match self {
            Extraction::Complete { a, b } => Some((a, b)),
            Extraction::Incomplete { .. } => None,
        }
    }
}

/// Why an open block was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEnd {
    Done(ScoreSet),
    Broken,
    OutOfRange,
}

struct OpenBlock {
    label: Label,
    values: Vec<u8>,
}

impl OpenBlock {
    fn new(label: Label) -> Self {
        Self {
            label,
            values: Vec::with_capacity(Criterion::ALL.len()),
        }
    }

    fn expected(&self) -> Criterion {
        Criterion::ALL[self.values.len()]
    }

    /// Feed one token. `None` keeps the block open.
    fn feed(&mut self, token: &Token, policy: ScorePolicy) -> Option<BlockEnd> {
        match token {
            Token::Blank => None,
            Token::Text if self.values.is_empty() => None,
            Token::Score { criterion, raw } if *criterion == self.expected() => {
                match policy.apply(*raw) {
                    Some(value) => self.values.push(value),
                    None => return Some(BlockEnd::OutOfRange),
                }
                if self.values.len() == Criterion::ALL.len() {
                    let mut ordered = [0u8; 4];
                    ordered.copy_from_slice(&self.values);
                    return Some(BlockEnd::Done(ScoreSet::from_ordered(ordered)));
                }
                None
            }
            _ => Some(BlockEnd::Broken),
        }
    }
}

/// Parses verdict text into per-label score sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreExtractor {
    policy: ScorePolicy,
}

impl ScoreExtractor {
    pub fn new(policy: ScorePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScorePolicy {
        self.policy
    }

    pub fn extract(&self, verdict: &str) -> Extraction {
        let mut a: Option<ScoreSet> = None;
        let mut b: Option<ScoreSet> = None;
        let mut out_of_range = false;
        let mut open: Option<OpenBlock> = None;

        for located in tokenize(verdict) {
            if let Token::Header(label) = located.token {
                if let Some(prev) = open.take() {
                    tracing::trace!(label = %prev.label, line = located.line, "block cut short by next header");
                }
                open = Some(OpenBlock::new(label));
                continue;
            }

            let Some(block) = open.as_mut() else {
                continue;
            };

            match block.feed(&located.token, self.policy) {
                None => {}
                Some(BlockEnd::Done(scores)) => {
                    let slot = match block.label {
                        Label::A => &mut a,
                        Label::B => &mut b,
                    };
                    if slot.is_none() {
                        *slot = Some(scores);
                    } else {
                        tracing::debug!(label = %block.label, line = located.line, "ignoring repeated score block");
                    }
                    open = None;
                }
                Some(BlockEnd::OutOfRange) => {
                    tracing::debug!(label = %block.label, line = located.line, "score outside rubric range");
                    out_of_range = true;
                    open = None;
                }
                Some(BlockEnd::Broken) => {
                    tracing::trace!(label = %block.label, line = located.line, "malformed score block");
                    open = None;
                }
            }
        }

        match (a, b) {
            (Some(a), Some(b)) => Extraction::Complete { a, b },
            (a, b) => Extraction::Incomplete {
                recovered: [(Label::A, a.is_some()), (Label::B, b.is_some())]
                    .into_iter()
                    .filter_map(|(label, found)| found.then_some(label))
                    .collect(),
                out_of_range,
            },
        }
    }
}

//! Mapping anonymous A/B scores back to the base and fine-tuned models.

use serde::{Deserialize, Serialize};

use crate::assign::Assignment;
use crate::item::{Candidate, Label};
use crate::score::ScoreSet;

/// Output columns, in file order
pub const RESULT_COLUMNS: [&str; 10] = [
    "question",
    "raw_eval",
    "base_clarity",
    "base_accuracy",
    "base_helpfulness",
    "base_relevance",
    "fine_clarity",
    "fine_accuracy",
    "fine_helpfulness",
    "fine_relevance",
];

/// Scores attributed to their true candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Realigned {
    pub base: ScoreSet,
    pub fine: ScoreSet,
}

impl Realigned {
    pub fn get(&self, candidate: Candidate) -> ScoreSet {
        match candidate {
            Candidate::Base => self.base,
            Candidate::Fine => self.fine,
        }
    }
}

/// Invert the assignment: whatever sat behind each label goes back to its owner.
pub fn realign(assignment: &Assignment, a: ScoreSet, b: ScoreSet) -> Realigned {
    let at = |label: Label| match label {
        Label::A => a,
        Label::B => b,
    };
    Realigned {
        base: at(assignment.label_of(Candidate::Base)),
        fine: at(assignment.label_of(Candidate::Fine)),
    }
}

/// One fully-scored item. Field order matches [`RESULT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub question: String,
    /// Judge text kept for auditing
    pub raw_eval: String,
    pub base_clarity: u8,
    pub base_accuracy: u8,
    pub base_helpfulness: u8,
    pub base_relevance: u8,
    pub fine_clarity: u8,
    pub fine_accuracy: u8,
    pub fine_helpfulness: u8,
    pub fine_relevance: u8,
}

impl ResultRow {
    pub fn new(question: impl Into<String>, raw_eval: impl Into<String>, scores: Realigned) -> Self {
        let Realigned { base, fine } = scores;
        Self {
            question: question.into(),
            raw_eval: raw_eval.into(),
            base_clarity: base.clarity,
            base_accuracy: base.accuracy,
            base_helpfulness: base.helpfulness,
            base_relevance: base.relevance,
            fine_clarity: fine.clarity,
            fine_accuracy: fine.accuracy,
            fine_helpfulness: fine.helpfulness,
            fine_relevance: fine.relevance,
        }
    }

    pub fn scores(&self, candidate: Candidate) -> ScoreSet {
        match candidate {
            Candidate::Base => ScoreSet::new(
                self.base_clarity,
                self.base_accuracy,
                self.base_helpfulness,
                self.base_relevance,
            ),
            Candidate::Fine => ScoreSet::new(
                self.fine_clarity,
                self.fine_accuracy,
                self.fine_helpfulness,
                self.fine_relevance,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_behind_b() {
        let assignment = Assignment::with_base_at(0, Label::B);
        let a = ScoreSet::new(5, 5, 5, 5);
        let b = ScoreSet::new(2, 3, 3, 2);

        let row = ResultRow::new("q", "raw", realign(&assignment, a, b));
        assert_eq!(row.fine_clarity, 5);
        assert_eq!(row.base_clarity, 2);
        assert_eq!(row.scores(Candidate::Base), b);
        assert_eq!(row.scores(Candidate::Fine), a);
    }

    #[test]
    fn test_base_behind_a() {
        let assignment = Assignment::with_base_at(3, Label::A);
        let a = ScoreSet::new(4, 4, 3, 4);
        let b = ScoreSet::new(5, 5, 5, 5);

        let realigned = realign(&assignment, a, b);
        assert_eq!(realigned.get(Candidate::Base), a);
        assert_eq!(realigned.get(Candidate::Fine), b);
    }

    #[test]
    fn test_realign_is_an_involution_over_labels() {
        let a = ScoreSet::new(1, 2, 3, 4);
        let b = ScoreSet::new(4, 3, 2, 1);
        let base_a = realign(&Assignment::with_base_at(0, Label::A), a, b);
        let base_b = realign(&Assignment::with_base_at(0, Label::B), b, a);
        assert_eq!(base_a, base_b);
    }
}

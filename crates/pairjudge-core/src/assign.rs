//! Blind A/B assignment.
//!
//! Each item gets an independent fair coin flip deciding whether the base
//! answer is shown to the judge as "Answer A" or "Answer B". The draw only
//! consumes randomness; nothing about the item's content can bias it.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::item::{Candidate, EvaluationItem, Label};

/// Which anonymous label each candidate was given for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub item_index: usize,
    pub label_of_base: Label,
    pub label_of_fine: Label,
}

impl Assignment {
    /// Build an assignment from the label of the base candidate.
    /// The fine candidate always gets the other label.
    pub fn with_base_at(item_index: usize, label_of_base: Label) -> Self {
        Self {
            item_index,
            label_of_base,
            label_of_fine: label_of_base.other(),
        }
    }

    pub fn label_of(&self, candidate: Candidate) -> Label {
        match candidate {
            Candidate::Base => self.label_of_base,
            Candidate::Fine => self.label_of_fine,
        }
    }

    /// Inverse mapping: which candidate sits behind a label
    pub fn candidate_at(&self, label: Label) -> Candidate {
        if self.label_of_base == label {
            Candidate::Base
        } else {
            Candidate::Fine
        }
    }

    /// Answer texts in presentation order `(answer_a, answer_b)`
    pub fn presented<'a>(&self, item: &'a EvaluationItem) -> (&'a str, &'a str) {
        (
            item.answer(self.candidate_at(Label::A)),
            item.answer(self.candidate_at(Label::B)),
        )
    }
}

/// Draws assignments from an injected random source.
pub struct Assigner<R: RngCore = StdRng> {
    rng: R,
}

impl Assigner<StdRng> {
    /// Reproducible assigner for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Assigner seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl<R: RngCore> Assigner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw the assignment for one item.
    pub fn assign(&mut self, item: &EvaluationItem) -> Assignment {
        let label_of_base = if self.rng.gen_bool(0.5) {
            Label::A
        } else {
            Label::B
        };
        Assignment::with_base_at(item.index, label_of_base)
    }

    /// Draw assignments for every item, in input order.
    pub fn assign_all(&mut self, items: &[EvaluationItem]) -> Vec<Assignment> {
        items.iter().map(|item| self.assign(item)).collect()
    }
}

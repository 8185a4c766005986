//! Aggregate statistics over a results file.

use serde::Serialize;

use crate::item::Candidate;
use crate::realign::ResultRow;
use crate::score::Criterion;

/// Mean scores for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionSummary {
    pub criterion: &'static str,
    pub base_mean: f64,
    pub fine_mean: f64,
    /// `fine_mean - base_mean`
    pub delta: f64,
}

/// Head-to-head counts on the summed score, from the fine-tuned model's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Outcomes {
    pub fine_wins: usize,
    pub ties: usize,
    pub base_wins: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub criteria: Vec<CriterionSummary>,
    pub outcomes: Outcomes,
}

impl Summary {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let mean = |candidate: Candidate, criterion: Criterion| {
            if rows.is_empty() {
                return 0.0;
            }
            let total: u64 = rows
                .iter()
                .map(|row| u64::from(row.scores(candidate).get(criterion)))
                .sum();
            total as f64 / rows.len() as f64
        };

        let criteria = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let base_mean = mean(Candidate::Base, criterion);
                let fine_mean = mean(Candidate::Fine, criterion);
                CriterionSummary {
                    criterion: criterion.key(),
                    base_mean,
                    fine_mean,
                    delta: fine_mean - base_mean,
                }
            })
            .collect();

        let mut outcomes = Outcomes::default();
        for row in rows {
            let base = row.scores(Candidate::Base).total();
            let fine = row.scores(Candidate::Fine).total();
            match fine.cmp(&base) {
                std::cmp::Ordering::Greater => outcomes.fine_wins += 1,
                std::cmp::Ordering::Equal => outcomes.ties += 1,
                std::cmp::Ordering::Less => outcomes.base_wins += 1,
            }
        }

        Self {
            rows: rows.len(),
            criteria,
            outcomes,
        }
    }
}

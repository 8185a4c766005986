//! The blind pairwise evaluation pipeline.
//!
//! Per item: assignment -> prompt -> judge verdict -> extraction -> realigned
//! row. Each item is evaluated inside one task, so no state from two items is
//! ever mixed. Assignments for the whole input are drawn up front, which keeps
//! results identical for a given seed no matter how many judge calls run at
//! once or in which order they complete.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::RngCore;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;

use crate::assign::{Assigner, Assignment};
use crate::config::JudgeConfig;
use crate::error::{PairJudgeError, Result};
use crate::extract::{Extraction, ScoreExtractor};
use crate::item::{EvaluationItem, Label};
use crate::judge::{judge_with_retry, JudgeClient, RetryPolicy, Verdict};
use crate::prompt::build_prompt;
use crate::realign::{realign, ResultRow};
use crate::trace_time;

/// What happened to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Scored(ResultRow),
    /// The judge call failed after retries
    JudgeFailed { reason: String },
    /// The verdict lacked a complete block for at least one label
    Unparsed {
        recovered: Vec<Label>,
        out_of_range: bool,
    },
}

/// Counters for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Items in the input
    pub items: usize,
    /// Items whose judge call was made
    pub processed: usize,
    pub rows: usize,
    pub judge_failures: usize,
    pub parse_failures: usize,
    /// Parse failures caused by a score outside the rubric range
    pub out_of_range: usize,
    /// Items never dispatched because the run was interrupted
    pub skipped: usize,
    pub interrupted: bool,
}

/// Rows plus run counters.
///
/// Outcomes may arrive in any order; rows are released strictly in dispatch
/// order, holding back any that arrive ahead of an unfinished item.
#[derive(Debug, Default)]
pub struct Accumulator {
    rows: Vec<ResultRow>,
    /// Finished items waiting on an earlier one; `None` for a dropped item
    pending: BTreeMap<usize, Option<ResultRow>>,
    next: usize,
    stats: RunStats,
}

impl Accumulator {
    pub fn new(items: usize) -> Self {
        Self {
            rows: Vec::with_capacity(items),
            stats: RunStats {
                items,
                ..RunStats::default()
            },
            ..Self::default()
        }
    }

    /// Record the outcome for the item at dispatch position `index`.
    ///
    /// Returns the rows this outcome released, in order. That can be empty
    /// (an earlier item is still running) or include rows of later items that
    /// were waiting on this one.
    pub fn record(&mut self, index: usize, outcome: ItemOutcome) -> &[ResultRow] {
        self.stats.processed += 1;
        let row = match outcome {
            ItemOutcome::Scored(row) => {
                self.stats.rows += 1;
                Some(row)
            }
            ItemOutcome::JudgeFailed { .. } => {
                self.stats.judge_failures += 1;
                None
            }
            ItemOutcome::Unparsed { out_of_range, .. } => {
                self.stats.parse_failures += 1;
                if out_of_range {
                    self.stats.out_of_range += 1;
                }
                None
            }
        };
        self.pending.insert(index, row);

        let released_from = self.rows.len();
        while let Some(row) = self.pending.remove(&self.next) {
            self.rows.extend(row);
            self.next += 1;
        }
        &self.rows[released_from..]
    }

    fn mark_interrupted(&mut self) {
        self.stats.interrupted = true;
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Rows in dispatch order, with final counters
    pub fn into_parts(mut self) -> (Vec<ResultRow>, RunStats) {
        let pending = std::mem::take(&mut self.pending);
        self.rows.extend(pending.into_values().flatten());
        self.stats.skipped = self.stats.items - self.stats.processed;
        (self.rows, self.stats)
    }
}

/// Scores a single item against the judge.
pub struct ItemJudge {
    client: Arc<dyn JudgeClient>,
    system_prompt: String,
    retry: RetryPolicy,
    extractor: ScoreExtractor,
}

impl ItemJudge {
    pub fn new(client: Arc<dyn JudgeClient>, config: &JudgeConfig) -> Self {
        Self {
            client,
            system_prompt: config.system_prompt.clone(),
            retry: config.retry_policy(),
            extractor: ScoreExtractor::new(config.score_policy),
        }
    }

    pub async fn evaluate(&self, item: &EvaluationItem, assignment: &Assignment) -> ItemOutcome {
        let start = Instant::now();
        let (answer_a, answer_b) = assignment.presented(item);
        let prompt = build_prompt(&item.question, answer_a, answer_b);

        let verdict = judge_with_retry(
            self.client.as_ref(),
            &self.system_prompt,
            &prompt,
            &self.retry,
        )
        .await;
        trace_time!(start, "judge_call", item = item.index);

        let raw = match verdict {
            Verdict::Text(raw) => raw,
            Verdict::Failed { reason } => return ItemOutcome::JudgeFailed { reason },
        };

        match self.extractor.extract(&raw) {
            Extraction::Complete { a, b } => {
                ItemOutcome::Scored(ResultRow::new(&item.question, raw, realign(assignment, a, b)))
            }
            Extraction::Incomplete {
                recovered,
                out_of_range,
            } => {
                tracing::debug!(
                    item = item.index,
                    recovered = ?recovered,
                    out_of_range,
                    "verdict missing a complete score block, dropping item"
                );
                ItemOutcome::Unparsed {
                    recovered,
                    out_of_range,
                }
            }
        }
    }
}

/// Runs items through an [`ItemJudge`] with bounded concurrency.
pub struct Pipeline {
    judge: Arc<ItemJudge>,
    concurrency: usize,
}

fn task_failed(err: JoinError) -> PairJudgeError {
    PairJudgeError::Other(format!("judge task failed: {}", err))
}

impl Pipeline {
    pub fn new(client: Arc<dyn JudgeClient>, config: &JudgeConfig) -> Self {
        Self {
            judge: Arc::new(ItemJudge::new(client, config)),
            concurrency: config.concurrency.max(1),
        }
    }

    /// Evaluate every item, calling `on_row` for each row in input order.
    ///
    /// With more than one call in flight, a finished row waits until every
    /// earlier item has finished, so `on_row` sees the same sequence at any
    /// concurrency.
    ///
    /// Setting `interrupt` stops dispatching further items; items already in
    /// flight finish and are recorded.
    pub async fn run<R: RngCore>(
        &self,
        items: Vec<EvaluationItem>,
        assigner: &mut Assigner<R>,
        interrupt: &AtomicBool,
        on_row: &mut dyn FnMut(&ResultRow) -> Result<()>,
    ) -> Result<Accumulator> {
        let start = Instant::now();
        let assignments = assigner.assign_all(&items);
        let mut acc = Accumulator::new(items.len());

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set: JoinSet<(usize, ItemOutcome)> = JoinSet::new();

        for (position, (item, assignment)) in items.into_iter().zip(assignments).enumerate() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| PairJudgeError::Other(format!("worker pool closed: {}", e)))?;

            while let Some(joined) = join_set.try_join_next() {
                let (index, outcome) = joined.map_err(task_failed)?;
                Self::collect(&mut acc, index, outcome, on_row)?;
            }

            if interrupt.load(Ordering::SeqCst) {
                acc.mark_interrupted();
                break;
            }

            let judge = Arc::clone(&self.judge);
            let span = tracing::debug_span!("item", index = item.index);
            join_set.spawn(
                async move {
                    let _permit = permit;
                    let outcome = judge.evaluate(&item, &assignment).await;
                    (position, outcome)
                }
                .instrument(span),
            );
        }

        while let Some(joined) = join_set.join_next().await {
            let (index, outcome) = joined.map_err(task_failed)?;
            Self::collect(&mut acc, index, outcome, on_row)?;
        }

        if interrupt.load(Ordering::SeqCst) {
            acc.mark_interrupted();
        }

        let stats = acc.stats();
        tracing::info!(
            items = stats.items,
            processed = stats.processed,
            rows = stats.rows,
            judge_failures = stats.judge_failures,
            parse_failures = stats.parse_failures,
            interrupted = stats.interrupted,
            elapsed = ?start.elapsed(),
            "evaluation finished"
        );
        Ok(acc)
    }

    fn collect(
        acc: &mut Accumulator,
        index: usize,
        outcome: ItemOutcome,
        on_row: &mut dyn FnMut(&ResultRow) -> Result<()>,
    ) -> Result<()> {
        if let ItemOutcome::JudgeFailed { reason } = &outcome {
            tracing::debug!(item = index, reason = %reason, "judge failed, dropping item");
        }
        for row in acc.record(index, outcome) {
            on_row(row)?;
        }
        Ok(())
    }
}

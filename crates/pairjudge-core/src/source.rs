//! Evaluation items read from a CSV file.

use std::path::Path;

use crate::error::{PairJudgeError, Result};
use crate::item::EvaluationItem;

pub const QUESTION_COLUMN: &str = "question";
pub const BASE_COLUMN: &str = "base_response";
pub const FINE_COLUMN: &str = "finetuned_response";

/// Load items from `path`, stopping after `limit` rows when given.
///
/// Extra columns are ignored. A missing required column or an unreadable
/// record aborts the load.
pub fn load_items(path: &Path, limit: Option<usize>) -> Result<Vec<EvaluationItem>> {
    if !path.exists() {
        return Err(PairJudgeError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| PairJudgeError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let question_idx = column(QUESTION_COLUMN)?;
    let base_idx = column(BASE_COLUMN)?;
    let fine_idx = column(FINE_COLUMN)?;

    let mut items = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        if limit.is_some_and(|limit| idx >= limit) {
            break;
        }
        let record = result.map_err(|e| PairJudgeError::InvalidRecord {
            path: path.to_path_buf(),
            record: idx + 1,
            reason: e.to_string(),
        })?;

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        items.push(EvaluationItem::new(
            idx,
            field(question_idx),
            field(base_idx),
            field(fine_idx),
        ));
    }

    tracing::debug!(path = %path.display(), items = items.len(), "loaded evaluation items");
    Ok(items)
}

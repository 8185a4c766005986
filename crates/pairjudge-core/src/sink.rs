//! Result rows written to a CSV file.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::WriteMode;
use crate::error::{PairJudgeError, Result};
use crate::realign::{ResultRow, RESULT_COLUMNS};

/// Destination for result rows.
///
/// In batch mode nothing touches the file until [`CsvSink::finish`]. In
/// incremental mode the header is written on creation and every row is
/// flushed as it arrives, so an aborted run keeps what it finished.
pub struct CsvSink {
    path: PathBuf,
    mode: WriteMode,
    writer: Option<csv::Writer<File>>,
    written: usize,
}

fn open_writer(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path)
        .map_err(|e| PairJudgeError::io_operation("create output", path.display(), e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(RESULT_COLUMNS)?;
    Ok(writer)
}

impl CsvSink {
    pub fn create(path: &Path, mode: WriteMode) -> Result<Self> {
        let writer = match mode {
            WriteMode::Incremental => Some(open_writer(path)?),
            WriteMode::Batch => None,
        };
        Ok(Self {
            path: path.to_path_buf(),
            mode,
            writer,
            written: 0,
        })
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Called for each row as it is produced
    pub fn on_row(&mut self, row: &ResultRow) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.serialize(row)?;
            writer.flush()?;
            self.written += 1;
        }
        Ok(())
    }

    /// Persist the collected rows (batch mode) and close the file.
    /// Returns the number of rows in the file.
    pub fn finish(mut self, rows: &[ResultRow]) -> Result<usize> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush()?;
            }
            None => {
                let mut writer = open_writer(&self.path)?;
                for row in rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                self.written = rows.len();
            }
        }
        tracing::info!(path = %self.path.display(), rows = self.written, mode = %self.mode, "results saved");
        Ok(self.written)
    }
}

/// Read a results file written by [`CsvSink`]
pub fn read_results(path: &Path) -> Result<Vec<ResultRow>> {
    if !path.exists() {
        return Err(PairJudgeError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let row: ResultRow = result.map_err(|e| PairJudgeError::InvalidRecord {
            path: path.to_path_buf(),
            record: idx + 1,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realign::Realigned;
    use crate::score::ScoreSet;
    use std::fs;
    use tempfile::tempdir;

    fn row(question: &str) -> ResultRow {
        ResultRow::new(
            question,
            "### Evaluation for Answer A:\n- Clarity: 4",
            Realigned {
                base: ScoreSet::new(4, 4, 3, 4),
                fine: ScoreSet::new(5, 5, 5, 5),
            },
        )
    }

    #[test]
    fn test_batch_writes_only_on_finish() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path, WriteMode::Batch).unwrap();
        sink.on_row(&row("q1")).unwrap();
        assert!(!path.exists());

        let written = sink.finish(&[row("q1"), row("q2")]).unwrap();
        assert_eq!(written, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&RESULT_COLUMNS.join(",")));
        assert_eq!(read_results(&path).unwrap(), vec![row("q1"), row("q2")]);
    }

    #[test]
    fn test_incremental_rows_visible_before_finish() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path, WriteMode::Incremental).unwrap();
        sink.on_row(&row("q1")).unwrap();
        assert_eq!(read_results(&path).unwrap(), vec![row("q1")]);

        assert_eq!(sink.finish(&[]).unwrap(), 1);
    }

    #[test]
    fn test_empty_batch_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        CsvSink::create(&path, WriteMode::Batch)
            .unwrap()
            .finish(&[])
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap().trim_end(),
            RESULT_COLUMNS.join(",")
        );
        assert!(read_results(&path).unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = CsvSink::create(&path, WriteMode::Incremental)
            .err()
            .unwrap();
        assert!(err.to_string().contains("create output"));
    }
}

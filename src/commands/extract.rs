//! `pairjudge extract` - parse a saved verdict

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::{Cli, ExtractArgs, OutputFormat};
use pairjudge_core::error::{PairJudgeError, Result};
use pairjudge_core::extract::{Extraction, ScoreExtractor};
use pairjudge_core::item::Label;
use pairjudge_core::score::{Criterion, ScoreSet};

fn read_verdict(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    if !path.exists() {
        return Err(PairJudgeError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path)
        .map_err(|e| PairJudgeError::io_operation("read verdict", path.display(), e))
}

fn score_line(label: Label, scores: &ScoreSet) -> String {
    let fields: Vec<String> = Criterion::ALL
        .iter()
        .map(|&c| format!("{}={}", c.key(), scores.get(c)))
        .collect();
    format!("Answer {}: {}", label, fields.join(" "))
}

pub fn execute(cli: &Cli, args: &ExtractArgs) -> Result<()> {
    let verdict = read_verdict(&args.file)?;
    let extraction = ScoreExtractor::new(args.score_policy).extract(&verdict);

    if cli.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    match &extraction {
        Extraction::Complete { a, b } => {
            println!("{}", score_line(Label::A, a));
            println!("{}", score_line(Label::B, b));
        }
        Extraction::Incomplete {
            recovered,
            out_of_range,
        } => {
            let labels: Vec<String> = recovered.iter().map(|l| l.to_string()).collect();
            println!(
                "incomplete: recovered [{}]{}",
                labels.join(", "),
                if *out_of_range {
                    " (a score was out of range)"
                } else {
                    ""
                }
            );
        }
    }
    Ok(())
}

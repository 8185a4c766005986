//! Tokenizer for judge verdicts.
//!
//! Each line is cut at every label marker (`Answer A:`) and criterion prefix
//! (`- Clarity:`), so a block laid out one criterion per line and a block
//! written inline after its header produce the same token stream.

use crate::item::Label;
use crate::prompt::{criterion_prefix, label_marker};
use crate::score::Criterion;

/// One classified segment of verdict text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Marker introducing the score block for a label
    Header(Label),
    /// `- <Criterion>: <digit>` with exactly one digit
    Score { criterion: Criterion, raw: u8 },
    /// Criterion whose value is missing or not a single digit
    BadScore(Criterion),
    Blank,
    Text,
}

/// A token with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub line: usize,
    pub token: Token,
}

#[derive(Debug, Clone, Copy)]
enum Marker {
    Label(Label),
    Criterion(Criterion),
}

pub fn tokenize(text: &str) -> Vec<Located> {
    text.lines()
        .enumerate()
        .flat_map(|(i, line)| {
            classify(line)
                .into_iter()
                .map(move |token| Located { line: i + 1, token })
        })
        .collect()
}

/// Every marker in `line` as `(start, end, marker)`, in order of appearance
fn markers(line: &str) -> Vec<(usize, usize, Marker)> {
    let labels = Label::ALL
        .iter()
        .map(|&label| (label_marker(label), Marker::Label(label)));
    let criteria = Criterion::ALL
        .iter()
        .map(|&criterion| (criterion_prefix(criterion), Marker::Criterion(criterion)));

    let mut found: Vec<(usize, usize, Marker)> = labels
        .chain(criteria)
        .flat_map(|(pattern, marker)| {
            line.match_indices(pattern.as_str())
                .map(|(start, m)| (start, start + m.len(), marker))
                .collect::<Vec<_>>()
        })
        .collect();
    found.sort_by_key(|(start, ..)| *start);
    found
}

fn classify(line: &str) -> Vec<Token> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return vec![Token::Blank];
    }

    let found = markers(trimmed);
    let Some(&(first, _, first_marker)) = found.first() else {
        return vec![Token::Text];
    };

    let mut tokens = Vec::with_capacity(found.len() + 1);
    // Leading words belong to a header ("### Evaluation for Answer A:")
    if matches!(first_marker, Marker::Criterion(_)) && !trimmed[..first].trim().is_empty() {
        tokens.push(Token::Text);
    }

    for (i, &(_, end, marker)) in found.iter().enumerate() {
        let next = found.get(i + 1).map_or(trimmed.len(), |(start, ..)| *start);
        let rest = &trimmed[end..next];
        match marker {
            Marker::Label(label) => {
                tokens.push(Token::Header(label));
                if !rest.trim().is_empty() {
                    tokens.push(Token::Text);
                }
            }
            Marker::Criterion(criterion) => tokens.push(match single_digit(rest.trim_start()) {
                Some(raw) => Token::Score { criterion, raw },
                None => Token::BadScore(criterion),
            }),
        }
    }
    tokens
}

/// Leading digit of `value` when it is not followed by another digit
fn single_digit(value: &str) -> Option<u8> {
    let mut chars = value.chars();
    let first = chars.next()?.to_digit(10)?;
    match chars.next() {
        Some(c) if c.is_ascii_digit() => None,
        _ => u8::try_from(first).ok(),
    }
}

//! Rubric prompt rendering.
//!
//! The verdict format requested here is the grammar `extract` parses, so both
//! sides build headers and criterion lines from the helpers in this module.

use crate::item::Label;
use crate::score::Criterion;

/// Default system instruction sent alongside the rubric
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert evaluator.";

/// Marker identifying a score block for `label`, e.g. `Answer A:`
pub fn label_marker(label: Label) -> String {
    format!("Answer {}:", label.as_char())
}

/// Section header for a score block, e.g. `### Evaluation for Answer A:`
pub fn block_header(label: Label) -> String {
    format!("### Evaluation for {}", label_marker(label))
}

/// Prefix of a criterion line up to the value, e.g. `- Clarity:`
pub fn criterion_prefix(criterion: Criterion) -> String {
    format!("- {}:", criterion.name())
}

fn format_block(label: Label) -> String {
    let mut block = block_header(label);
    for criterion in Criterion::ALL {
        block.push('\n');
        block.push_str(&criterion_prefix(criterion));
        block.push_str(" #");
    }
    block
}

/// Render the rubric prompt for one anonymized pair.
pub fn build_prompt(question: &str, answer_a: &str, answer_b: &str) -> String {
    let criteria = Criterion::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.name()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a strict, unbiased evaluator for financial question-answering models.

You will be given:
- A real-world financial question
- Two answers (Answer A and Answer B), from two different models

Evaluate each answer using the following criteria (1 to 5):
{criteria}

Be fair, detailed, and objective in your scoring.

---

Question:
{question}

Answer A:
{answer_a}

Answer B:
{answer_b}

Provide your output in **this exact format**:

{block_a}

{block_b}

Then briefly explain your reasoning for the scores.
"#,
        block_a = format_block(Label::A),
        block_b = format_block(Label::B),
    )
}

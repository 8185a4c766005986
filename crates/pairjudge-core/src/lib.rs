//! Pairjudge Core Library
//!
//! Blind pairwise evaluation of a base model against a fine-tuned model,
//! scored by an LLM judge on a fixed four-criterion rubric.

pub mod assign;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod item;
pub mod judge;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod realign;
pub mod score;
pub mod sink;
pub mod source;
pub mod summary;

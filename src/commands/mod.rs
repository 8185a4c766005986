//! CLI commands for pairjudge

pub mod dispatch;
pub mod extract;
pub mod prompt;
pub mod run;
pub mod summarize;

//! `pairjudge prompt` - render the rubric prompt

use serde_json::json;

use crate::cli::{Cli, OutputFormat, PromptArgs};
use pairjudge_core::error::Result;
use pairjudge_core::prompt::{build_prompt, DEFAULT_SYSTEM_PROMPT};

pub fn execute(cli: &Cli, args: &PromptArgs) -> Result<()> {
    let prompt = build_prompt(&args.question, &args.answer_a, &args.answer_b);

    match cli.format {
        OutputFormat::Json => {
            let output = json!({
                "system": DEFAULT_SYSTEM_PROMPT,
                "prompt": prompt,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => println!("{}", prompt),
    }
    Ok(())
}

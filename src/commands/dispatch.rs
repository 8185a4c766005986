//! Command dispatch and exit status reporting

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::commands;
use pairjudge_core::error::{ExitCode as PairJudgeExitCode, PairJudgeError, Result};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => {
            println!("pairjudge {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Blind pairwise LLM-as-judge evaluation.");
            println!();
            println!("Run `pairjudge --help` for usage information.");
            Ok(())
        }
        Some(Commands::Run(args)) => commands::run::execute(cli, args, start),
        Some(Commands::Extract(args)) => commands::extract::execute(cli, args),
        Some(Commands::Prompt(args)) => commands::prompt::execute(cli, args),
        Some(Commands::Summarize(args)) => commands::summarize::execute(cli, args),
    }
}

/// Print a command's error in the selected format and map it to an exit status.
pub fn finish(cli: &Cli, outcome: Result<()>) -> ExitCode {
    let status = match outcome {
        Ok(()) => PairJudgeExitCode::Success,
        Err(err) => {
            match cli.format {
                OutputFormat::Json => eprintln!("{}", err.to_json()),
                OutputFormat::Human if !cli.quiet => eprintln!("error: {}", err),
                OutputFormat::Human => {}
            }
            err.exit_code()
        }
    };
    ExitCode::from(status as u8)
}

/// Handle arguments clap refused.
///
/// `--format` itself may be unparsed at this point, so the raw argv decides
/// whether the failure is reported as a JSON envelope. Help and version output
/// always go through clap.
pub fn reject_args(err: clap::Error) -> ExitCode {
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if informational || !asks_for_json(env::args().skip(1)) {
        err.exit();
    }

    let error = match err.kind() {
        ErrorKind::InvalidValue
        | ErrorKind::ValueValidation
        | ErrorKind::UnknownArgument
        | ErrorKind::InvalidSubcommand
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => PairJudgeError::UsageError(err.to_string()),
        _ => PairJudgeError::Other(err.to_string()),
    };
    eprintln!("{}", error.to_json());
    ExitCode::from(error.exit_code() as u8)
}

/// True when the arguments contain `--format json` or `--format=json`
fn asks_for_json<I>(args: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    let mut after_flag = false;
    args.into_iter().any(|arg| {
        let found = arg == "--format=json" || (after_flag && arg == "json");
        after_flag = arg == "--format";
        found
    })
}

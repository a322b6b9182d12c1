use std::process::ExitCode;

use clap::Parser;

use super::{init_logging, report, HookArgs, Session};
use crate::classify::OutputClassifier;
use crate::console::Console;
use crate::domain::{forwarded_flags, Tool};
use crate::scan::ConfigDirScanner;
use crate::validate::Validator;

/// Entry point of the `*-validate` binaries.
///
/// Only flag-shaped arguments reach the tool; the filenames pre-commit
/// appends are dropped because validation always covers whole directories.
pub fn run(tool: Tool) -> ExitCode {
    let args = HookArgs::parse();
    init_logging();
    let mut console = Console::stdout();

    let session = match Session::prepare(&args) {
        Ok(session) => session,
        Err(e) => return report(&mut console, e),
    };

    let scanner = ConfigDirScanner::new(session.config.extensions_for(tool))
        .with_excludes(session.config.exclude.iter().cloned());
    let validator = Validator::new(tool, scanner, &session.runner, OutputClassifier);
    let flags = forwarded_flags(&args.tool_args);

    match validator.validate_all(&session.root, &flags, &mut console) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => report(&mut console, e),
    }
}

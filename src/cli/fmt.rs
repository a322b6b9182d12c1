use std::process::ExitCode;

use clap::Parser;

use super::{init_logging, report, HookArgs, Session};
use crate::classify::OutputClassifier;
use crate::console::Console;
use crate::domain::Tool;
use crate::format::Formatter;

/// Entry point of the `*-fmt` binaries. Tool arguments pass through unfiltered.
pub fn run(tool: Tool) -> ExitCode {
    let args = HookArgs::parse();
    init_logging();
    let mut console = Console::stdout();

    let session = match Session::prepare(&args) {
        Ok(session) => session,
        Err(e) => return report(&mut console, e),
    };

    let formatter = Formatter::new(tool, &session.runner, OutputClassifier);
    match formatter.format_all(&session.root, &args.tool_args, &mut console) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => report(&mut console, e),
    }
}

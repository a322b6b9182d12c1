pub mod classify;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod format;
pub mod runner;
pub mod scan;
pub mod validate;

pub(crate) mod cli;

pub use domain::Tool;
pub use error::HookError;

use std::process::ExitCode;

/// Run a validate hook: `init` + `validate` in every configuration directory.
///
/// This is the binary entry point. It exists to bridge the `src/bin` crates
/// to the library without exposing `cli` internals. Embedders should use
/// [`validate::Validator`] directly.
pub fn run_validate_hook(tool: Tool) -> ExitCode {
    cli::validate::run(tool)
}

/// Run a fmt hook: check formatting over the tree and rewrite when needed.
pub fn run_fmt_hook(tool: Tool) -> ExitCode {
    cli::fmt::run(tool)
}

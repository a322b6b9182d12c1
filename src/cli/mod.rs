pub mod fmt;
pub mod validate;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use crate::config::Config;
use crate::console::Console;
use crate::error::HookError;
use crate::runner::ProcessRunner;

/// Arguments shared by every hook binary.
///
/// Hook-own options carry a `hook-` prefix so they never shadow a flag meant
/// for the wrapped tool. Everything else is collected verbatim.
#[derive(Debug, Parser)]
#[command(version, about = "Pre-commit hook wrapping OpenTofu/Terraform")]
pub(crate) struct HookArgs {
    /// Path to a KDL config file (default: .tf-hooks.kdl in the working directory)
    #[arg(long = "hook-config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-invocation timeout in seconds, overriding the config file
    #[arg(
        long = "hook-timeout",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Arguments for the wrapped tool (pre-commit also appends filenames here)
    #[arg(
        value_name = "TOOL_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tool_args: Vec<String>,
}

/// Everything a hook needs before it starts invoking the tool.
pub(crate) struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub runner: ProcessRunner,
}

impl Session {
    /// Resolve the working directory, the config and the timeout.
    pub(crate) fn prepare(args: &HookArgs) -> Result<Self, HookError> {
        let root = std::env::current_dir().map_err(HookError::WorkingDirectory)?;
        let config = Config::discover(args.config.as_deref(), &root)?;
        let timeout = args
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.timeout_or_default());
        tracing::debug!(
            root = %root.display(),
            timeout_secs = timeout.as_secs(),
            "hook session ready"
        );
        Ok(Self {
            root,
            config,
            runner: ProcessRunner::new(timeout),
        })
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub(crate) fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Print an error that ended the run and map it to the failure exit code.
///
/// Config problems get a full diagnostic on stderr; the rest are the plain
/// one-line messages hook users expect on stdout.
pub(crate) fn report<W: std::io::Write>(console: &mut Console<W>, err: HookError) -> ExitCode {
    match err {
        HookError::Config(_) => {
            eprintln!("{:?}", miette::Report::new(err));
        }
        HookError::Output(e) => {
            eprintln!("failed to write output: {e}");
        }
        other => {
            if console.line(&other.to_string()).is_err() {
                eprintln!("{other}");
            }
        }
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> HookArgs {
        HookArgs::try_parse_from(std::iter::once("tofu-validate").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_arguments() {
        let args = parse(&[]);
        assert!(args.config.is_none());
        assert!(args.timeout.is_none());
        assert!(args.tool_args.is_empty());
    }

    #[test]
    fn tool_flags_and_filenames_collected_verbatim() {
        let args = parse(&["-no-color", "main.tf", "--json"]);
        assert_eq!(args.tool_args, vec!["-no-color", "main.tf", "--json"]);
    }

    #[test]
    fn hook_options_are_consumed() {
        let args = parse(&["--hook-timeout", "90", "--hook-config", "ci.kdl", "-no-color"]);
        assert_eq!(args.timeout, Some(90));
        assert_eq!(args.config, Some(PathBuf::from("ci.kdl")));
        assert_eq!(args.tool_args, vec!["-no-color"]);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = HookArgs::try_parse_from(["tofu-validate", "--hook-timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn report_prints_tool_missing_message() {
        let mut console = Console::new(Vec::new(), false);
        let code = report(&mut console, HookError::ToolMissing(crate::domain::Tool::Tofu));
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "OpenTofu is not installed or not in PATH.\n"
        );
    }
}

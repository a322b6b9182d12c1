use crate::config::ConfigError;
use crate::domain::Tool;

/// Errors that end a hook run before or outside per-directory work.
///
/// A directory whose `init` or `validate` fails is not an error at this
/// level; it is recorded as a [`crate::validate::StepFailure`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum HookError {
    #[error("{0} is not installed or not in PATH.")]
    #[diagnostic(code(tf_hooks::tool_missing))]
    ToolMissing(Tool),
    #[error("Could not get working directory: {0}")]
    #[diagnostic(code(tf_hooks::working_directory))]
    WorkingDirectory(#[source] std::io::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    #[diagnostic(code(tf_hooks::output))]
    Output(#[from] std::io::Error),
}

//! The fmt hook: check formatting, rewrite files when needed.

use std::io::Write;
use std::path::Path;

use crate::classify::{Classify, OutputClassifier};
use crate::console::Console;
use crate::domain::Tool;
use crate::error::HookError;
use crate::runner::CommandRunner;

/// Exit status of `fmt -check` when the only problem is unformatted files.
const NEEDS_FORMATTING: i32 = 3;

/// How a format run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The check passed; nothing was rewritten.
    AlreadyFormatted,
    /// The check found unformatted files and the rewrite succeeded.
    Reformatted,
    /// The check failed for any reason other than unformatted files; nothing was rewritten.
    CheckFailed { output: String },
    /// The rewriting run failed.
    RewriteFailed { output: String },
}

impl FormatOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            FormatOutcome::AlreadyFormatted | FormatOutcome::Reformatted => 0,
            FormatOutcome::CheckFailed { .. } | FormatOutcome::RewriteFailed { .. } => 1,
        }
    }
}

/// Runs `fmt -check` over a whole tree and rewrites it when the check fails.
pub struct Formatter<R, C = OutputClassifier> {
    tool: Tool,
    runner: R,
    classifier: C,
}

impl<R: CommandRunner, C: Classify> Formatter<R, C> {
    pub fn new(tool: Tool, runner: R, classifier: C) -> Self {
        Self {
            tool,
            runner,
            classifier,
        }
    }

    /// Check and, if needed, format everything under `root`.
    ///
    /// `extra_args` are forwarded unfiltered to both invocations.
    pub fn format_all<W: Write>(
        &self,
        root: &Path,
        extra_args: &[String],
        console: &mut Console<W>,
    ) -> Result<FormatOutcome, HookError> {
        let program = self.tool.program();
        if !self.runner.is_available(program) {
            return Err(HookError::ToolMissing(self.tool));
        }

        let base = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        console.line(&format!(
            "Running {program} fmt recursively in directory: {base}"
        ))?;
        console.progress(&format!("Running {program} fmt..."))?;

        let check = self
            .runner
            .run(root, program, &with_args(self.tool.fmt_check_args(), extra_args));
        console.blank()?;
        if check.succeeded {
            console.success(&format!(
                "All {} files are formatted.",
                self.tool.display_name()
            ))?;
            console.blank()?;
            return Ok(FormatOutcome::AlreadyFormatted);
        }

        // Exit 3 is the "needs formatting" signal. Even then an explicit
        // error block (invalid syntax) means the tree cannot be rewritten.
        let classified = self.classifier.classify(&check.output, false);
        if check.exit_code != Some(NEEDS_FORMATTING) || classified.has_error || check.timed_out {
            tracing::info!(
                root = %root.display(),
                exit_code = ?check.exit_code,
                "format check failed"
            );
            console.error(&format!("Error running {program} fmt:"))?;
            console.step_output(&check.output)?;
            return Ok(FormatOutcome::CheckFailed {
                output: check.output,
            });
        }

        console.warning(&format!(
            "Found unformatted {} files:",
            self.tool.display_name()
        ))?;
        console.step_output(&check.output)?;

        console.progress(&format!("Formatting files with {program} fmt..."))?;
        let rewrite = self
            .runner
            .run(root, program, &with_args(self.tool.fmt_write_args(), extra_args));
        console.blank()?;
        if rewrite.failed() {
            console.error(&format!("Error running {program} fmt:"))?;
            console.step_output(&rewrite.output)?;
            return Ok(FormatOutcome::RewriteFailed {
                output: rewrite.output,
            });
        }

        console.success(&format!(
            "Files formatted successfully with {program} fmt."
        ))?;
        console.blank()?;
        console.flush()?;
        Ok(FormatOutcome::Reformatted)
    }
}

fn with_args(base: &[&str], extra: &[String]) -> Vec<String> {
    base.iter()
        .map(|s| s.to_string())
        .chain(extra.iter().cloned())
        .collect()
}

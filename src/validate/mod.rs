mod summary;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classify::{Classify, OutputClassifier};
use crate::console::Console;
use crate::domain::{Step, Tool};
use crate::error::HookError;
use crate::runner::CommandRunner;
use crate::scan::DirScanner;

/// A directory whose `init` or `validate` step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: Step,
    pub rel_path: String,
    /// Full captured output of the failing step.
    pub output: String,
}

/// Warning blocks reported by one step, kept whether or not the step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub step: Step,
    pub rel_path: String,
    pub blocks: Vec<String>,
}

/// Result of one full validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Directories that were scanned and visited, in order.
    pub directories: Vec<PathBuf>,
    pub failures: Vec<StepFailure>,
    pub warnings: Vec<StepWarning>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// 0 when every directory passed (warnings allowed, or nothing found), 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Drives `init` + `validate` across every configuration directory under a root.
///
/// Directories run strictly one after another: concurrent tool instances in
/// one tree contend for the same lock and plugin cache files. A failing step
/// only ends work on its own directory; the run's verdict is decided once
/// every directory has been tried.
pub struct Validator<S, R, C = OutputClassifier> {
    tool: Tool,
    scanner: S,
    runner: R,
    classifier: C,
}

impl<S, R, C> Validator<S, R, C>
where
    S: DirScanner,
    R: CommandRunner,
    C: Classify,
{
    pub fn new(tool: Tool, scanner: S, runner: R, classifier: C) -> Self {
        Self {
            tool,
            scanner,
            runner,
            classifier,
        }
    }

    /// Validate every configuration directory under `root`.
    ///
    /// `extra_flags` are appended to both steps; callers filter out
    /// positional arguments beforehand. Returns `Err` only when the run
    /// cannot start (tool missing) or the console cannot be written.
    pub fn validate_all<W: Write>(
        &self,
        root: &Path,
        extra_flags: &[String],
        console: &mut Console<W>,
    ) -> Result<RunOutcome, HookError> {
        if !self.runner.is_available(self.tool.program()) {
            return Err(HookError::ToolMissing(self.tool));
        }

        let dirs = self.scanner.find_config_dirs(root);
        tracing::info!(
            root = %root.display(),
            count = dirs.len(),
            "scanned for configuration directories"
        );
        if dirs.is_empty() {
            console.line(&format!(
                "No directories with {} files found.",
                self.tool.display_name()
            ))?;
            return Ok(RunOutcome::default());
        }

        let mut outcome = RunOutcome::default();
        for dir in &dirs {
            let rel_path = display_path(root, dir);
            outcome.directories.push(dir.clone());
            for step in [Step::Init, Step::Validate] {
                if !self.run_step(step, dir, &rel_path, extra_flags, console, &mut outcome)? {
                    tracing::info!(dir = %rel_path, %step, "step failed, skipping directory");
                    break;
                }
            }
        }

        summary::print(self.tool, &outcome, console)?;
        console.flush()?;
        Ok(outcome)
    }

    /// Run one step in `dir`. Returns whether the step passed.
    fn run_step<W: Write>(
        &self,
        step: Step,
        dir: &Path,
        rel_path: &str,
        extra_flags: &[String],
        console: &mut Console<W>,
        outcome: &mut RunOutcome,
    ) -> Result<bool, HookError> {
        let program = self.tool.program();
        console.progress(&format!("Running {program} {step} in: {rel_path}..."))?;

        let result = self.runner.run(dir, program, &step.args(extra_flags));
        console.step_output(&result.output)?;

        let classified = self.classifier.classify(&result.output, result.failed());
        if classified.has_warnings() {
            outcome.warnings.push(StepWarning {
                step,
                rel_path: rel_path.to_string(),
                blocks: classified.warnings,
            });
        }

        // A timeout fails the step even when the partial output looks benign.
        let failed = result.timed_out || classified.has_error;
        if failed {
            outcome.failures.push(StepFailure {
                step,
                rel_path: rel_path.to_string(),
                output: result.output,
            });
        }
        Ok(!failed)
    }
}

/// Path shown to the user: the root's base name joined with the part of
/// `dir` below the root. The root itself shows as its base name.
pub(crate) fn display_path(root: &Path, dir: &Path) -> String {
    let base = root
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| root.to_path_buf());
    match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => base.display().to_string(),
        Ok(rel) => base.join(rel).display().to_string(),
        Err(_) => dir.display().to_string(),
    }
}

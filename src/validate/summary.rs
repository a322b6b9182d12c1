use std::io::Write;

use colored::Color;

use super::{RunOutcome, StepFailure, StepWarning};
use crate::console::{Console, ERROR, ERROR_HEADER, SUCCESS, WARNING, WARNING_HEADER};
use crate::domain::Tool;

/// Warning summary, error summary, then the final status line.
pub(super) fn print<W: Write>(
    tool: Tool,
    outcome: &RunOutcome,
    console: &mut Console<W>,
) -> std::io::Result<()> {
    print_warnings(tool, &outcome.warnings, console)?;
    print_failures(tool, &outcome.failures, console)?;

    let name = tool.display_name();
    if !outcome.failures.is_empty() {
        console.status(
            ERROR,
            &format!(
                "{name} validate failed in {} of {} directories.",
                outcome.failures.len(),
                outcome.directories.len()
            ),
            Color::Red,
        )?;
    } else if !outcome.warnings.is_empty() {
        console.status(
            SUCCESS,
            &format!("{name} validate completed with warnings."),
            Color::Yellow,
        )?;
    } else {
        console.success(&format!(
            "{name} validate completed successfully for all directories."
        ))?;
    }
    console.blank()
}

/// Each record shows only the lines of its warning blocks.
fn print_warnings<W: Write>(
    tool: Tool,
    warnings: &[StepWarning],
    console: &mut Console<W>,
) -> std::io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }
    console.status(WARNING_HEADER, "Warning Summary:", Color::Yellow)?;
    console.blank()?;
    for record in warnings {
        console.status(
            WARNING,
            &format!(
                "{} {} warning in: {}",
                tool.display_name(),
                record.step,
                record.rel_path
            ),
            Color::Yellow,
        )?;
        for block in &record.blocks {
            console.indented(block)?;
        }
        console.blank()?;
    }
    Ok(())
}

/// Each failure shows the full output of the failing step.
fn print_failures<W: Write>(
    tool: Tool,
    failures: &[StepFailure],
    console: &mut Console<W>,
) -> std::io::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    console.status(ERROR_HEADER, "Error Summary:", Color::Red)?;
    console.blank()?;
    for failure in failures {
        console.error(&format!(
            "{} {} failed in: {}",
            tool.display_name(),
            failure.step,
            failure.rel_path
        ))?;
        console.indented(&failure.output)?;
        console.blank()?;
    }
    Ok(())
}

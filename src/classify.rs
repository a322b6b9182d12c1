//! Warning/error classification of captured tool output.
//!
//! The wrapped tools exit non-zero both when a command genuinely fails and
//! when they merely report something benign (a lock file update, files that
//! need formatting). [`classify`] reads the text to tell the two apart.

use std::sync::LazyLock;

use regex::Regex;

/// A line opening a warning block. The optional `│` is the frame tofu and
/// terraform draw around diagnostics when color output is enabled.
static WARNING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s│]*warning:").expect("warning marker is a valid regex")
});

static ERROR_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s│]*error:").expect("error marker is a valid regex")
});

/// Substrings that mark unannotated output of a failed command as a real failure.
const FAILURE_INDICATORS: &[&str] = &["failed", "invalid", "syntax error"];

/// Output of a formatting-only exit mentions this; it suppresses the fallback.
const FORMAT_HINT: &str = "format";

/// Structured view of one command's output.
///
/// `has_error` is true whenever `errors` is non-empty, and also when the
/// exit-code fallback decided that unannotated output was a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedOutput {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub has_error: bool,
}

impl ClassifiedOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Capability to turn captured output into a [`ClassifiedOutput`].
pub trait Classify {
    fn classify(&self, output: &str, command_failed: bool) -> ClassifiedOutput;
}

/// Marker-and-heuristic classifier used by the hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputClassifier;

impl Classify for OutputClassifier {
    fn classify(&self, output: &str, command_failed: bool) -> ClassifiedOutput {
        classify(output, command_failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Warning,
    Error,
}

/// The block currently being accumulated. Warning and error modes are
/// mutually exclusive, so one open block is enough.
struct OpenBlock<'a> {
    kind: BlockKind,
    lines: Vec<&'a str>,
}

/// Split `output` into warning and error blocks.
///
/// A block starts at a line whose first word is `warning:` or `error:`
/// (case-insensitive) and runs through every following non-blank line until
/// the next marker. Lines keep their original text; blank lines are dropped
/// without closing the block. The warning marker is tested first.
///
/// When `command_failed` is set and the text carries no markers at all, the
/// whole trimmed output becomes a single error block if it contains a
/// failure indicator, or if it is non-empty and never mentions formatting.
/// Empty output is never escalated.
pub fn classify(output: &str, command_failed: bool) -> ClassifiedOutput {
    let mut parsed = ClassifiedOutput::default();
    if output.is_empty() && !command_failed {
        return parsed;
    }

    let mut open: Option<OpenBlock<'_>> = None;
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let starts = if WARNING_MARKER.is_match(trimmed) {
            Some(BlockKind::Warning)
        } else if ERROR_MARKER.is_match(trimmed) {
            Some(BlockKind::Error)
        } else {
            None
        };

        match starts {
            Some(kind) => {
                if let Some(block) = open.take() {
                    flush(block, &mut parsed);
                }
                if kind == BlockKind::Error {
                    parsed.has_error = true;
                }
                open = Some(OpenBlock {
                    kind,
                    lines: vec![line],
                });
            }
            None => {
                if let Some(block) = open.as_mut() {
                    block.lines.push(line);
                }
            }
        }
    }
    if let Some(block) = open.take() {
        flush(block, &mut parsed);
    }

    if command_failed && !parsed.has_error && parsed.warnings.is_empty() {
        let lower = output.to_lowercase();
        let trimmed = output.trim();
        let indicated = FAILURE_INDICATORS.iter().any(|i| lower.contains(i));
        let unexplained = !trimmed.is_empty() && !lower.contains(FORMAT_HINT);
        if indicated || unexplained {
            parsed.errors.push(trimmed.to_string());
            parsed.has_error = true;
        }
    }

    parsed
}

fn flush(block: OpenBlock<'_>, parsed: &mut ClassifiedOutput) {
    let text = block.lines.join("\n");
    match block.kind {
        BlockKind::Warning => parsed.warnings.push(text),
        BlockKind::Error => parsed.errors.push(text),
    }
}

//! Terminal presentation: emoji status lines, indented tool output, summaries.

use std::io::{self, Write};

use colored::{Color, Colorize};

pub const RUNNING: &str = "⚙️";
pub const SUCCESS: &str = "👍";
pub const WARNING: &str = "🚧";
pub const ERROR: &str = "💀";
pub const WARNING_HEADER: &str = "⚠️";
pub const ERROR_HEADER: &str = "❗";

const INDENT: &str = "    ";

/// Writer-generic console. Colors are applied only when `color` is set.
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl Console<io::Stdout> {
    /// Console on stdout; color follows the terminal and `NO_COLOR`/`CLICOLOR`.
    pub fn stdout() -> Self {
        let color = colored::control::SHOULD_COLORIZE.should_colorize();
        Console::new(io::stdout(), color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// `<emoji> <text>` with the text colored.
    pub fn status(&mut self, emoji: &str, text: &str, color: Color) -> io::Result<()> {
        let painted = self.paint(text, color);
        writeln!(self.out, "{emoji} {painted}")
    }

    pub fn progress(&mut self, text: &str) -> io::Result<()> {
        self.status(RUNNING, text, Color::Green)
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.status(SUCCESS, text, Color::Green)
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        self.status(WARNING, text, Color::Yellow)
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        self.status(ERROR, text, Color::Red)
    }

    /// Plain line, no decoration.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Every non-blank line of `output` with a 4-space indent.
    pub fn indented(&mut self, output: &str) -> io::Result<()> {
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            writeln!(self.out, "{INDENT}{line}")?;
        }
        Ok(())
    }

    /// Indented step output followed by one separating blank line.
    pub fn step_output(&mut self, output: &str) -> io::Result<()> {
        self.indented(output)?;
        self.blank()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Console<Vec<u8>>) -> io::Result<()>) -> String {
        let mut console = Console::new(Vec::new(), false);
        f(&mut console).unwrap();
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn status_line_is_emoji_then_text() {
        assert_eq!(render(|c| c.success("done")), "👍 done\n");
        assert_eq!(render(|c| c.error("broken")), "💀 broken\n");
    }

    #[test]
    fn indented_drops_blank_lines() {
        let out = render(|c| c.indented("first\n\n   \nsecond\n"));
        assert_eq!(out, "    first\n    second\n");
    }

    #[test]
    fn indented_keeps_inner_whitespace() {
        let out = render(|c| c.indented("  on main.tf line 1:"));
        assert_eq!(out, "      on main.tf line 1:\n");
    }

    #[test]
    fn step_output_ends_with_blank_line() {
        assert_eq!(render(|c| c.step_output("ok")), "    ok\n\n");
        assert_eq!(render(|c| c.step_output("")), "\n");
    }

    #[test]
    fn color_wraps_text_only() {
        colored::control::set_override(true);
        let mut console = Console::new(Vec::new(), true);
        console.warning("careful").unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.starts_with("🚧 \u{1b}["));
        assert!(out.contains("careful"));
    }
}

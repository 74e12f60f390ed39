//! Interactive console capability used by the publisher.
//!
//! Printing and prompting are routed through [`Console`] so a run can be
//! driven by a terminal or by scripted input.

use super::OutputManager;
use std::io::{BufRead, Write};

/// User-facing output and line-oriented input
pub trait Console {
    /// Print a plain line
    fn println(&mut self, message: &str);
    /// Print a success line
    fn success(&mut self, message: &str);
    /// Print a warning line
    fn warn(&mut self, message: &str);
    /// Print an error line
    fn error(&mut self, message: &str);
    /// Print a section header
    fn section(&mut self, title: &str);
    /// Print an indented sub-item
    fn indent(&mut self, message: &str);
    /// Show `prompt` and read one line, without its line terminator.
    /// End of input yields an empty string.
    fn prompt(&mut self, prompt: &str) -> std::io::Result<String>;
}

/// [`Console`] on the process's stdout/stderr/stdin
#[derive(Debug, Clone)]
pub struct TerminalConsole {
    output: OutputManager,
}

impl TerminalConsole {
    /// Create a terminal console
    pub fn new() -> Self {
        Self {
            output: OutputManager::new(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn println(&mut self, message: &str) {
        let _ = self.output.println(message);
    }

    fn success(&mut self, message: &str) {
        let _ = self.output.success(message);
    }

    fn warn(&mut self, message: &str) {
        let _ = self.output.warn(message);
    }

    fn error(&mut self, message: &str) {
        self.output.error(message);
    }

    fn section(&mut self, title: &str) {
        let _ = self.output.section(title);
    }

    fn indent(&mut self, message: &str) {
        let _ = self.output.indent(message);
    }

    fn prompt(&mut self, prompt: &str) -> std::io::Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut input = String::new();
        std::io::stdin().lock().read_line(&mut input)?;
        Ok(strip_line_ending(&input).to_string())
    }
}

/// Drop a trailing `\n` or `\r\n`
pub(crate) fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::strip_line_ending;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("y\n"), "y");
        assert_eq!(strip_line_ending("y\r\n"), "y");
        assert_eq!(strip_line_ending("y"), "y");
        assert_eq!(strip_line_ending(" y \n"), " y ");
        assert_eq!(strip_line_ending(""), "");
    }
}

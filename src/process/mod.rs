//! External process invocation.
//!
//! Commands are typed (program plus argument vector) and never pass through a
//! shell. A failure to spawn is reported the same way as a non-zero exit: as a
//! failed [`StepResult`] carrying the diagnostic text.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// Outcome of one external invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the process exited successfully
    pub succeeded: bool,
    /// Captured standard output (empty for interactive commands)
    pub stdout: String,
    /// Captured standard error, or the spawn error message
    pub stderr: String,
}

impl StepResult {
    /// A successful result with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given stderr
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Best available diagnostic text for a failure
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    /// Program to execute
    pub program: OsString,
    /// Arguments, passed verbatim
    pub args: Vec<OsString>,
    /// Inherit the terminal instead of capturing output
    pub interactive: bool,
}

impl ExternalCommand {
    /// Create a command with no arguments
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            interactive: false,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Let the child talk to the terminal directly
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Whether any argument equals `needle`
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands on behalf of the publisher
pub trait CommandRunner {
    /// Run `command` in `cwd`, blocking until it exits
    fn run(&mut self, command: &ExternalCommand, cwd: &Path) -> StepResult;
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ExternalCommand, cwd: &Path) -> StepResult {
        log::debug!("Running `{}` in {}", command, cwd.display());

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).current_dir(cwd).stdin(Stdio::inherit());

        if command.interactive {
            return match cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit()).status() {
                Ok(status) => {
                    log::debug!("`{}` exited with {}", command, status);
                    StepResult {
                        succeeded: status.success(),
                        stdout: String::new(),
                        stderr: if status.success() {
                            String::new()
                        } else {
                            format!("`{}` exited with {}", command, status)
                        },
                    }
                }
                Err(e) => StepResult::failure(format!("Failed to execute `{}`: {}", command, e)),
            };
        }

        match cmd.output() {
            Ok(output) => {
                let result = StepResult {
                    succeeded: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };
                log::debug!(
                    "`{}` exited with {} ({} bytes stdout, {} bytes stderr)",
                    command,
                    output.status,
                    result.stdout.len(),
                    result.stderr.len()
                );
                result
            }
            Err(e) => StepResult::failure(format!("Failed to execute `{}`: {}", command, e)),
        }
    }
}

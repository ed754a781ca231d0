//! Subprocess execution behind a mockable trait
//!
//! git and npm are both driven through [`CommandRunner`], so tests can
//! simulate a process that cannot be spawned (`Err`) separately from one
//! that runs and exits non-zero (`Ok` with `success == false`).

use std::path::Path;
use std::process::Command;

/// Captured result of a finished process
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command line that was executed
    pub command: String,
    /// Whether the process exited successfully
    pub success: bool,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(command: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output
    pub fn failure(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Attach standard output, e.g. to a failed output that still printed a report
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }
}

/// Render a program and its arguments as one display string
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trait for running a command in a directory and waiting for it
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` in `working_dir`; `Err` means it could not be spawned
    fn run(&self, program: &str, args: &[&str], working_dir: &Path)
        -> std::io::Result<CommandOutput>;
}

/// Runner that executes real processes
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Create a new system command runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> std::io::Result<CommandOutput> {
        let command = command_line(program, args);
        log::debug!("Executing `{}` in {}", command, working_dir.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .output()?;

        Ok(CommandOutput {
            command,
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

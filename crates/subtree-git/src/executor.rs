//! Blocking subprocess execution with captured output

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or `None` when the process was terminated by a signal
    /// or could not be started.
    pub status: Option<i32>,
}

impl CommandOutput {
    /// Output of a command that exited with status 0.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    /// Output of a command that exited with `code` and wrote `stderr`.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status: Some(code),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external commands.
///
/// `command[0]` is the program, the rest are its arguments. Implementations
/// must block until the command finishes and must not treat a non-zero exit
/// status as an error.
pub trait CommandRunner {
    /// Run `command`, logging at `info` when `verbose` and at `debug` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error only when the command could not be started.
    fn run(&self, command: &[&str], verbose: bool) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &[&str], verbose: bool) -> Result<CommandOutput> {
        (**self).run(command, verbose)
    }
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    working_dir: Option<PathBuf>,
}

impl ProcessExecutor {
    /// Executor that runs commands in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor that runs every command inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

impl CommandRunner for ProcessExecutor {
    fn run(&self, command: &[&str], verbose: bool) -> Result<CommandOutput> {
        let (program, args) = command.split_first().ok_or(Error::EmptyCommand)?;
        let line = command.join(" ");

        if verbose {
            tracing::info!(command = %line, "Running command");
        } else {
            tracing::debug!(command = %line, "Running command");
        }

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| Error::Spawn {
            program: (*program).to_string(),
            source,
        })?;

        let captured = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };
        log_output(&line, &captured, verbose);

        Ok(captured)
    }
}

/// git writes progress to stderr, so stderr only escalates to `warn` when the
/// command actually failed.
fn log_output(line: &str, output: &CommandOutput, verbose: bool) {
    let stdout = output.stdout.trim_end();
    let stderr = output.stderr.trim_end();

    if !stdout.is_empty() {
        if verbose {
            tracing::info!(command = %line, "{stdout}");
        } else {
            tracing::debug!(command = %line, "{stdout}");
        }
    }

    if output.success() {
        if !stderr.is_empty() {
            if verbose {
                tracing::info!(command = %line, "{stderr}");
            } else {
                tracing::debug!(command = %line, "{stderr}");
            }
        }
    } else {
        tracing::warn!(
            command = %line,
            status = ?output.status,
            stderr = %stderr,
            "Command exited unsuccessfully"
        );
    }
}

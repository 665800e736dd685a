//! External command execution for reposync.
//!
//! Provides a safe wrapper around subprocess invocation with captured
//! stdout/stderr and structured error handling. All external commands
//! (git, git-lfs, the browser opener) go through the [`CommandRunner`]
//! trait so higher layers never depend on a concrete process-spawning
//! mechanism and tests can substitute a scripted recording stub.

use crate::error::{Result, SyncError};
use std::path::Path;
use std::process::{Command, Output};

/// Result of one external command invocation.
///
/// Non-zero exits are returned here rather than as errors so callers can
/// tolerate specific codes (the remote lookup treats exit 1 as "not
/// configured"). Use [`run_checked`] when any non-zero exit is fatal.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
    /// Process exit code (-1 if terminated by signal).
    pub code: i32,
}

impl ExecOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            code: output.status.code().unwrap_or(-1),
        }
    }

    /// Returns true if the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }

    /// The error text for a failed command: stderr if present, else stdout.
    pub fn error_text(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Abstract command executor.
///
/// Exactly one production implementation exists ([`ProcessRunner`]); tests
/// use `test_support::ScriptedRunner`, which records calls and replays
/// scripted outputs without spawning anything.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, blocking until it terminates.
    ///
    /// Returns `Err(SyncError::Spawn)` only when the process could not be
    /// started; a non-zero exit is reported through [`ExecOutput::code`].
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<ExecOutput>;
}

/// Run a command and treat any non-zero exit as fatal.
///
/// The returned error names the full command line, the exit code, and the
/// captured output, so a failed run can be diagnosed and re-run by hand.
pub fn run_checked(
    runner: &dyn CommandRunner,
    cwd: &Path,
    program: &str,
    args: &[&str],
) -> Result<ExecOutput> {
    let output = runner.run(cwd, program, args)?;
    if output.success() {
        Ok(output)
    } else {
        Err(SyncError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            code: output.code,
            output: output.error_text().to_string(),
        })
    }
}

/// Production [`CommandRunner`] that spawns real OS processes.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<ExecOutput> {
        let output = Command::new(program)
            .current_dir(cwd)
            .args(args)
            .output()
            .map_err(|e| SyncError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        Ok(ExecOutput::from_output(&output))
    }
}

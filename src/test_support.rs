use crate::error::Result;
use crate::exec::{CommandRunner, ExecOutput};
use crate::repo::{RepoPath, Remote};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// One recorded invocation made through a [`ScriptedRunner`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Test [`CommandRunner`] that records every call and replays a scripted
/// sequence of outputs, without spawning anything. Panics if more calls are
/// made than outputs were scripted, which keeps command-sequence assertions
/// honest.
pub(crate) struct ScriptedRunner {
    calls: RefCell<Vec<RecordedCall>>,
    responses: RefCell<VecDeque<ExecOutput>>,
}

impl ScriptedRunner {
    pub(crate) fn new(responses: Vec<ExecOutput>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            responses: RefCell::new(responses.into()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Assert the exact sequence of `(program, args)` calls made so far.
    pub(crate) fn assert_calls(&self, expected: &[(&str, &[&str])]) {
        let calls = self.calls.borrow();
        let got: Vec<(String, Vec<String>)> = calls
            .iter()
            .map(|c| (c.program.clone(), c.args.clone()))
            .collect();
        let want: Vec<(String, Vec<String>)> = expected
            .iter()
            .map(|(p, a)| (p.to_string(), a.iter().map(|s| s.to_string()).collect()))
            .collect();
        assert_eq!(got, want);
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<ExecOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        });
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted call: {} {}", program, args.join(" ")));
        Ok(response)
    }
}

/// A successful [`ExecOutput`] with the given stdout.
pub(crate) fn ok(stdout: &str) -> ExecOutput {
    ExecOutput {
        stdout: stdout.to_string(),
        stderr: String::new(),
        code: 0,
    }
}

/// A failed [`ExecOutput`] with the given exit code and stderr.
pub(crate) fn exit(code: i32, stderr: &str) -> ExecOutput {
    ExecOutput {
        stdout: String::new(),
        stderr: stderr.to_string(),
        code,
    }
}

pub(crate) fn stub_remote() -> Remote {
    Remote::new("my-remote", RepoPath::parse("org/repo").unwrap())
}

/// Create a real git repository in a temp directory, with one commit on
/// `main`, for tests that exercise the production `ProcessRunner`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

//! Git operations for the sync engine.
//!
//! Every operation goes through the injected [`CommandRunner`], takes the
//! working directory as an explicit argument, and never composes shell
//! syntax: each git invocation is one program plus an explicit argument list.

pub mod tags;

use crate::error::{Result, SyncError};
use crate::exec::{run_checked, CommandRunner};
use crate::repo::{Branch, Remote};
use chrono::{DateTime, Local};
use std::path::Path;

/// Check whether the working tree is clean.
///
/// Runs `git status --porcelain`; empty output means no uncommitted changes.
pub fn working_tree_is_clean(runner: &dyn CommandRunner, cwd: &Path) -> Result<bool> {
    let output = run_checked(runner, cwd, "git", &["status", "--porcelain"])?;
    Ok(output.is_empty())
}

/// Check whether a remote is already configured in the working directory.
///
/// Runs `git config remote.<name>.url`. Exit code 1 means the key is not
/// set, which is the normal "not configured" signal, not an error; any
/// other non-zero exit propagates. Empty output also counts as absent.
pub fn has_remote(runner: &dyn CommandRunner, cwd: &Path, remote: &Remote) -> Result<bool> {
    let key = format!("remote.{}.url", remote.name);
    let output = runner.run(cwd, "git", &["config", &key])?;

    match output.code {
        0 => Ok(!output.is_empty()),
        1 => Ok(false),
        code => Err(SyncError::CommandFailed {
            command: format!("git config {}", key),
            code,
            output: output.error_text().to_string(),
        }),
    }
}

/// Add a remote pointing at the repository's SSH URL.
pub fn add_remote(runner: &dyn CommandRunner, cwd: &Path, remote: &Remote) -> Result<()> {
    let url = remote.repo.ssh_url();
    run_checked(runner, cwd, "git", &["remote", "add", &remote.name, &url])?;
    println!("Added remote `{}` for `{}`", remote.name, remote.repo);
    Ok(())
}

/// Ensure a remote is configured, adding it if missing.
///
/// Idempotent: running twice leaves the configuration unchanged and issues
/// at most one add per missing remote.
pub fn ensure_remote(runner: &dyn CommandRunner, cwd: &Path, remote: &Remote) -> Result<()> {
    if !has_remote(runner, cwd, remote)? {
        add_remote(runner, cwd, remote)?;
    }
    Ok(())
}

/// Fetch a remote, including any LFS content.
pub fn fetch(runner: &dyn CommandRunner, cwd: &Path, remote: &Remote) -> Result<()> {
    println!("Fetching `{}`", remote.name);
    run_checked(runner, cwd, "git", &["fetch", &remote.name])?;
    run_checked(runner, cwd, "git", &["lfs", "fetch", &remote.name, "--all"])?;
    Ok(())
}

/// Create the timestamped sync branch from the private remote's main branch.
///
/// The branch name is `sync/<timestamp>` with the timestamp formatted as
/// `%Y%m%d-%H%M%S`, e.g. `sync/20230106-013202`. The instant is supplied by
/// the caller so branch naming is deterministic under test; the CLI boundary
/// passes `Local::now()`.
pub fn create_sync_branch(
    runner: &dyn CommandRunner,
    cwd: &Path,
    private_remote: &Remote,
    now: DateTime<Local>,
) -> Result<Branch> {
    let branch_name = format!("sync/{}", now.format("%Y%m%d-%H%M%S"));
    let start_point = format!("{}/main", private_remote.name);

    println!("Creating sync branch `{}` from `{}`", branch_name, start_point);
    run_checked(runner, cwd, "git", &["branch", &branch_name, &start_point])?;

    Ok(Branch::new(branch_name))
}

/// Push a branch to a remote, including LFS content.
pub fn push_branch(
    runner: &dyn CommandRunner,
    cwd: &Path,
    branch: &Branch,
    remote: &Remote,
) -> Result<()> {
    println!("Pushing `{}` to `{}`", branch.name, remote.name);
    run_checked(runner, cwd, "git", &["push", &remote.name, &branch.name])?;
    run_checked(runner, cwd, "git", &["lfs", "push", &remote.name, "--all"])?;
    Ok(())
}

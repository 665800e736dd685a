//! The sync orchestrator.
//!
//! Sequences a full private-to-public sync run: precondition check, remote
//! setup, fetch, branch creation, branch push, tag push, PR URL. Strictly
//! sequential and single-threaded; each external command blocks until the
//! subprocess terminates. Any step's failure aborts the remaining steps with
//! no retry and no rollback — a partially created branch or remote is left
//! as-is for a human to inspect and re-run under a clean working tree.

use crate::error::{Result, SyncError};
use crate::exec::CommandRunner;
use crate::git::{self, tags::TagFilter};
use crate::repo::{RepoPath, Remote};
use chrono::{DateTime, Local};
use std::path::Path;

/// Local alias for the public remote.
pub const PUBLIC_REMOTE_NAME: &str = "public-repo";
/// Local alias for the private remote.
pub const PRIVATE_REMOTE_NAME: &str = "private-repo";

const PR_TITLE: &str = "Sync public repo from private repository";

/// Inputs for one sync run, pre-validated by the CLI layer.
///
/// The instant is captured at the boundary so everything below it is
/// deterministic under test.
pub struct SyncRequest<'a> {
    pub working_directory: &'a Path,
    pub public_repo: RepoPath,
    pub private_repo: RepoPath,
    pub tag_filter: TagFilter,
    pub now: DateTime<Local>,
}

/// Run a full sync and return the pull-request URL.
///
/// Step order: clean-tree check, ensure both remotes, fetch private (incl.
/// LFS), create the timestamped sync branch from `private-repo/main`, push
/// it (incl. LFS) to the public remote, push the filtered release tags,
/// then build the compare URL.
pub fn run_sync(runner: &dyn CommandRunner, request: &SyncRequest) -> Result<String> {
    let cwd = request.working_directory;

    if !git::working_tree_is_clean(runner, cwd)? {
        return Err(SyncError::DirtyWorkingTree);
    }

    let public_remote = Remote::new(PUBLIC_REMOTE_NAME, request.public_repo.clone());
    git::ensure_remote(runner, cwd, &public_remote)?;

    let private_remote = Remote::new(PRIVATE_REMOTE_NAME, request.private_repo.clone());
    git::ensure_remote(runner, cwd, &private_remote)?;

    git::fetch(runner, cwd, &private_remote)?;

    let branch = git::create_sync_branch(runner, cwd, &private_remote, request.now)?;

    git::push_branch(runner, cwd, &branch, &public_remote)?;

    git::tags::push_release_tags(runner, cwd, &public_remote, &request.tag_filter)?;

    Ok(pull_request_url(&public_remote.repo, &branch.name))
}

/// Build the GitHub compare URL that pre-fills a pull request for the
/// sync branch, with the title and body percent-encoded.
fn pull_request_url(public_repo: &RepoPath, branch_name: &str) -> String {
    let body = format!(
        "This PR proposes the latest changes from the private repository, on branch {}.",
        branch_name
    );
    format!(
        "https://github.com/{}/compare/{}?quick_pull=1&title={}&body={}",
        public_repo,
        branch_name,
        form_encode(PR_TITLE),
        form_encode(&body)
    )
}

/// Form-style percent-encoding: spaces become `+`, unreserved bytes pass
/// through, everything else becomes `%XX`.
fn form_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b' ' => out.push('+'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

//! Error types for the reposync CLI.
//!
//! Uses thiserror for derive macros. Every failure carries enough context
//! (command, arguments, exit code, captured output) for a human to diagnose
//! and re-run manually; there are no retries and no rollback anywhere.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for reposync operations.
///
/// Each variant maps to a specific exit code via [`SyncError::exit_code`].
#[derive(Error, Debug)]
pub enum SyncError {
    /// User provided invalid arguments or pointed at a non-directory.
    #[error("{0}")]
    UserError(String),

    /// A repository path did not match the `organization/repository` format.
    #[error(
        "invalid github repository path `{0}`: expected `organization/repository`, \
         e.g. `minvws/nl-covid19-coronacheck-app-ios`"
    )]
    InvalidRepoPath(String),

    /// A tag include/exclude pattern failed to compile.
    #[error("invalid tag pattern `{pattern}`: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },

    /// The working tree has uncommitted changes. Nothing was attempted.
    #[error(
        "the working directory contains changes.\n\
         To avoid losing work, reposync only runs against a clean directory.\n\
         Commit any work to the current branch, and try again."
    )]
    DirtyWorkingTree,

    /// An external process could not be started at all.
    #[error("failed to execute {program}: {source} (is it installed?)")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// An external command ran but exited with a non-zero status.
    #[error("`{command}` failed (exit code {code}): {output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    /// One or more individual tag pushes failed; the rest were still attempted.
    #[error("failed to push {} tag(s): {}", refs.len(), refs.join(", "))]
    TagPushFailed { refs: Vec<String> },
}

impl SyncError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::UserError(_)
            | SyncError::InvalidRepoPath(_)
            | SyncError::BadPattern { .. } => exit_codes::USER_ERROR,
            SyncError::DirtyWorkingTree => exit_codes::DIRTY_TREE,
            SyncError::Spawn { .. }
            | SyncError::CommandFailed { .. }
            | SyncError::TagPushFailed { .. } => exit_codes::COMMAND_FAILURE,
        }
    }
}

/// Result type alias for reposync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

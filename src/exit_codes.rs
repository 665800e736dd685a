//! Exit code constants for the reposync CLI.
//!
//! - 0: Success
//! - 1: User error (bad arguments, invalid repository path)
//! - 2: Dirty working tree (precondition failure)
//! - 3: External command failure (git, git-lfs)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid repository path, or malformed pattern.
pub const USER_ERROR: i32 = 1;

/// The working tree has uncommitted changes; nothing was attempted.
pub const DIRTY_TREE: i32 = 2;

/// An external command failed: fetch, push, branch creation, or a pipeline stage.
pub const COMMAND_FAILURE: i32 = 3;

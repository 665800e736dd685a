//! Command implementations for reposync.
//!
//! Routes CLI commands to their implementations. Everything here is thin
//! plumbing around the sync engine: input validation, clock capture, and
//! output. The engine itself lives in `sync`, `git`, and `exec`.

mod sync_repo;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::SyncRepo(args) => sync_repo::cmd_sync_repo(args),
    }
}

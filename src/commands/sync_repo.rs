//! The `sync-repo` command.

use crate::cli::SyncRepoArgs;
use crate::error::{Result, SyncError};
use crate::exec::{CommandRunner, ProcessRunner};
use crate::git::tags::TagFilter;
use crate::repo::RepoPath;
use crate::sync::{run_sync, SyncRequest};
use chrono::Local;

/// Run a full private-to-public sync.
///
/// Validates the inputs, captures the wall clock once, hands everything to
/// the orchestrator, and prints the resulting pull-request URL.
pub fn cmd_sync_repo(args: SyncRepoArgs) -> Result<()> {
    if !args.working_directory.is_dir() {
        return Err(SyncError::UserError(format!(
            "no directory exists at {}",
            args.working_directory.display()
        )));
    }

    let public_repo = RepoPath::parse(&args.public_github_path)?;
    let private_repo = RepoPath::parse(&args.private_github_path)?;
    let tag_filter = TagFilter::new(&args.match_tags, args.exclude_tag.as_deref())?;

    let runner = ProcessRunner;
    let request = SyncRequest {
        working_directory: &args.working_directory,
        public_repo,
        private_repo,
        tag_filter,
        // The one place wall-clock time enters the system.
        now: Local::now(),
    };

    let url = run_sync(&runner, &request)?;

    println!("Done. Open a pull request for the sync branch:");
    println!("{}", url);

    if args.open {
        open_in_browser(&runner, &args, &url);
    }

    Ok(())
}

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Best effort: a browser that fails to open should not fail the sync.
fn open_in_browser(runner: &dyn CommandRunner, args: &SyncRepoArgs, url: &str) {
    match runner.run(&args.working_directory, OPENER, &[url]) {
        Ok(output) if output.success() => {}
        Ok(output) => eprintln!(
            "warning: could not open browser (exit code {}): {}",
            output.code,
            output.error_text()
        ),
        Err(err) => eprintln!("warning: could not open browser: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(working_directory: PathBuf) -> SyncRepoArgs {
        SyncRepoArgs {
            public_github_path: "org/repo".to_string(),
            private_github_path: "org/repo-private".to_string(),
            match_tags: Vec::new(),
            exclude_tag: None,
            open: false,
            working_directory,
        }
    }

    #[test]
    fn missing_working_directory_is_a_user_error() {
        let err = cmd_sync_repo(args(PathBuf::from("/no/such/directory"))).unwrap_err();
        assert!(matches!(err, SyncError::UserError(_)));
        assert!(err.to_string().contains("/no/such/directory"));
    }

    #[test]
    fn invalid_repo_path_fails_before_any_git_command() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut bad = args(temp_dir.path().to_path_buf());
        bad.public_github_path = "not-a-repo-path".to_string();

        let err = cmd_sync_repo(bad).unwrap_err();
        assert!(matches!(err, SyncError::InvalidRepoPath(_)));
    }
}

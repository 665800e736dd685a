//! CLI argument parsing for reposync.
//!
//! Uses clap derive macros for declarative argument definitions. This module
//! defines the command structure; implementations are in `commands`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tools for syncing work between copies of a git repository.
#[derive(Parser, Debug)]
#[command(name = "reposync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for reposync.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sync the changes from a private repository to a public repository.
    ///
    /// For when a development team works on the repository in a private fork
    /// (for reasons of compliance with existing processes) and wants to share
    /// its work: fetches the private remote, pushes a timestamped sync branch
    /// and the filtered release tags to the public remote, and prints a
    /// pull-request URL.
    SyncRepo(SyncRepoArgs),
}

/// Arguments for the `sync-repo` command.
#[derive(Args, Debug)]
pub struct SyncRepoArgs {
    /// The github path of the public repo, e.g. `minvws/nl-covid19-coronacheck-app-ios`
    #[arg(long, value_name = "path")]
    pub public_github_path: String,

    /// The github path of the private repo, e.g. `minvws/nl-covid19-coronacheck-app-ios-private`
    #[arg(long, value_name = "path")]
    pub private_github_path: String,

    /// Only push tags matching this pattern (repeatable; all tags when omitted)
    #[arg(long = "match-tag", value_name = "pattern")]
    pub match_tags: Vec<String>,

    /// Skip tags matching this pattern
    #[arg(long = "exclude-tag", value_name = "pattern", allow_hyphen_values = true)]
    pub exclude_tag: Option<String>,

    /// Open the pull-request URL in the default browser
    #[arg(long)]
    pub open: bool,

    /// The working directory containing the checkout to sync from
    pub working_directory: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

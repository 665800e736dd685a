//! Data model for the sync engine: repository identities, remotes, branches.

use crate::error::{Result, SyncError};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Matches `organization/repository`: exactly two segments of word
/// characters and hyphens, one separator, nothing else.
static REPO_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w-]+)/([\w-]+)$").expect("repo path regex is valid"));

/// A github repository path, e.g. `minvws/nl-covid19-coronacheck-app-ios`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    organization: String,
    repository: String,
}

impl RepoPath {
    /// Parse a user-supplied `organization/repository` string.
    ///
    /// Fails with [`SyncError::InvalidRepoPath`] on extra segments, invalid
    /// characters, or a missing separator.
    pub fn parse(path: &str) -> Result<Self> {
        let captures = REPO_PATH_RE
            .captures(path)
            .ok_or_else(|| SyncError::InvalidRepoPath(path.to_string()))?;

        Ok(Self {
            organization: captures[1].to_string(),
            repository: captures[2].to_string(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The SSH-style clone URL used when adding the remote.
    pub fn ssh_url(&self) -> String {
        format!("git@github.com:{}/{}", self.organization, self.repository)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

/// A git remote: a local alias for another copy of the repository.
///
/// The name (e.g. `public-repo`) is chosen per sync run, not assigned by git.
#[derive(Debug, Clone)]
pub struct Remote {
    pub name: String,
    pub repo: RepoPath,
}

impl Remote {
    pub fn new(name: impl Into<String>, repo: RepoPath) -> Self {
        Self {
            name: name.into(),
            repo,
        }
    }
}

/// A git branch, created once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_paths() {
        let repo = RepoPath::parse("minvws/nl-covid19-coronacheck-app-ios").unwrap();
        assert_eq!(repo.organization(), "minvws");
        assert_eq!(repo.repository(), "nl-covid19-coronacheck-app-ios");
        assert_eq!(repo.to_string(), "minvws/nl-covid19-coronacheck-app-ios");
    }

    #[test]
    fn parse_accepts_underscores_and_digits() {
        let repo = RepoPath::parse("org_1/repo_2").unwrap();
        assert_eq!(repo.to_string(), "org_1/repo_2");
    }

    #[test]
    fn parse_round_trips_via_display() {
        for path in ["org/repo", "a/b", "some-org/some-repo-name"] {
            let repo = RepoPath::parse(path).unwrap();
            assert_eq!(repo.to_string(), path);
        }
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        for path in [
            "",
            "org",
            "org/",
            "/repo",
            "org/repo/extra",
            "org repo",
            "org/re po",
            "org/repo!",
            "org\\repo",
            "org/repo\n",
        ] {
            let err = RepoPath::parse(path).unwrap_err();
            assert!(
                matches!(err, SyncError::InvalidRepoPath(_)),
                "expected InvalidRepoPath for {:?}",
                path
            );
        }
    }

    #[test]
    fn ssh_url_format() {
        let repo = RepoPath::parse("org/repo").unwrap();
        assert_eq!(repo.ssh_url(), "git@github.com:org/repo");
    }
}

//! Release-tag selection and pushing.
//!
//! Selects exactly the tags that exist locally, are absent from the target
//! remote, match at least one include pattern (if any are given), and do not
//! match the optional exclude pattern. The selection is an ordered pipeline
//! of line-oriented stages composed in-process; every subprocess is invoked
//! with an explicit argument list, never interpolated shell syntax.

use crate::error::{Result, SyncError};
use crate::exec::{run_checked, CommandRunner};
use crate::repo::Remote;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Compiled include/exclude patterns for tag selection.
///
/// Patterns are regex fragments matched against whole `<hash> refs/tags/<name>`
/// lines, mirroring grep. An empty include list passes everything through.
#[derive(Debug)]
pub struct TagFilter {
    include: Vec<Regex>,
    exclude: Option<Regex>,
}

impl TagFilter {
    pub fn new(include_patterns: &[String], exclude_pattern: Option<&str>) -> Result<Self> {
        let include = include_patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;
        let exclude = exclude_pattern.map(compile).transpose()?;
        Ok(Self { include, exclude })
    }

    /// Stage 3: keep lines matching at least one include pattern.
    /// No patterns means pass-through, not "exclude everything".
    fn apply_include<'a>(&self, lines: Vec<&'a str>) -> Vec<&'a str> {
        if self.include.is_empty() {
            return lines;
        }
        lines
            .into_iter()
            .filter(|line| self.include.iter().any(|re| re.is_match(line)))
            .collect()
    }

    /// Stage 4: drop lines matching the exclude pattern.
    fn apply_exclude<'a>(&self, lines: Vec<&'a str>) -> Vec<&'a str> {
        match &self.exclude {
            Some(re) => lines.into_iter().filter(|line| !re.is_match(line)).collect(),
            None => lines,
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| SyncError::BadPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Stage 1: enumerate local tag refs as `<hash> refs/tags/<name>` lines.
///
/// `git show-ref --tags` exits 1 with empty output when the repository has
/// no tags at all; that is an empty pipeline, not an error.
fn local_tag_lines(runner: &dyn CommandRunner, cwd: &Path) -> Result<Vec<String>> {
    let output = runner.run(cwd, "git", &["show-ref", "--tags"])?;

    match output.code {
        0 => Ok(output.lines().into_iter().map(String::from).collect()),
        1 if output.is_empty() => Ok(Vec::new()),
        code => Err(SyncError::CommandFailed {
            command: "git show-ref --tags".to_string(),
            code,
            output: output.error_text().to_string(),
        }),
    }
}

/// The set of tag refs already present on the remote.
///
/// `git ls-remote --tags` lists `<hash>\t<ref>` lines; peeled annotated-tag
/// entries (suffix `^{}`) are skipped.
fn remote_tag_refs(
    runner: &dyn CommandRunner,
    cwd: &Path,
    remote: &Remote,
) -> Result<HashSet<String>> {
    let output = run_checked(runner, cwd, "git", &["ls-remote", "--tags", &remote.name])?;

    Ok(output
        .lines()
        .into_iter()
        .filter_map(|line| line.split('\t').nth(1))
        .filter(|r| !r.ends_with("^{}"))
        .map(String::from)
        .collect())
}

/// Stage 5: extract the ref field (second whitespace-delimited field).
///
/// Purely positional, so the `refs/tags/` prefix rides along; git accepts
/// the full ref path as a push refspec.
fn extract_refs(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(String::from)
        .collect()
}

/// Push every release tag that passes the filter to the remote.
///
/// The remote-diff stage runs before pattern matching so a tag that already
/// exists remotely is never pushed, regardless of patterns. Each surviving
/// ref is pushed individually; a failed push is reported and the remaining
/// refs are still attempted, and the operation fails at the end if any push
/// failed. Returns the refs that were pushed successfully.
pub fn push_release_tags(
    runner: &dyn CommandRunner,
    cwd: &Path,
    remote: &Remote,
    filter: &TagFilter,
) -> Result<Vec<String>> {
    let local = local_tag_lines(runner, cwd)?;
    if local.is_empty() {
        println!("No local tags to push");
        return Ok(Vec::new());
    }

    let existing = remote_tag_refs(runner, cwd, remote)?;

    // Stage 2: set difference against the remote, by exact ref-path match.
    let lines: Vec<&str> = local
        .iter()
        .map(String::as_str)
        .filter(|line| {
            line.split_whitespace()
                .nth(1)
                .is_none_or(|r| !existing.contains(r))
        })
        .collect();

    let lines = filter.apply_include(lines);
    let lines = filter.apply_exclude(lines);
    let refs = extract_refs(&lines);

    let mut pushed = Vec::new();
    let mut failed = Vec::new();
    for tag_ref in refs {
        println!("Pushing tag `{}` to `{}`", tag_ref, remote.name);
        match run_checked(runner, cwd, "git", &["push", &remote.name, &tag_ref]) {
            Ok(_) => pushed.push(tag_ref),
            Err(err) => {
                eprintln!("warning: {}", err);
                failed.push(tag_ref);
            }
        }
    }

    if failed.is_empty() {
        Ok(pushed)
    } else {
        Err(SyncError::TagPushFailed { refs: failed })
    }
}

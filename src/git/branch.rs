//! Git branch enumeration and checkout

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::{FIELD_DELIMITER, Repository, Runner, git_output_bytes, git_run};

/// Layout of `%(committerdate:iso8601)`, e.g. `2024-03-01 09:15:00 +0100`
const COMMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// A local branch and the commit time of its tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    /// Short branch name (e.g. `feature/login`)
    pub name: String,
    /// Committer timestamp of the branch tip
    pub last_commit_time: DateTime<FixedOffset>,
}

/// Manager for git branch operations
pub struct Manager<'a> {
    repo: &'a Repository,
    runner: &'a dyn Runner,
}

impl std::fmt::Debug for Manager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl<'a> Manager<'a> {
    /// Create a new branch manager for the given repository
    #[must_use]
    pub const fn new(repo: &'a Repository, runner: &'a dyn Runner) -> Self {
        Self { repo, runner }
    }

    /// List local branches, most recently committed first
    ///
    /// Records git prints that cannot be parsed are skipped; a git failure is
    /// returned as an error rather than an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot run or `for-each-ref` fails
    pub fn list_by_recency(&self) -> Result<Vec<BranchEntry>> {
        let format =
            format!("--format=%(refname:short){FIELD_DELIMITER}%(committerdate:iso8601)");
        let output = git_output_bytes(
            self.runner,
            self.repo,
            &["for-each-ref", "--sort=-committerdate", format.as_str(), "refs/heads/"],
        )
        .context("Failed to list branches")?;

        let branches = parse_branch_output(&output);
        info!(count = branches.len(), "Listed local branches");
        Ok(branches)
    }

    /// Checkout a branch
    ///
    /// # Errors
    ///
    /// Returns an error if git refuses the checkout, e.g. because local
    /// changes would be overwritten
    pub fn checkout(&self, name: &str) -> Result<()> {
        info!(branch = name, "Checking out branch");
        git_run(self.runner, self.repo, &["checkout", name])
            .with_context(|| format!("Failed to checkout branch '{name}'"))
    }
}

/// Parse `for-each-ref` output into branch entries sorted newest first
///
/// Each line must hold exactly two tab-separated fields: the branch name and
/// its commit time. Lines that don't, timestamps that don't parse, and repeats
/// of a name already seen are dropped. Entries with equal timestamps keep
/// their input order.
#[must_use]
pub fn parse_branch_records(output: &str) -> Vec<BranchEntry> {
    collect_records(output.lines())
}

/// Like [`parse_branch_records`], for output straight from git
///
/// Refnames are bytes, so each line is decoded on its own and a line that is
/// not valid UTF-8 is dropped without losing the others.
#[must_use]
pub fn parse_branch_output(output: &[u8]) -> Vec<BranchEntry> {
    let lines = output.split(|&byte| byte == b'\n').filter_map(|raw| {
        std::str::from_utf8(raw)
            .inspect_err(|e| {
                warn!(
                    line = %String::from_utf8_lossy(raw),
                    error = %e,
                    "Skipping branch line that is not valid UTF-8"
                );
            })
            .ok()
    });
    collect_records(lines)
}

fn collect_records<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<BranchEntry> {
    let mut seen = HashSet::new();
    let mut branches: Vec<BranchEntry> = lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_record)
        .filter(|entry| {
            let fresh = seen.insert(entry.name.clone());
            if !fresh {
                debug!(branch = %entry.name, "Skipping duplicate branch");
            }
            fresh
        })
        .collect();

    branches.sort_by(|a, b| b.last_commit_time.cmp(&a.last_commit_time));
    branches
}

fn parse_record(line: &str) -> Option<BranchEntry> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [name, timestamp] = fields.as_slice() else {
        warn!(line, "Skipping malformed branch line");
        return None;
    };
    if name.is_empty() {
        warn!(line, "Skipping branch line without a name");
        return None;
    }

    match DateTime::parse_from_str(timestamp.trim(), COMMIT_TIME_FORMAT) {
        Ok(last_commit_time) => Some(BranchEntry {
            name: (*name).to_string(),
            last_commit_time,
        }),
        Err(e) => {
            warn!(branch = name, timestamp, error = %e, "Skipping branch with unparseable commit time");
            None
        }
    }
}

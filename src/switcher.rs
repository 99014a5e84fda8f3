//! The branch switching flow: list, label, choose, checkout

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::git::{BranchManager, Repository, Runner};
use crate::label;
use crate::tui::{Select, Selection};

/// How a run ended when nothing went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The named branch is now checked out
    Switched(String),
    /// The operator backed out of the menu; nothing was checked out
    Cancelled,
    /// The repository has no local branches to offer
    NoBranches,
}

/// Runs one enumerate → select → checkout pass against a repository
pub struct Switcher<'a> {
    repo: &'a Repository,
    runner: &'a dyn Runner,
    gutter: usize,
    title: String,
}

impl std::fmt::Debug for Switcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Switcher")
            .field("repo", &self.repo)
            .field("gutter", &self.gutter)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl<'a> Switcher<'a> {
    /// Create a switcher for `repo` that invokes git through `runner`
    #[must_use]
    pub fn new(repo: &'a Repository, runner: &'a dyn Runner) -> Self {
        Self {
            repo,
            runner,
            gutter: label::DEFAULT_GUTTER,
            title: "Select a Git Branch".to_string(),
        }
    }

    /// Use `gutter` spaces between the longest name and its annotation
    #[must_use]
    pub const fn with_gutter(mut self, gutter: usize) -> Self {
        self.gutter = gutter;
        self
    }

    /// Show `title` above the menu
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn branches(&self) -> BranchManager<'a> {
        BranchManager::new(self.repo, self.runner)
    }

    /// Build the menu labels, most recently used branch first
    ///
    /// # Errors
    ///
    /// Returns an error if the branches cannot be listed
    pub fn labels(&self, now: DateTime<Utc>) -> Result<Vec<String>> {
        let entries = self.branches().list_by_recency()?;
        Ok(label::build_labels(&entries, now, self.gutter))
    }

    /// List branches, let the operator pick one and check it out
    ///
    /// # Errors
    ///
    /// Returns an error if listing fails, the menu fails, the chosen label
    /// carries no branch name, or git refuses the checkout
    pub fn run(&self, selector: &mut dyn Select, now: DateTime<Utc>) -> Result<Outcome> {
        let labels = self.labels(now)?;
        if labels.is_empty() {
            info!("No local branches to choose from");
            return Ok(Outcome::NoBranches);
        }

        let chosen = match selector.select(&self.title, &labels)? {
            Selection::Chosen(chosen) => chosen,
            Selection::Cancelled => {
                info!("Selection cancelled");
                return Ok(Outcome::Cancelled);
            }
        };

        let name = label::extract_name(&chosen);
        if name.is_empty() {
            bail!("Selected entry has no branch name: {chosen:?}");
        }

        self.branches().checkout(name)?;
        info!(branch = name, "Switched branch");
        Ok(Outcome::Switched(name.to_string()))
    }
}

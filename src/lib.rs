//! Switchback - pick a recently used git branch and check it out
//!
//! Local branches are listed newest first with a "3 days ago" style note,
//! shown in a terminal menu, and the chosen one is checked out with git.

mod command;

pub mod config;
pub mod git;
pub mod label;
pub mod recency;
pub mod switcher;
pub mod tui;

pub use config::Config;
pub use git::{BranchEntry, Repository, SystemGit};
pub use switcher::{Outcome, Switcher};

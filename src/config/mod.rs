//! Run configuration
//!
//! Settings come from the command line only; nothing is read from or written
//! to disk.

use std::path::PathBuf;

use crate::label::DEFAULT_GUTTER;
use crate::tui::DEFAULT_MAX_VISIBLE;

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command used to invoke git (program plus leading arguments)
    pub git_command: String,

    /// Directory inside the working copy to operate on
    pub repo_path: PathBuf,

    /// Spaces between the longest branch name and its relative time
    pub gutter: usize,

    /// Rows shown in the menu before it scrolls
    pub max_visible: usize,

    /// Heading shown above the menu
    pub title: String,
}

fn default_git_command() -> String {
    "git".to_string()
}

fn default_title() -> String {
    "Select a Git Branch".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_command: default_git_command(),
            repo_path: PathBuf::from("."),
            gutter: DEFAULT_GUTTER,
            max_visible: DEFAULT_MAX_VISIBLE,
            title: default_title(),
        }
    }
}

impl Config {
    /// Clamp values that would make the menu unusable
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.gutter = self.gutter.max(1);
        self.max_visible = self.max_visible.max(1);
        if self.git_command.trim().is_empty() {
            self.git_command = default_git_command();
        }
        self
    }
}

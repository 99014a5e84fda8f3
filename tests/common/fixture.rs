//! Test fixture for setting up temporary git repositories

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::helpers::{git, git_command};

/// Test fixture that sets up a temporary git repository
pub struct TestFixture {
    /// Temporary directory containing the git repo
    _temp_dir: TempDir,
    /// Path to the git repository
    pub repo_path: PathBuf,
}

impl TestFixture {
    /// Create a repository whose `master` branch has one commit at `initial_date`
    ///
    /// Dates use git's own format, e.g. `2024-05-01T10:00:00+00:00`.
    pub fn new(initial_date: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        // Canonicalize to handle symlinked temp dirs.
        let repo_path = temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| temp_dir.path().to_path_buf());

        // Pin the default branch; it is user-configurable otherwise.
        git(&repo_path, &["init", "--initial-branch=master"])?;

        let fixture = Self {
            _temp_dir: temp_dir,
            repo_path,
        };
        fixture.commit_file("README.md", "# Test Repository\n", initial_date)?;
        Ok(fixture)
    }

    /// Write a file and commit it with both author and committer dates set
    pub fn commit_file(
        &self,
        name: &str,
        contents: &str,
        date: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(self.repo_path.join(name), contents)?;
        git(&self.repo_path, &["add", name])?;

        let output = git_command(&self.repo_path)
            .args(["commit", "-q", "-m", &format!("Update {name}")])
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .output()?;
        if !output.status.success() {
            return Err(format!("commit failed: {}", String::from_utf8_lossy(&output.stderr)).into());
        }
        Ok(())
    }

    /// Create `name` from the current HEAD, switch to it and commit at `date`
    pub fn branch_with_commit(&self, name: &str, date: &str) -> Result<(), Box<dyn std::error::Error>> {
        git(&self.repo_path, &["checkout", "-q", "-b", name])?;
        self.commit_file(&format!("{}.txt", name.replace('/', "_")), name, date)
    }

    /// Switch the working copy to `name`
    pub fn checkout(&self, name: &str) -> Result<(), Box<dyn std::error::Error>> {
        git(&self.repo_path, &["checkout", "-q", name])?;
        Ok(())
    }

    /// Name of the checked-out branch
    pub fn current_branch(&self) -> Result<String, Box<dyn std::error::Error>> {
        let output = git(&self.repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }
}

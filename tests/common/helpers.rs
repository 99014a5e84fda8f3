//! Helper functions for test setup and common operations

use std::path::Path;
use std::process::{Command, Output};

/// Check if git is available on the system
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Skip a test if git is not available. Returns true if test should be skipped.
pub fn skip_if_no_git() -> bool {
    if !git_available() {
        eprintln!("Skipping test: git not available");
        return true;
    }
    false
}

/// Build a git command isolated from the user's global and system config
pub fn git_command(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(repo)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com");
    cmd
}

/// Run git in `repo` and fail with its stderr if it exits unsuccessfully
pub fn git(repo: &Path, args: &[&str]) -> Result<Output, Box<dyn std::error::Error>> {
    let output = git_command(repo).args(args).output()?;
    if !output.status.success() {
        return Err(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    Ok(output)
}

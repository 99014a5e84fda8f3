//! Tests for listing branches from a real repository

use crate::common::{TestFixture, skip_if_no_git};
use switchback::git::BranchManager;
use switchback::{Repository, SystemGit};

fn fixture_with_branches() -> Result<TestFixture, Box<dyn std::error::Error>> {
    let fixture = TestFixture::new("2024-01-01T10:00:00+00:00")?;
    fixture.branch_with_commit("feature/login", "2024-03-01T10:00:00+00:00")?;
    fixture.branch_with_commit("fix", "2024-02-01T15:00:00+05:00")?;
    fixture.checkout("master")?;
    Ok(fixture)
}

#[test]
fn test_list_branches_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = fixture_with_branches()?;
    let git = SystemGit::default();
    let repo = Repository::discover(&git, &fixture.repo_path)?;

    let branches = BranchManager::new(&repo, &git).list_by_recency()?;

    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["feature/login", "fix", "master"]);
    assert_eq!(
        branches[1].last_commit_time.to_rfc3339(),
        "2024-02-01T15:00:00+05:00"
    );
    Ok(())
}

#[test]
fn test_list_branches_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = fixture_with_branches()?;
    let git = SystemGit::default();
    let repo = Repository::discover(&git, &fixture.repo_path)?;
    let manager = BranchManager::new(&repo, &git);

    assert_eq!(manager.list_by_recency()?, manager.list_by_recency()?);
    Ok(())
}

#[test]
fn test_discover_from_subdirectory() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = TestFixture::new("2024-01-01T10:00:00+00:00")?;
    let nested = fixture.repo_path.join("src").join("deep");
    std::fs::create_dir_all(&nested)?;

    let repo = Repository::discover(&SystemGit::default(), &nested)?;

    assert_eq!(repo.root.canonicalize()?, fixture.repo_path);
    Ok(())
}

#[test]
fn test_discover_outside_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let dir = tempfile::TempDir::new()?;

    let result = Repository::discover(&SystemGit::default(), dir.path());

    assert!(result.is_err());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_non_utf8_branch_does_not_hide_the_others() -> Result<(), Box<dyn std::error::Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = fixture_with_branches()?;
    let status = crate::common::helpers::git_command(&fixture.repo_path)
        .arg("branch")
        .arg(OsStr::from_bytes(b"bad\xff"))
        .status()?;
    assert!(status.success());

    let git = SystemGit::default();
    let repo = Repository::discover(&git, &fixture.repo_path)?;
    let branches = BranchManager::new(&repo, &git).list_by_recency()?;

    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["feature/login", "fix", "master"]);
    Ok(())
}

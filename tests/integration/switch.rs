//! End-to-end switching against a real repository with scripted menu choices

use anyhow::Result;
use chrono::Utc;
use switchback::tui::{Select, Selection};
use switchback::{Outcome, Repository, Switcher, SystemGit, label};

use crate::common::{TestFixture, skip_if_no_git};

/// Chooses the item for a given branch, or cancels when there is none
struct ChooseBranch(Option<&'static str>);

impl Select for ChooseBranch {
    fn select(&mut self, _title: &str, items: &[String]) -> Result<Selection> {
        let chosen = self.0.and_then(|target| {
            items
                .iter()
                .find(|item| label::extract_name(item) == target)
                .cloned()
        });
        Ok(chosen.map_or(Selection::Cancelled, Selection::Chosen))
    }
}

#[test]
fn test_switch_to_chosen_branch() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = TestFixture::new("2024-01-01T10:00:00+00:00")?;
    fixture.branch_with_commit("feature/login", "2024-03-01T10:00:00+00:00")?;
    fixture.checkout("master")?;

    let git = SystemGit::default();
    let repo = Repository::discover(&git, &fixture.repo_path)?;
    let outcome = Switcher::new(&repo, &git).run(&mut ChooseBranch(Some("feature/login")), Utc::now())?;

    assert_eq!(outcome, Outcome::Switched("feature/login".to_string()));
    assert_eq!(fixture.current_branch()?, "feature/login");
    Ok(())
}

#[test]
fn test_cancel_leaves_branch_alone() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = TestFixture::new("2024-01-01T10:00:00+00:00")?;
    fixture.branch_with_commit("feature/login", "2024-03-01T10:00:00+00:00")?;
    fixture.checkout("master")?;

    let git = SystemGit::default();
    let repo = Repository::discover(&git, &fixture.repo_path)?;
    let outcome = Switcher::new(&repo, &git).run(&mut ChooseBranch(None), Utc::now())?;

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(fixture.current_branch()?, "master");
    Ok(())
}

#[test]
fn test_dirty_tree_blocks_checkout() -> Result<(), Box<dyn std::error::Error>> {
    if skip_if_no_git() {
        return Ok(());
    }
    let fixture = TestFixture::new("2024-01-01T10:00:00+00:00")?;
    fixture.checkout("master")?;
    fixture.branch_with_commit("other", "2024-02-01T10:00:00+00:00")?;
    fixture.commit_file("README.md", "changed on other\n", "2024-02-02T10:00:00+00:00")?;
    fixture.checkout("master")?;
    std::fs::write(fixture.repo_path.join("README.md"), "uncommitted edit\n")?;

    let git = SystemGit::default();
    let repo = Repository::discover(&git, &fixture.repo_path)?;
    let result = Switcher::new(&repo, &git).run(&mut ChooseBranch(Some("other")), Utc::now());

    assert!(result.is_err());
    if let Err(error) = result {
        let message = format!("{error:#}");
        assert!(message.contains("Failed to checkout branch 'other'"), "{message}");
        assert!(message.contains("README.md"), "{message}");
    }
    assert_eq!(fixture.current_branch()?, "master");
    Ok(())
}

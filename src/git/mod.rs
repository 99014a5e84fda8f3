//! Git operations module
//!
//! Everything here talks to the `git` executable through a [`Runner`], so the
//! branch logic can be exercised against scripted output instead of a real
//! binary.

mod branch;

pub use branch::{BranchEntry, Manager as BranchManager, parse_branch_output, parse_branch_records};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Separator between fields in git's `for-each-ref` output and in menu labels
pub const FIELD_DELIMITER: char = '\t';

/// Failure to get a usable answer out of a git subprocess
#[derive(Debug, Error)]
pub enum GitError {
    /// The program could not be started at all
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("`git {args}` failed ({status}): {stderr}")]
    Failed {
        /// Arguments passed after the program
        args: String,
        /// Exit status, or a note that the process was killed by a signal
        status: String,
        /// Trimmed standard error
        stderr: String,
    },

    /// The program printed something that is not UTF-8 where text was expected
    #[error("`git {args}` produced output that is not valid UTF-8")]
    NotUtf8 {
        /// Arguments passed after the program
        args: String,
    },
}

/// Captured result of one git invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Raw standard output; refnames are not guaranteed to be UTF-8
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code zero
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    fn status_text(&self) -> String {
        self.code
            .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {code}"))
    }
}

/// Something that can run git with a set of arguments inside a repository
///
/// Implementations return `Ok` whenever the process ran, whatever its exit
/// status; `Err` is reserved for not being able to run it. Output is handed
/// back undecoded.
pub trait Runner {
    /// Run git with `args` using the repository root as working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started
    fn run(&self, repo: &Repository, args: &[&str]) -> Result<CommandOutput, GitError>;
}

/// [`Runner`] that spawns the real git executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemGit {
    program: String,
    leading_args: Vec<String>,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            leading_args: Vec::new(),
        }
    }
}

impl SystemGit {
    /// Build a runner from a command line such as `git -c color.ui=never`
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is empty or cannot be split
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut argv = crate::command::parse_command_line(command_line)
            .with_context(|| format!("Invalid git command '{command_line}'"))?
            .into_iter();
        let program = argv.next().context("Git command has no program")?;
        Ok(Self {
            program,
            leading_args: argv.collect(),
        })
    }

    /// Program that will be executed
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, repo: &Repository, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(args)
            .current_dir(&repo.root)
            // Keep git from paging or prompting while we hold the terminal.
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_PAGER", "cat");
        cmd
    }
}

impl Runner for SystemGit {
    fn run(&self, repo: &Repository, args: &[&str]) -> Result<CommandOutput, GitError> {
        debug!(program = %self.program, ?args, root = %repo.root.display(), "Running git");

        let output = self
            .command(repo, args)
            .output()
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(code = ?result.code, "git exited");
        Ok(result)
    }
}

/// The working copy every git call is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Top-level directory of the working copy
    pub root: PathBuf,
}

impl Repository {
    /// Wrap a path already known to be a repository root
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the repository containing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot run or `path` is not inside a working copy
    pub fn discover(runner: &dyn Runner, path: &Path) -> Result<Self> {
        let probe = Self::at(path);
        let root = git_output(runner, &probe, &["rev-parse", "--show-toplevel"])
            .with_context(|| format!("Not a git repository: {}", path.display()))?;
        Ok(Self::at(root))
    }
}

/// Run git and return its raw stdout, treating a non-zero exit as an error
///
/// # Errors
///
/// Returns an error if git cannot run or exits unsuccessfully
pub fn git_output_bytes(
    runner: &dyn Runner,
    repo: &Repository,
    args: &[&str],
) -> Result<Vec<u8>, GitError> {
    let output = runner.run(repo, args)?;
    if !output.success() {
        return Err(GitError::Failed {
            args: args.join(" "),
            status: output.status_text(),
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// Run git and return trimmed stdout as text, treating a non-zero exit as an error
///
/// # Errors
///
/// Returns an error if git cannot run, exits unsuccessfully, or prints
/// something that is not UTF-8
pub fn git_output(runner: &dyn Runner, repo: &Repository, args: &[&str]) -> Result<String, GitError> {
    let stdout = git_output_bytes(runner, repo, args)?;
    let text = String::from_utf8(stdout).map_err(|_| GitError::NotUtf8 {
        args: args.join(" "),
    })?;
    Ok(text.trim().to_string())
}

/// Run git for its side effect, treating a non-zero exit as an error
///
/// # Errors
///
/// Returns an error if git cannot run or exits unsuccessfully
pub fn git_run(runner: &dyn Runner, repo: &Repository, args: &[&str]) -> Result<(), GitError> {
    git_output_bytes(runner, repo, args).map(|_| ())
}

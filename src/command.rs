//! Splitting the configured git command into program and arguments.

use anyhow::{Context, Result, bail};

/// Split a git command line such as `git -c core.quotepath=off` into argv.
///
/// Unix shell-style quoting applies, so paths with spaces can be quoted. The
/// result is an executable followed by arguments, never a shell script.
pub fn parse_command_line(command_line: &str) -> Result<Vec<String>> {
    let trimmed = command_line.trim();
    if trimmed.is_empty() {
        bail!("Git command is empty");
    }

    let argv = shell_words::split(trimmed).context("Failed to parse git command")?;
    if argv.first().is_none_or(String::is_empty) {
        bail!("Git command names no program");
    }

    Ok(argv)
}

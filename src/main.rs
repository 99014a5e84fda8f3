//! Switchback - pick a recently used git branch and check it out

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use switchback::tui::TerminalSelector;
use switchback::{Config, Outcome, Repository, Switcher, SystemGit, label};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Pick a recently used git branch and check it out
#[derive(Parser)]
#[command(name = "switchback")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory inside the repository to operate on
    #[arg(long, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Command used to run git, e.g. "git -c core.quotepath=off"
    #[arg(long, value_name = "COMMAND")]
    git: Option<String>,

    /// Spaces between the longest branch name and its relative time
    #[arg(long, value_name = "N")]
    gutter: Option<usize>,

    /// Rows shown in the menu before it scrolls
    #[arg(long, value_name = "N")]
    max_visible: Option<usize>,

    /// Print the branch list and exit without checking anything out
    #[arg(long)]
    list: bool,

    /// Log more (-v warnings, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            git_command: self.git.clone().unwrap_or(defaults.git_command),
            repo_path: self.repo.clone().unwrap_or(defaults.repo_path),
            gutter: self.gutter.unwrap_or(defaults.gutter),
            max_visible: self.max_visible.unwrap_or(defaults.max_visible),
            title: defaults.title,
        }
        .normalized()
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            if let Err(help_err) = Cli::command().print_help() {
                eprintln!("error: {help_err}");
            }
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Warning: Failed to set up logging: {e:#}");
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Run failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.config();
    let git = SystemGit::from_command_line(&config.git_command)?;
    let repo = Repository::discover(&git, &config.repo_path)?;
    let switcher = Switcher::new(&repo, &git)
        .with_gutter(config.gutter)
        .with_title(config.title.clone());

    if cli.list {
        for line in switcher.labels(Utc::now())? {
            println!("{}", label::to_plain(&line));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut selector = TerminalSelector::new(config.max_visible);
    match switcher.run(&mut selector, Utc::now())? {
        Outcome::Switched(name) => println!("Switched to branch '{name}'"),
        Outcome::Cancelled => {}
        Outcome::NoBranches => println!("No local branches found"),
    }
    Ok(ExitCode::SUCCESS)
}

// Logging is off unless -v is given; -v maps to warn, -vv to info, -vvv and up to debug.
fn init_logging(verbosity: u8, log_file: Option<&std::path::Path>) -> Result<()> {
    let level = match verbosity {
        0 => return Ok(()),
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("switchback={level}"));

    if let Some(path) = log_file {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Log file path has no usable file name: {}", path.display()))?;
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name)
            .build(dir)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_env_filter(filter)
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    Ok(())
}

//! Terminal menu for choosing one item out of many
//!
//! Nothing in here knows about git: callers hand over a list of strings and
//! get back the one the operator confirmed, or a cancellation.

mod colors;
mod picker;
mod render;

pub use picker::Picker;
pub use render::render;

use anyhow::{Result, bail};
use ratatui::crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, IsTerminal};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Default number of rows shown before the list scrolls
pub const DEFAULT_MAX_VISIBLE: usize = 10;

/// How a menu interaction ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The operator confirmed this exact item
    Chosen(String),
    /// The operator backed out without choosing
    Cancelled,
}

/// A way of asking the operator to choose one item
pub trait Select {
    /// Present `items` under `title` and wait for a decision
    ///
    /// # Errors
    ///
    /// Returns an error if the menu cannot be shown or input cannot be read
    fn select(&mut self, title: &str, items: &[String]) -> Result<Selection>;
}

/// [`Select`] implementation that takes over the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSelector {
    max_visible: usize,
}

impl Default for TerminalSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE)
    }
}

impl TerminalSelector {
    /// Create a selector that shows at most `max_visible` rows at once
    #[must_use]
    pub const fn new(max_visible: usize) -> Self {
        Self { max_visible }
    }
}

impl Select for TerminalSelector {
    fn select(&mut self, title: &str, items: &[String]) -> Result<Selection> {
        if items.is_empty() {
            return Ok(Selection::Cancelled);
        }
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            bail!("Interactive selection needs a terminal; use --list to print branches instead");
        }

        let mut picker = Picker::new(items.to_vec(), self.max_visible);

        let guard = TerminalGuard::enter()?;
        let result = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| run_loop(&mut terminal, &mut picker, title));
        drop(guard);

        debug!(outcome = ?result.as_ref().ok(), "Selection finished");
        result
    }
}

/// Set while raw mode may be on; whoever clears it restores the terminal
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// Raw mode and the alternate screen, undone when dropped or on panic
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        PANIC_HOOK.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                if release_terminal() {
                    restore_terminal();
                }
                previous(info);
            }));
        });

        enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if release_terminal() {
            restore_terminal();
        }
    }
}

fn release_terminal() -> bool {
    TERMINAL_ACTIVE.swap(false, Ordering::SeqCst)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    picker: &mut Picker,
    title: &str,
) -> Result<Selection> {
    loop {
        terminal.draw(|frame| render(frame, picker, title))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(selection) = picker.handle_key(key.code, key.modifiers)
        {
            return Ok(selection);
        }
    }
}

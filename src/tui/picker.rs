//! Single-choice picker state
//!
//! Holds the items, the type-to-filter query and the highlighted row, and
//! turns key presses into either more navigation or a final [`Selection`].
//! Items may carry a secondary part after a tab; filtering only looks at the
//! part before it.

use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use super::Selection;
use crate::label;

/// Navigation state for one run of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    items: Vec<String>,
    filter: String,
    /// Indices into `items` matching the filter, in item order
    matches: Vec<usize>,
    /// Position within `matches`
    selected: usize,
    max_visible: usize,
}

impl Picker {
    /// Create a picker over `items` showing at most `max_visible` rows at once
    #[must_use]
    pub fn new(items: Vec<String>, max_visible: usize) -> Self {
        let matches = (0..items.len()).collect();
        Self {
            items,
            filter: String::new(),
            matches,
            selected: 0,
            max_visible: max_visible.max(1),
        }
    }

    /// Current filter text
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Number of rows shown before scrolling
    #[must_use]
    pub const fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Position of the highlighted row among the matching items
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Items matching the filter, in their original order
    pub fn matching(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|&i| self.items[i].as_str())
    }

    /// Number of items matching the filter
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// The highlighted item, if any item matches
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.matches
            .get(self.selected)
            .map(|&i| self.items[i].as_str())
    }

    /// First matching row to draw so the highlighted row stays visible
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        if self.selected >= self.max_visible {
            self.selected - self.max_visible + 1
        } else {
            0
        }
    }

    /// Move the highlight down one row, stopping at the last
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
        }
    }

    /// Move the highlight up one row, stopping at the first
    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the highlight down one page
    pub fn page_down(&mut self) {
        let last = self.matches.len().saturating_sub(1);
        self.selected = (self.selected + self.max_visible).min(last);
    }

    /// Move the highlight up one page
    pub const fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.max_visible);
    }

    /// Highlight the first row
    pub const fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Highlight the last row
    pub fn select_last(&mut self) {
        self.selected = self.matches.len().saturating_sub(1);
    }

    /// Append a character to the filter
    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    /// Remove the last character of the filter
    pub fn pop_filter(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    /// Apply one key press
    ///
    /// Returns `Some` once the operator has confirmed an item or cancelled.
    /// Enter with nothing matching does nothing.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Selection> {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Char('c') if ctrl => return Some(Selection::Cancelled),
            KeyCode::Esc => return Some(Selection::Cancelled),
            KeyCode::Enter => return self.current().map(|item| Selection::Chosen(item.to_string())),
            KeyCode::Up => self.select_prev(),
            KeyCode::Char('p') if ctrl => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Char('n') if ctrl => self.select_next(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Backspace => self.pop_filter(),
            KeyCode::Char(c) if !ctrl => self.push_filter(c),
            _ => {}
        }
        None
    }

    fn refilter(&mut self) {
        let query = self.filter.to_lowercase();
        self.matches = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| label::split(item).0.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }
}

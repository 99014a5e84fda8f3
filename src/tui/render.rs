//! Picker rendering

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::colors;
use super::picker::Picker;
use crate::label;

/// Draw the picker over the whole frame
pub fn render(frame: &mut Frame<'_>, picker: &Picker, title: &str) {
    let max_visible = picker.max_visible();
    let scroll_offset = picker.scroll_offset();
    let total_count = picker.match_count();

    let mut lines: Vec<Line<'_>> = Vec::new();

    // Search box
    lines.push(Line::from(vec![
        Span::styled("Search: ", Style::default().fg(colors::TEXT_DIM)),
        Span::styled(
            format!("{}_", picker.filter()),
            Style::default().fg(colors::ACCENT_POSITIVE),
        ),
    ]));
    lines.push(Line::from(""));

    for (idx, item) in picker
        .matching()
        .enumerate()
        .skip(scroll_offset)
        .take(max_visible)
    {
        let is_selected = idx == picker.selected();
        let style = if is_selected {
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .bg(colors::SURFACE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT_PRIMARY)
        };
        let prefix = if is_selected { "▶ " } else { "  " };

        let (name, annotation) = label::split(item);
        lines.push(Line::from(vec![
            Span::styled(format!("{prefix}{name}"), style),
            Span::styled(
                annotation.to_string(),
                Style::default()
                    .fg(colors::TEXT_DIM)
                    .add_modifier(Modifier::DIM),
            ),
        ]));
    }

    // Show scroll indicator if there are more items
    if total_count > max_visible {
        let hidden_above = scroll_offset;
        let hidden_below = total_count.saturating_sub(scroll_offset + max_visible);
        let indicator = match (hidden_above > 0, hidden_below > 0) {
            (true, true) => format!("  ↑{hidden_above} more above, ↓{hidden_below} more below"),
            (true, false) => format!("  ↑{hidden_above} more above"),
            (false, true) => format!("  ↓{hidden_below} more below"),
            (false, false) => String::new(),
        };
        if !indicator.is_empty() {
            lines.push(Line::from(Span::styled(
                indicator,
                Style::default().fg(colors::TEXT_MUTED),
            )));
        }
    }

    // Empty state
    if total_count == 0 {
        lines.push(Line::from(Span::styled(
            "No matches",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }

    // Instructions
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select • type to filter • Enter confirm • Esc cancel",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::BORDER)),
    );

    let area = frame.area();
    frame.render_widget(paragraph, area);
}

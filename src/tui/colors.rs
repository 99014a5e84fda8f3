//! Color palette for the picker
//!
//! Muted colors taken from the same palette for every element

use ratatui::style::Color;

// UI Chrome
pub const BORDER: Color = Color::Rgb(100, 110, 130);
pub const SURFACE_HIGHLIGHT: Color = Color::Rgb(50, 55, 70);

// Text
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 230);
pub const TEXT_DIM: Color = Color::Rgb(130, 135, 150);
pub const TEXT_MUTED: Color = Color::Rgb(90, 95, 110);

// Accent
pub const ACCENT_POSITIVE: Color = Color::Rgb(120, 180, 120);

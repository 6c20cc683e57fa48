//! Shared palette

use ratatui::style::Color;

/// Header / accent color.
pub const ACCENT: Color = Color::Rgb(91, 155, 250);
/// Success green, matching the original's install buttons.
pub const OK: Color = Color::Rgb(40, 167, 69);
/// Error red, matching the original's uninstall buttons.
pub const ERR: Color = Color::Rgb(220, 53, 69);
/// Secondary text.
pub const DIM: Color = Color::Rgb(130, 130, 140);

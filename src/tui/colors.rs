//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar background.
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Days with at least one task due.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Confirmation dialogs and error messages.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// The selected calendar day.
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);

//! Color constants for the board.

use ratatui::style::Color;

// Every other task row gets a dark band so long lanes stay scannable.

/// Foreground of odd-numbered rows
pub const ALT_ROW_FG: Color = Color::White;
/// Background of odd-numbered rows
pub const ALT_ROW_BG: Color = Color::Black;
/// Border of the lane holding the selection
pub const ACTIVE_BORDER: Color = Color::Cyan;
/// Key-binding help text in the control panel
pub const HELP_TEXT: Color = Color::DarkGray;

//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, glyphs, colors and
//! input timing defaults.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_PRIMARY: &str = "> ";
pub const PROMPT_CONTINUATION: &str = "... ";

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

pub const MENU_HELP: &str = "↑/↓ move · Enter select · 1-9 pick · Ctrl+C exit";
pub const MENU_INDENT: &str = "  ";
pub const GLYPH_SECTION_BULLET: &str = "•";
pub const MENU_SELECTED_COLOR: &str = "▶";
pub const MENU_UNSELECTED_COLOR: &str = "·";
pub const MENU_SELECTED_PLAIN: &str = ">";
pub const MENU_UNSELECTED_PLAIN: &str = "-";
/// Options past this position have no digit shortcut.
pub const MENU_MAX_SHORTCUT: usize = 9;

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

// ---------------------------------------------------------------------------
// Input timing
// ---------------------------------------------------------------------------

/// How long a partial escape sequence may wait for its remaining bytes.
pub const ESCAPE_TIMEOUT_MS: u64 = 25;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT: Color = Color::White;
pub const COLOR_CONTINUATION_PROMPT: Color = Color::DarkGrey;

pub const COLOR_SECTION_BULLET: Color = Color::DarkGrey;
pub const COLOR_SECTION_TITLE: Color = Color::Cyan;
pub const COLOR_MENU_HELP: Color = Color::DarkGrey;
pub const COLOR_MENU_SELECTED: Color = Color::DarkYellow;
pub const COLOR_MENU_UNSELECTED: Color = Color::DarkGrey;
pub const COLOR_MENU_LABEL_SELECTED: Color = Color::Yellow;
pub const COLOR_MENU_LABEL: Color = Color::White;
pub const COLOR_MENU_DESCRIPTION: Color = Color::DarkGrey;

pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

pub fn menu_marker(is_selected: bool, color: bool) -> &'static str {
    match (is_selected, color) {
        (true, true) => MENU_SELECTED_COLOR,
        (false, true) => MENU_UNSELECTED_COLOR,
        (true, false) => MENU_SELECTED_PLAIN,
        (false, false) => MENU_UNSELECTED_PLAIN,
    }
}

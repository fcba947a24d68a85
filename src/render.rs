//! Reply rendering for the terminal.
//!
//! `termimad` lays out lists, headings, code fences and tables without a
//! full TUI view.

use crate::config::DisplayConfig;
use crate::tui::settings;
use crossterm::style::{Color, Stylize};
use termimad::MadSkin;

/// Format a relay reply for printing on stdout.
///
/// With markdown off the text is returned unchanged. With color off the
/// layout is kept but no ANSI styling is emitted.
pub fn render_reply(text: &str, display: &DisplayConfig) -> String {
    if !display.markdown {
        return text.to_string();
    }
    let skin = if display.color {
        MadSkin::default()
    } else {
        MadSkin::no_style()
    };
    let formatted = skin.text(text, None).to_string();
    formatted.trim_end_matches('\n').to_string()
}

/// Print a warning line on stderr.
pub fn print_warning(color: bool, msg: &str) {
    eprintln!(
        "\r{}",
        format_notice(settings::LABEL_WARNING, settings::COLOR_WARNING, msg, color)
    );
}

/// Print an error line on stderr.
pub fn print_error(color: bool, msg: &str) {
    eprintln!(
        "\r{}",
        format_notice(settings::LABEL_ERROR, settings::COLOR_ERROR, msg, color)
    );
}

fn format_notice(label: &str, tint: Color, msg: &str, color: bool) -> String {
    if color {
        format!("{} {msg}", label.with(tint).bold())
    } else {
        format!("{label} {msg}")
    }
}

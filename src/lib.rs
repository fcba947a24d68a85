//! chatline: a terminal chat front end built around a raw-mode line editor.
//!
//! The interesting part lives in [`tui`]: a byte-level keystroke decoder, a
//! multi-line edit buffer, an incremental painter and a menu picker, driven
//! by [`tui::InputEngine`]. The rest is plumbing around it: configuration,
//! logging, and a small HTTP relay that forwards each submitted message.
//!
//! # Quick start
//!
//! ```no_run
//! use chatline::tui::{read_line, EditorSettings, ReadOutcome};
//!
//! match read_line(&EditorSettings::default()) {
//!     Ok(ReadOutcome::Line(text)) => println!("you wrote: {text}"),
//!     Ok(ReadOutcome::Cancelled) => std::process::exit(130),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
#[cfg(test)]
pub mod testsupport;
pub mod tui;

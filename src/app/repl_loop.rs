//! Interactive read → relay → print loop.

use chatline::api::MessageRelay;
use chatline::config::DisplayConfig;
use chatline::error::{AppError, InputError};
use chatline::render::{print_error, render_reply};
use chatline::tui::ReadOutcome;
use std::io::Write;
use tracing::{info, warn};

/// Words that end the loop when sent alone.
const QUIT_WORDS: &[&str] = &["exit", "quit"];

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopExit {
    /// `exit` or `quit` was entered.
    Quit,
    /// Ctrl+C or end of input.
    Cancelled,
}

pub(crate) fn is_quit_command(line: &str) -> bool {
    QUIT_WORDS.contains(&line.trim())
}

/// Read messages until the user quits, relaying each and printing replies.
///
/// Relay failures are reported and the loop continues. Input failures end
/// it, so a missing terminal surfaces to the caller on the first read.
pub(crate) async fn run_repl<R, F, W>(
    relay: &R,
    mut read: F,
    display: &DisplayConfig,
    out: &mut W,
) -> Result<LoopExit, AppError>
where
    R: MessageRelay + ?Sized,
    F: FnMut() -> Result<ReadOutcome, InputError>,
    W: Write,
{
    loop {
        let message = match read()? {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Cancelled => return Ok(LoopExit::Cancelled),
        };
        if is_quit_command(&message) {
            info!("quit requested");
            return Ok(LoopExit::Quit);
        }

        match relay.send(&message).await {
            Ok(reply) => {
                writeln!(out, "{}", render_reply(&reply, display))
                    .and_then(|()| out.flush())
                    .map_err(InputError::from)?;
            }
            Err(err) => {
                warn!(error = %err, "relay failed");
                print_error(display.color, &err.to_string());
            }
        }
    }
}

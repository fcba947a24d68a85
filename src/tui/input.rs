//! Raw-mode input loop for the line editor and the menu picker.
//!
//! [`InputEngine`] owns the three collaborators the loop needs: a terminal it
//! can switch into raw mode, a source of raw bytes and a sink for escape
//! sequences. Everything in between (decoding, editing, painting) is plain
//! state, so the whole loop runs against fakes in tests.

use crate::config::EditorConfig;
use crate::error::InputError;
use crate::tui::decoder::{DecodeMode, InputEvent, RawByteDecoder};
use crate::tui::input_buffer::{EditOutcome, LineEditBuffer};
use crate::tui::menu::{MenuOption, MenuOutcome, MenuState};
use crate::tui::painter::TerminalPainter;
use crate::tui::prompt::PromptChrome;
use crate::tui::settings;
use crate::tui::terminal::{
    ByteSource, Chunk, CrosstermTerminal, RawModeGuard, RawTerminal, StdinSource,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing::trace;

/// Result of one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The submitted message, trimmed, lines joined with `\n`.
    Line(String),
    /// Ctrl+C, or the input stream closed.
    Cancelled,
}

/// Prompt and timing knobs for the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub prompt: String,
    pub continuation_prompt: String,
    pub color: bool,
    /// How long an incomplete escape sequence waits before being dropped.
    pub escape_timeout: Duration,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            prompt: settings::PROMPT_PRIMARY.to_string(),
            continuation_prompt: settings::PROMPT_CONTINUATION.to_string(),
            color: true,
            escape_timeout: Duration::from_millis(settings::ESCAPE_TIMEOUT_MS),
        }
    }
}

impl EditorSettings {
    pub fn from_config(editor: &EditorConfig, color: bool) -> Self {
        Self {
            prompt: editor.prompt.clone(),
            continuation_prompt: editor.continuation_prompt.clone(),
            color,
            escape_timeout: Duration::from_millis(editor.escape_timeout_ms),
        }
    }

    fn chrome(&self) -> PromptChrome {
        PromptChrome {
            primary: self.prompt.clone(),
            continuation: self.continuation_prompt.clone(),
            color: self.color,
        }
    }
}

/// Drives decoder, state and painter for one terminal.
pub struct InputEngine<T, S, W> {
    terminal: T,
    source: S,
    out: W,
    settings: EditorSettings,
}

impl<T, S, W> InputEngine<T, S, W>
where
    T: RawTerminal,
    S: ByteSource,
    W: Write,
{
    pub fn new(terminal: T, source: S, out: W, settings: EditorSettings) -> Self {
        Self {
            terminal,
            source,
            out,
            settings,
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (T, S, W) {
        (self.terminal, self.source, self.out)
    }

    /// Edit one message until it is submitted or cancelled.
    ///
    /// Raw mode is held for the duration of the call and released on every
    /// return path. Events decoded after a submit in the same chunk are
    /// dropped.
    pub fn read_line(&mut self) -> Result<ReadOutcome, InputError> {
        let _guard = RawModeGuard::acquire(&mut self.terminal)?;
        let mut decoder = RawByteDecoder::new(DecodeMode::Line);
        let mut buffer = LineEditBuffer::new();
        let mut painter = TerminalPainter::new(self.settings.chrome());
        emit(&mut self.out, &painter.begin_editor()?)?;

        loop {
            let Some(events) =
                next_events(&mut self.source, &mut decoder, self.settings.escape_timeout)?
            else {
                emit(&mut self.out, &painter.finish_editor()?)?;
                return Ok(ReadOutcome::Cancelled);
            };

            for event in events {
                trace!(?event, "editor event");
                match buffer.apply(&event) {
                    EditOutcome::Continue => {
                        emit(&mut self.out, &painter.paint_editor(&buffer)?)?;
                    }
                    EditOutcome::Absorbed => {
                        emit(&mut self.out, &painter.restart_prompt()?)?;
                    }
                    EditOutcome::Committed(text) => {
                        emit(&mut self.out, &painter.finish_editor()?)?;
                        return Ok(ReadOutcome::Line(text));
                    }
                    EditOutcome::Cancelled => {
                        emit(&mut self.out, &painter.finish_editor()?)?;
                        return Ok(ReadOutcome::Cancelled);
                    }
                }
            }
        }
    }

    /// Show a menu and wait for a choice.
    ///
    /// Never returns [`MenuOutcome::Continue`].
    pub fn select_from_menu(
        &mut self,
        title: &str,
        options: &[MenuOption],
    ) -> Result<MenuOutcome, InputError> {
        let mut menu = MenuState::new(options.to_vec())?;
        let _guard = RawModeGuard::acquire(&mut self.terminal)?;
        let mut decoder = RawByteDecoder::new(DecodeMode::Menu);
        let mut painter = TerminalPainter::new(self.settings.chrome());
        emit(&mut self.out, &painter.paint_menu(&menu, title)?)?;

        loop {
            let Some(events) =
                next_events(&mut self.source, &mut decoder, self.settings.escape_timeout)?
            else {
                emit(&mut self.out, &painter.finish_menu()?)?;
                return Ok(MenuOutcome::Cancelled);
            };

            for event in events {
                trace!(?event, "menu event");
                let before = menu.selected();
                match menu.apply(&event) {
                    MenuOutcome::Continue => {
                        if menu.selected() != before {
                            emit(&mut self.out, &painter.paint_menu(&menu, title)?)?;
                        }
                    }
                    outcome => {
                        emit(&mut self.out, &painter.finish_menu()?)?;
                        return Ok(outcome);
                    }
                }
            }
        }
    }
}

/// Wait for bytes until at least one event decodes.
///
/// While a partial sequence is pending the wait is bounded by
/// `escape_timeout`; on expiry the partial sequence is dropped. `None` means
/// the source closed.
fn next_events<S: ByteSource + ?Sized>(
    source: &mut S,
    decoder: &mut RawByteDecoder,
    escape_timeout: Duration,
) -> io::Result<Option<Vec<InputEvent>>> {
    loop {
        let timeout = decoder.has_pending().then_some(escape_timeout);
        match source.next_chunk(timeout)? {
            Chunk::Bytes(bytes) => {
                let events = decoder.feed(&bytes);
                if !events.is_empty() {
                    return Ok(Some(events));
                }
            }
            Chunk::TimedOut => decoder.flush_pending(),
            Chunk::Closed => return Ok(None),
        }
    }
}

fn emit<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    out.write_all(bytes)?;
    out.flush()
}

/// Read one message from the process terminal, painting on stderr.
pub fn read_line(settings: &EditorSettings) -> Result<ReadOutcome, InputError> {
    InputEngine::new(
        CrosstermTerminal,
        StdinSource::new(),
        io::stderr(),
        settings.clone(),
    )
    .read_line()
}

/// Run a menu on the process terminal, painting on stderr.
pub fn select_from_menu(
    settings: &EditorSettings,
    title: &str,
    options: &[MenuOption],
) -> Result<MenuOutcome, InputError> {
    InputEngine::new(
        CrosstermTerminal,
        StdinSource::new(),
        io::stderr(),
        settings.clone(),
    )
    .select_from_menu(title, options)
}

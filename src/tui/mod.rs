//! Raw-terminal input engine.
//!
//! Bytes flow one way: terminal → [`RawByteDecoder`] → [`InputEvent`] →
//! [`LineEditBuffer`] or [`MenuState`] → [`TerminalPainter`] → terminal.
//! [`InputEngine`] runs that pipeline under a raw-mode guard.

pub mod decoder;
pub mod input;
pub mod input_buffer;
pub mod menu;
pub mod painter;
mod prompt;
pub mod settings;
pub mod terminal;

pub use decoder::{DecodeMode, InputEvent, RawByteDecoder};
pub use input::{read_line, select_from_menu, EditorSettings, InputEngine, ReadOutcome};
pub use input_buffer::{EditOutcome, LineEditBuffer};
pub use menu::{MenuOption, MenuOutcome, MenuState, EXIT_KEY};
pub use painter::TerminalPainter;
pub use prompt::PromptChrome;
pub use terminal::{
    ByteSource, Chunk, CrosstermTerminal, RawModeGuard, RawTerminal, StdinSource,
};

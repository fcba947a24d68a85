//! Raw keystroke byte decoding.
//!
//! The decoder turns unbuffered terminal bytes into logical [`InputEvent`]s.
//! It is a small state machine: escape and UTF-8 sequences that straddle a
//! chunk boundary are held in [`Pending`] until the next `feed` call. The input
//! loop flushes that state when no continuation arrives within the escape
//! timeout, so a lone Esc keypress never swallows the key typed after it.

use tracing::{debug, trace};

const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const LF: u8 = 0x0A;
const CR: u8 = 0x0D;
const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

/// One logical keystroke decoded from raw terminal bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Printable character to splice in at the cursor.
    InsertChar(char),
    /// Continue on a new line without submitting (Shift+Enter / bare LF).
    NewLine,
    /// Enter in line-edit mode.
    Submit,
    Backspace,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Ctrl+C: hard interrupt.
    Cancel,
    MenuUp,
    MenuDown,
    /// Enter in menu mode.
    MenuConfirm,
    /// Digit shortcut `1..=9` in menu mode.
    MenuDirect(u8),
}

/// Which consumer the decoded events are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Multi-line editing: Enter submits, digits are text.
    Line,
    /// Menu navigation: Enter confirms, arrows move, digits pick directly.
    Menu,
}

/// Partially received multi-byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    /// `ESC` seen.
    Escape,
    /// `ESC [` seen; `parameterized` once any parameter byte arrived.
    Csi { parameterized: bool },
    /// `ESC O` seen (application-mode cursor keys).
    Ss3,
    /// UTF-8 lead byte seen, continuation bytes outstanding.
    Utf8 { bytes: [u8; 4], len: u8, need: u8 },
}

/// Stateful decoder from raw terminal bytes to [`InputEvent`]s.
#[derive(Debug, Clone)]
pub struct RawByteDecoder {
    mode: DecodeMode,
    pending: Pending,
}

impl RawByteDecoder {
    pub fn new(mode: DecodeMode) -> Self {
        Self {
            mode,
            pending: Pending::Idle,
        }
    }

    /// True while a partial escape or UTF-8 sequence awaits more bytes.
    pub fn has_pending(&self) -> bool {
        self.pending != Pending::Idle
    }

    /// Drop any partial sequence without producing an event.
    pub fn flush_pending(&mut self) {
        if self.has_pending() {
            debug!(pending = ?self.pending, "dropping incomplete input sequence");
        }
        self.pending = Pending::Idle;
    }

    /// Decode one chunk of raw bytes.
    ///
    /// Chunks may be any length and split anywhere. Ctrl+C ends decoding of
    /// the chunk: bytes after it are discarded.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mut bytes = chunk.iter().copied().peekable();

        while let Some(byte) = bytes.next() {
            if byte == CTRL_C {
                self.pending = Pending::Idle;
                events.push(InputEvent::Cancel);
                let dropped = bytes.count();
                if dropped > 0 {
                    trace!(dropped, "discarding bytes after interrupt");
                }
                return events;
            }

            if self.continue_pending(byte, &mut events) {
                continue;
            }

            match byte {
                CR => {
                    events.push(self.enter_event());
                    // CRLF is one Enter keystroke.
                    if bytes.peek() == Some(&LF) {
                        bytes.next();
                    }
                }
                LF => events.push(InputEvent::NewLine),
                BACKSPACE | DEL => events.push(InputEvent::Backspace),
                ESC => self.pending = Pending::Escape,
                0x20..=0x7E => events.push(self.printable_event(byte)),
                0xC2..=0xF4 => self.start_utf8(byte),
                _ => debug!(byte, "ignoring unsupported input byte"),
            }
        }

        events
    }

    /// Advance an in-flight sequence with `byte`.
    ///
    /// Returns false when there was nothing pending or when `byte` aborted the
    /// sequence; the caller then decodes `byte` on its own.
    fn continue_pending(&mut self, byte: u8, events: &mut Vec<InputEvent>) -> bool {
        match std::mem::replace(&mut self.pending, Pending::Idle) {
            Pending::Idle => false,
            Pending::Escape => match byte {
                b'[' => {
                    self.pending = Pending::Csi {
                        parameterized: false,
                    };
                    true
                }
                b'O' => {
                    self.pending = Pending::Ss3;
                    true
                }
                ESC => {
                    self.pending = Pending::Escape;
                    true
                }
                0x20..=0x7E => {
                    debug!(byte, "ignoring alt-modified key");
                    true
                }
                _ => false,
            },
            Pending::Csi { parameterized } => match byte {
                b'A'..=b'D' if !parameterized => {
                    events.push(self.arrow_event(byte));
                    true
                }
                0x20..=0x3F => {
                    self.pending = Pending::Csi {
                        parameterized: true,
                    };
                    true
                }
                0x40..=0x7E => {
                    debug!(final_byte = byte, "ignoring unsupported CSI sequence");
                    true
                }
                _ => {
                    debug!(byte, "aborting malformed CSI sequence");
                    false
                }
            },
            Pending::Ss3 => match byte {
                b'A'..=b'D' => {
                    events.push(self.arrow_event(byte));
                    true
                }
                0x20..=0x7E => {
                    debug!(final_byte = byte, "ignoring unsupported SS3 sequence");
                    true
                }
                _ => false,
            },
            Pending::Utf8 {
                mut bytes,
                len,
                need,
            } => {
                if byte & 0xC0 != 0x80 {
                    debug!("dropping truncated UTF-8 sequence");
                    return false;
                }
                bytes[len as usize] = byte;
                let len = len + 1;
                if len < need {
                    self.pending = Pending::Utf8 { bytes, len, need };
                    return true;
                }
                match std::str::from_utf8(&bytes[..need as usize])
                    .ok()
                    .and_then(|s| s.chars().next())
                {
                    // C1 controls (U+0080..U+009F) include the 8-bit CSI.
                    Some(ch) if ch.is_control() => {
                        debug!(code = ch as u32, "ignoring control character");
                    }
                    Some(ch) => events.push(InputEvent::InsertChar(ch)),
                    None => debug!("dropping malformed UTF-8 sequence"),
                }
                true
            }
        }
    }

    fn start_utf8(&mut self, lead: u8) {
        let need = match lead {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            _ => 4,
        };
        let mut bytes = [0u8; 4];
        bytes[0] = lead;
        self.pending = Pending::Utf8 {
            bytes,
            len: 1,
            need,
        };
    }

    fn enter_event(&self) -> InputEvent {
        match self.mode {
            DecodeMode::Line => InputEvent::Submit,
            DecodeMode::Menu => InputEvent::MenuConfirm,
        }
    }

    fn printable_event(&self, byte: u8) -> InputEvent {
        match (self.mode, byte) {
            (DecodeMode::Menu, b'1'..=b'9') => InputEvent::MenuDirect(byte - b'0'),
            _ => InputEvent::InsertChar(char::from(byte)),
        }
    }

    fn arrow_event(&self, final_byte: u8) -> InputEvent {
        match (self.mode, final_byte) {
            (DecodeMode::Menu, b'A') => InputEvent::MenuUp,
            (DecodeMode::Menu, b'B') => InputEvent::MenuDown,
            (_, b'A') => InputEvent::CursorUp,
            (_, b'B') => InputEvent::CursorDown,
            (_, b'C') => InputEvent::CursorRight,
            _ => InputEvent::CursorLeft,
        }
    }
}

//! Editable multi-line input buffer.

use crate::tui::decoder::InputEvent;

/// Result of applying one event to a [`LineEditBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Keep editing.
    Continue,
    /// Enter on an all-blank buffer: nothing is returned, the buffer was
    /// reset and the prompt should be shown again.
    Absorbed,
    /// Enter with content: the joined, trimmed message.
    Committed(String),
    /// Ctrl+C: the session ends without a message.
    Cancelled,
}

/// In-progress message: committed lines plus the line under the cursor.
///
/// The cursor is a char index into the current line. Committed lines are
/// never edited again; backspace at column 0 does not merge lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditBuffer {
    committed: Vec<String>,
    current: String,
    cursor: usize,
}

impl LineEditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines already pushed by `NewLine`, in entry order.
    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    pub fn current_line(&self) -> &str {
        &self.current
    }

    /// Cursor position in chars within the current line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when no line holds any non-whitespace character.
    pub fn is_blank(&self) -> bool {
        self.current.trim().is_empty() && self.committed.iter().all(|l| l.trim().is_empty())
    }

    /// Apply one decoded event.
    pub fn apply(&mut self, event: &InputEvent) -> EditOutcome {
        match *event {
            InputEvent::InsertChar(ch) => {
                insert_char_at_cursor(&mut self.current, &mut self.cursor, ch);
            }
            InputEvent::Backspace => {
                if self.cursor > 0 {
                    delete_char_before_cursor(&mut self.current, &mut self.cursor);
                }
            }
            InputEvent::NewLine => {
                self.committed.push(std::mem::take(&mut self.current));
                self.cursor = 0;
            }
            InputEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            InputEvent::CursorRight => {
                if self.cursor < char_count(&self.current) {
                    self.cursor += 1;
                }
            }
            // Reserved for history navigation; not implemented.
            InputEvent::CursorUp | InputEvent::CursorDown => {}
            InputEvent::Submit => return self.submit(),
            InputEvent::Cancel => return EditOutcome::Cancelled,
            InputEvent::MenuUp
            | InputEvent::MenuDown
            | InputEvent::MenuConfirm
            | InputEvent::MenuDirect(_) => {}
        }
        EditOutcome::Continue
    }

    fn submit(&mut self) -> EditOutcome {
        if self.is_blank() {
            *self = Self::default();
            return EditOutcome::Absorbed;
        }
        self.committed.push(std::mem::take(&mut self.current));
        self.cursor = 0;
        EditOutcome::Committed(self.committed.join("\n").trim().to_string())
    }
}

/// Insert one char at the current cursor position.
fn insert_char_at_cursor(buffer: &mut String, cursor: &mut usize, ch: char) {
    let byte_idx = byte_index_at_char(buffer, *cursor);
    buffer.insert(byte_idx, ch);
    *cursor += 1;
}

/// Delete one char immediately before cursor.
fn delete_char_before_cursor(buffer: &mut String, cursor: &mut usize) {
    let start = byte_index_at_char(buffer, *cursor - 1);
    let end = byte_index_at_char(buffer, *cursor);
    buffer.replace_range(start..end, "");
    *cursor -= 1;
}

/// Convert a char index to a byte index, preserving UTF-8 boundaries.
pub(crate) fn byte_index_at_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Slice `s` by char indices, clamping to the string end.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let start = byte_index_at_char(s, start);
    let end = byte_index_at_char(s, end).max(start);
    &s[start..end]
}

/// Return total char count for a UTF-8 string.
pub(crate) fn char_count(s: &str) -> usize {
    s.chars().count()
}

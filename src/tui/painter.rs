//! Incremental terminal repaint for the editor and full repaint for menus.
//!
//! The painter never writes to the terminal itself. Each call returns the
//! bytes needed to bring the screen from the last painted state to the new
//! one; the caller owns the sink and flushing.

use crate::tui::input_buffer::{char_slice, LineEditBuffer};
use crate::tui::menu::MenuState;
use crate::tui::prompt::{write_continuation_prompt, write_primary_prompt, PromptChrome};
use crate::tui::settings;
use crossterm::cursor::{MoveLeft, MoveRight, MoveTo};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io;
use unicode_width::UnicodeWidthStr;

/// What the visible editor row looked like after the last paint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EditorSnapshot {
    committed: usize,
    line: String,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RenderState {
    Blank,
    Editor(EditorSnapshot),
    Menu,
}

/// Turns editor and menu state into terminal escape sequences.
#[derive(Debug, Clone)]
pub struct TerminalPainter {
    chrome: PromptChrome,
    last: RenderState,
}

impl TerminalPainter {
    pub fn new(chrome: PromptChrome) -> Self {
        Self {
            chrome,
            last: RenderState::Blank,
        }
    }

    pub fn chrome(&self) -> &PromptChrome {
        &self.chrome
    }

    /// Start a new editing session at the current cursor row.
    pub fn begin_editor(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        write_primary_prompt(&mut out, &self.chrome)?;
        self.last = RenderState::Editor(EditorSnapshot::default());
        Ok(out)
    }

    /// Bytes that make the current row match `buffer`.
    pub fn paint_editor(&mut self, buffer: &LineEditBuffer) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut prev = match std::mem::replace(&mut self.last, RenderState::Blank) {
            RenderState::Editor(snapshot) => snapshot,
            RenderState::Blank | RenderState::Menu => {
                write_primary_prompt(&mut out, &self.chrome)?;
                EditorSnapshot::default()
            }
        };

        let committed = buffer.committed().len();
        if committed != prev.committed {
            out.queue(Print("\r\n"))?;
            if committed == prev.committed + 1 {
                write_continuation_prompt(&mut out, &self.chrome)?;
            } else {
                write_primary_prompt(&mut out, &self.chrome)?;
            }
            prev = EditorSnapshot {
                committed,
                ..EditorSnapshot::default()
            };
        }

        let line = buffer.current_line();
        let cursor = buffer.cursor();
        if line == prev.line {
            move_between(&mut out, line, prev.cursor, cursor)?;
        } else {
            let start = common_prefix_chars(&prev.line, line)
                .min(prev.cursor)
                .min(cursor);
            move_left(&mut out, width(char_slice(&prev.line, start, prev.cursor)))?;
            let old_tail = width(char_slice(&prev.line, start, usize::MAX));
            let new_tail = char_slice(line, start, usize::MAX);
            if width(new_tail) < old_tail {
                out.queue(Clear(ClearType::UntilNewLine))?;
            }
            if !new_tail.is_empty() {
                out.queue(Print(new_tail))?;
            }
            move_left(&mut out, width(char_slice(line, cursor, usize::MAX)))?;
        }

        self.last = RenderState::Editor(EditorSnapshot {
            committed,
            line: line.to_string(),
            cursor,
        });
        Ok(out)
    }

    /// Fresh primary prompt on the next row after a blank submit.
    pub fn restart_prompt(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        out.queue(Print("\r\n"))?;
        write_primary_prompt(&mut out, &self.chrome)?;
        self.last = RenderState::Editor(EditorSnapshot::default());
        Ok(out)
    }

    /// Leave the editor row after a commit or cancel.
    pub fn finish_editor(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        out.queue(Print("\r\n"))?;
        self.last = RenderState::Blank;
        Ok(out)
    }

    /// Full repaint of the menu.
    pub fn paint_menu(&mut self, menu: &MenuState, title: &str) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        clear_screen(&mut out)?;
        let color = self.chrome.color;

        if color {
            out.queue(PrintStyledContent(
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
            ))?;
            out.queue(Print(" "))?;
            out.queue(PrintStyledContent(
                title.with(settings::COLOR_SECTION_TITLE).bold(),
            ))?;
        } else {
            out.queue(Print(format!("{} {title}", settings::GLYPH_SECTION_BULLET)))?;
        }

        out.queue(Print("\r\n"))?;
        out.queue(Print(settings::MENU_INDENT))?;
        if color {
            out.queue(PrintStyledContent(
                settings::MENU_HELP.with(settings::COLOR_MENU_HELP),
            ))?;
        } else {
            out.queue(Print(settings::MENU_HELP))?;
        }

        for (idx, option) in menu.options().iter().enumerate() {
            let active = idx == menu.selected();
            let marker = settings::menu_marker(active, color);
            let number = if idx < settings::MENU_MAX_SHORTCUT {
                format!("{}.", idx + 1)
            } else {
                "  ".to_string()
            };
            out.queue(Print("\r\n"))?;
            out.queue(Print(settings::MENU_INDENT))?;
            if color {
                let (marker_color, label_color) = if active {
                    (
                        settings::COLOR_MENU_SELECTED,
                        settings::COLOR_MENU_LABEL_SELECTED,
                    )
                } else {
                    (settings::COLOR_MENU_UNSELECTED, settings::COLOR_MENU_LABEL)
                };
                out.queue(PrintStyledContent(marker.with(marker_color)))?;
                out.queue(Print(format!(" {number} ")))?;
                out.queue(PrintStyledContent(option.label.as_str().with(label_color)))?;
                if !option.description.is_empty() {
                    out.queue(Print("  "))?;
                    out.queue(PrintStyledContent(
                        option
                            .description
                            .as_str()
                            .with(settings::COLOR_MENU_DESCRIPTION),
                    ))?;
                }
            } else {
                out.queue(Print(format!("{marker} {number} {}", option.label)))?;
                if !option.description.is_empty() {
                    out.queue(Print(format!("  {}", option.description)))?;
                }
            }
        }

        self.last = RenderState::Menu;
        Ok(out)
    }

    /// Wipe the menu once a choice is made.
    pub fn finish_menu(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        clear_screen(&mut out)?;
        self.last = RenderState::Blank;
        Ok(out)
    }
}

fn clear_screen(out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    out.queue(Clear(ClearType::Purge))?;
    out.queue(MoveTo(0, 0))?;
    Ok(())
}

fn move_between(out: &mut Vec<u8>, line: &str, from: usize, to: usize) -> io::Result<()> {
    if to < from {
        move_left(out, width(char_slice(line, to, from)))
    } else {
        move_right(out, width(char_slice(line, from, to)))
    }
}

fn move_left(out: &mut Vec<u8>, cols: usize) -> io::Result<()> {
    match cols {
        0 => {}
        1 => {
            out.queue(Print("\x08"))?;
        }
        n => {
            out.queue(MoveLeft(clamp_cols(n)))?;
        }
    }
    Ok(())
}

fn move_right(out: &mut Vec<u8>, cols: usize) -> io::Result<()> {
    if cols > 0 {
        out.queue(MoveRight(clamp_cols(cols)))?;
    }
    Ok(())
}

fn clamp_cols(cols: usize) -> u16 {
    u16::try_from(cols).unwrap_or(u16::MAX)
}

fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

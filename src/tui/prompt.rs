//! Prompt rendering helpers for the line editor.

use crate::tui::settings;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Prompt strings and styling for one editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptChrome {
    /// Shown before the first line.
    pub primary: String,
    /// Shown before every line started with Shift+Enter.
    pub continuation: String,
    /// Whether prompts are styled.
    pub color: bool,
}

impl Default for PromptChrome {
    fn default() -> Self {
        Self {
            primary: settings::PROMPT_PRIMARY.to_string(),
            continuation: settings::PROMPT_CONTINUATION.to_string(),
            color: true,
        }
    }
}

/// Queue the primary prompt.
pub(crate) fn write_primary_prompt<W>(out: &mut W, chrome: &PromptChrome) -> io::Result<()>
where
    W: Write + QueueableCommand,
{
    write_prompt(out, &chrome.primary, chrome.color, |body| {
        body.with(settings::COLOR_PROMPT).bold()
    })
}

/// Queue the continuation prompt used for multiline entry.
pub(crate) fn write_continuation_prompt<W>(out: &mut W, chrome: &PromptChrome) -> io::Result<()>
where
    W: Write + QueueableCommand,
{
    write_prompt(out, &chrome.continuation, chrome.color, |body| {
        body.with(settings::COLOR_CONTINUATION_PROMPT)
    })
}

/// Style the visible part of a prompt and keep its trailing padding plain.
fn write_prompt<W, F>(out: &mut W, prompt: &str, color: bool, style: F) -> io::Result<()>
where
    W: Write + QueueableCommand,
    F: FnOnce(&str) -> crossterm::style::StyledContent<&str>,
{
    if !color {
        out.queue(Print(prompt))?;
        return Ok(());
    }
    let body = prompt.trim_end();
    let padding = &prompt[body.len()..];
    if !body.is_empty() {
        out.queue(PrintStyledContent(style(body)))?;
    }
    if !padding.is_empty() {
        out.queue(Print(padding))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> PromptChrome {
        PromptChrome {
            color: false,
            ..PromptChrome::default()
        }
    }

    #[test]
    fn plain_prompts_are_written_verbatim() {
        let mut out = Vec::new();
        write_primary_prompt(&mut out, &plain()).unwrap();
        write_continuation_prompt(&mut out, &plain()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "> ... ");
    }

    #[test]
    fn colored_prompt_keeps_padding_outside_style() {
        let mut out = Vec::new();
        write_primary_prompt(&mut out, &PromptChrome::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b["), "expected styling: {text:?}");
        assert!(text.contains('>'));
        assert!(text.ends_with(' '));
    }
}

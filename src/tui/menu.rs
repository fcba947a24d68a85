//! Menu selection over a fixed, ordered list of options.

use crate::error::InputError;
use crate::tui::decoder::InputEvent;

/// Key reported when a menu is cancelled with Ctrl+C.
///
/// Callers that list an explicit exit entry should give it this key so both
/// paths end up in the same branch.
pub const EXIT_KEY: &str = "exit";

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Value returned when this entry is chosen.
    pub key: String,
    /// Short text shown in the list.
    pub label: String,
    /// Dimmed detail shown after the label; may be empty.
    pub description: String,
}

impl MenuOption {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Result of applying one event to a [`MenuState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Continue,
    /// The key of the chosen option.
    Selected(String),
    Cancelled,
}

impl MenuOutcome {
    /// Chosen key, with cancellation folded into [`EXIT_KEY`].
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Continue => None,
            Self::Selected(key) => Some(key),
            Self::Cancelled => Some(EXIT_KEY),
        }
    }

    /// True for cancellation and for an explicit exit entry.
    pub fn is_exit(&self) -> bool {
        self.key() == Some(EXIT_KEY)
    }
}

/// Options in display order plus the highlighted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    options: Vec<MenuOption>,
    selected: usize,
}

impl MenuState {
    /// Build a menu with the first option highlighted.
    pub fn new(options: Vec<MenuOption>) -> Result<Self, InputError> {
        if options.is_empty() {
            return Err(InputError::EmptyMenu);
        }
        Ok(Self {
            options,
            selected: 0,
        })
    }

    /// Start with `index` highlighted, clamped to the last option.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected = index.min(self.options.len() - 1);
        self
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> &MenuOption {
        &self.options[self.selected]
    }

    /// Apply one decoded event.
    pub fn apply(&mut self, event: &InputEvent) -> MenuOutcome {
        let n = self.options.len();
        match *event {
            InputEvent::MenuUp => {
                self.selected = (self.selected + n - 1) % n;
            }
            InputEvent::MenuDown => {
                self.selected = (self.selected + 1) % n;
            }
            InputEvent::MenuConfirm => {
                return MenuOutcome::Selected(self.selected_option().key.clone());
            }
            InputEvent::MenuDirect(digit) => {
                let digit = usize::from(digit);
                if (1..=n).contains(&digit) {
                    return MenuOutcome::Selected(self.options[digit - 1].key.clone());
                }
            }
            InputEvent::Cancel => return MenuOutcome::Cancelled,
            _ => {}
        }
        MenuOutcome::Continue
    }
}

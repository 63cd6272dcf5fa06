//! Searchable choice field
//!
//! A free-text input backed by an [`OptionSet`]. Typing filters the options
//! (case-insensitive substring, original order); picking a candidate fills the
//! field with its exact text; anything else typed is kept as a custom entry.
//!
//! The field is a controlled component: the parent owns the value and passes
//! it into every call. The field only keeps transient state (focus, whether
//! the dropdown is open, the keyboard highlight) and reports new values
//! through the `on_change` callback handed to [`ChoiceField::handle`].

use std::fmt;

use tracing::trace;

use crate::config::OptionsConfig;
use crate::options::{OptionKind, OptionSet};

/// Dropdown visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl fmt::Display for DropdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropdownState::Closed => write!(f, "closed"),
            DropdownState::Open => write!(f, "open"),
        }
    }
}

/// Input events the field understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Input gained focus
    Focus,
    /// Input lost focus
    Blur,
    /// Append a typed character
    InsertChar(char),
    /// Delete the last character
    Backspace,
    /// Replace the whole text (paste)
    Input(String),
    /// Empty the field
    Clear,
    /// Move the keyboard highlight down (opens a closed dropdown)
    HighlightNext,
    /// Move the keyboard highlight up
    HighlightPrev,
    /// Pointer activation of the candidate at this index
    Select(usize),
    /// Enter: pick the highlighted candidate, or keep the typed text
    Activate,
    /// Esc: close the dropdown, keep the typed text
    Dismiss,
}

/// Whether the field consumed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Not meaningful in the current state; the page may use the key itself
    Ignored,
    /// Transient state and/or value changed
    Handled,
    /// A candidate was picked
    Selected,
}

/// Everything a renderer needs to draw the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub state: DropdownState,
    /// Candidate set for `value`, in option order
    pub candidates: Vec<&'a str>,
    /// Index into `candidates`
    pub highlighted: Option<usize>,
    /// Non-empty and not one of the options
    pub custom: bool,
}

impl FieldView<'_> {
    /// Text to show in the input box
    pub fn display_text(&self) -> &str {
        if self.value.is_empty() {
            self.placeholder
        } else {
            self.value
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }
}

/// Transient state of one searchable choice field
#[derive(Debug, Clone)]
pub struct ChoiceField {
    options: OptionSet,
    placeholder: String,
    focused: bool,
    state: DropdownState,
    highlighted: Option<usize>,
}

impl ChoiceField {
    pub fn new(options: OptionSet, placeholder: impl Into<String>) -> Self {
        Self {
            options,
            placeholder: placeholder.into(),
            focused: false,
            state: DropdownState::Closed,
            highlighted: None,
        }
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Whether `value` would be kept as a custom entry
    pub fn is_custom(&self, value: &str) -> bool {
        !value.is_empty() && !self.options.contains(value)
    }

    /// Apply one event.
    ///
    /// `value` is the parent's current value. `on_change` is called with the
    /// new value whenever the event changes it, and never otherwise.
    pub fn handle<F>(&mut self, value: &str, event: FieldEvent, mut on_change: F) -> Response
    where
        F: FnMut(&str),
    {
        match event {
            FieldEvent::Focus => {
                self.focused = true;
                self.highlighted = None;
                let next = self.visible_state(value);
                self.transition(next, "focus");
                Response::Handled
            }
            FieldEvent::Blur => {
                self.focused = false;
                self.highlighted = None;
                self.transition(DropdownState::Closed, "blur");
                Response::Handled
            }
            FieldEvent::InsertChar(c) => {
                let mut next = String::with_capacity(value.len() + c.len_utf8());
                next.push_str(value);
                next.push(c);
                self.edit(&next, &mut on_change);
                Response::Handled
            }
            FieldEvent::Backspace => {
                let mut next = value.to_string();
                if next.pop().is_some() {
                    self.edit(&next, &mut on_change);
                }
                Response::Handled
            }
            FieldEvent::Input(text) => {
                if text != value {
                    self.edit(&text, &mut on_change);
                }
                Response::Handled
            }
            FieldEvent::Clear => {
                if !value.is_empty() {
                    self.edit("", &mut on_change);
                } else {
                    self.highlighted = None;
                    self.transition(DropdownState::Closed, "clear");
                }
                Response::Handled
            }
            FieldEvent::HighlightNext => self.move_highlight(value, true),
            FieldEvent::HighlightPrev => self.move_highlight(value, false),
            FieldEvent::Select(index) => self.select(value, index, &mut on_change),
            FieldEvent::Activate => {
                if self.state != DropdownState::Open {
                    return Response::Ignored;
                }
                match self.highlighted {
                    Some(index) => self.select(value, index, &mut on_change),
                    None => {
                        // Keep the typed text as-is
                        self.transition(DropdownState::Closed, "activate");
                        Response::Handled
                    }
                }
            }
            FieldEvent::Dismiss => {
                if self.state != DropdownState::Open {
                    return Response::Ignored;
                }
                self.highlighted = None;
                self.transition(DropdownState::Closed, "dismiss");
                Response::Handled
            }
        }
    }

    /// Project transient state plus the parent's value into a renderable view
    pub fn view<'a>(&'a self, value: &'a str) -> FieldView<'a> {
        let candidates = self.options.candidates(value);
        let open =
            self.state == DropdownState::Open && self.focused && !candidates.is_empty();
        let highlighted = self.highlighted.filter(|idx| open && *idx < candidates.len());

        FieldView {
            value,
            placeholder: &self.placeholder,
            focused: self.focused,
            state: if open {
                DropdownState::Open
            } else {
                DropdownState::Closed
            },
            candidates,
            highlighted,
            custom: self.is_custom(value),
        }
    }

    /// Report `next` to the parent and recompute visibility for it
    fn edit<F>(&mut self, next: &str, on_change: &mut F)
    where
        F: FnMut(&str),
    {
        on_change(next);
        self.highlighted = None;

        let state = if next.is_empty() {
            DropdownState::Closed
        } else {
            self.visible_state(next)
        };
        self.transition(state, "edit");
    }

    fn select<F>(&mut self, value: &str, index: usize, on_change: &mut F) -> Response
    where
        F: FnMut(&str),
    {
        let Some(&picked) = self.options.candidates(value).get(index) else {
            return Response::Ignored;
        };
        let picked = picked.to_string();

        on_change(&picked);
        self.highlighted = None;
        self.transition(DropdownState::Closed, "select");
        trace!(kind = ?self.options.kind(), value = %picked, "candidate selected");
        Response::Selected
    }

    fn move_highlight(&mut self, value: &str, forward: bool) -> Response {
        if !self.focused {
            return Response::Ignored;
        }

        let count = self.options.candidate_indices(value).len();
        if count == 0 {
            return Response::Ignored;
        }

        if self.state == DropdownState::Closed {
            self.highlighted = None;
            self.transition(DropdownState::Open, "highlight");
            return Response::Handled;
        }

        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(idx), true) => (idx + 1) % count,
            (Some(idx), false) => idx.checked_sub(1).unwrap_or(count - 1).min(count - 1),
        });
        Response::Handled
    }

    /// Open if focused and `value` has candidates, closed otherwise
    fn visible_state(&self, value: &str) -> DropdownState {
        if self.focused && !self.options.candidate_indices(value).is_empty() {
            DropdownState::Open
        } else {
            DropdownState::Closed
        }
    }

    fn transition(&mut self, next: DropdownState, cause: &'static str) {
        if self.state != next {
            trace!(
                kind = ?self.options.kind(),
                from = %self.state,
                to = %next,
                cause,
                "dropdown transition"
            );
            self.state = next;
        }
    }
}

/// Condition picker over the configured medical-condition set
pub fn medical_condition_select(
    options: &OptionsConfig,
    placeholder: impl Into<String>,
) -> ChoiceField {
    ChoiceField::new(options.option_set(OptionKind::MedicalConditions), placeholder)
}

/// Allergy picker over the configured allergy set
pub fn allergy_select(options: &OptionsConfig, placeholder: impl Into<String>) -> ChoiceField {
    ChoiceField::new(options.option_set(OptionKind::Allergies), placeholder)
}

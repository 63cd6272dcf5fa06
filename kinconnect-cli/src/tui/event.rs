//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use kinconnect_core::{FieldEvent, Invitation};

use super::app::{App, Route};
use super::ui::HitMap;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling an input event
#[derive(Debug)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Go to another page
    Navigate(Route),
    /// Show a message in the bottom bar
    Status(String),
    /// Drop the bottom-bar message so key hints show again
    ClearStatus,
    /// The invite form reported a successful submission
    InvitationSent(Invitation),
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Ignore release/repeat reports from terminals that send them
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    // Global shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            KeyCode::Char('g') => return HandleResult::Navigate(Route::Home),
            KeyCode::Char('d') => return HandleResult::Navigate(Route::Dashboard),
            _ => {}
        }
    }

    match app.route {
        Route::Home => app.home.handle_key(key),
        Route::Dashboard => app.dashboard.handle_key(key),
        Route::DropdownTest => app.dropdown_test.handle_key(key),
        Route::InvitePatient => app.invite.handle_key(key, &mut app.sender),
    }
}

/// Handle a mouse event against the regions drawn last frame
pub fn handle_mouse(app: &mut App, hits: &HitMap, mouse: MouseEvent) -> HandleResult {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return HandleResult::Continue;
    };
    let Some(target) = hits.at(mouse.column, mouse.row) else {
        return HandleResult::Continue;
    };

    match app.route {
        Route::Home => app.home.handle_click(target),
        Route::Dashboard => app.dashboard.handle_click(target),
        Route::DropdownTest => app.dropdown_test.handle_click(target),
        Route::InvitePatient => app.invite.handle_click(target, &mut app.sender),
    }
}

/// Handle a bracketed paste into whatever input has focus
pub fn handle_paste(app: &mut App, text: &str) -> HandleResult {
    let text = single_line(text);
    if text.is_empty() {
        return HandleResult::Continue;
    }

    match app.route {
        Route::DropdownTest => app.dropdown_test.handle_paste(&text),
        Route::InvitePatient => app.invite.handle_paste(&text),
        Route::Home | Route::Dashboard => HandleResult::Continue,
    }
}

/// Inputs are single-line: line breaks and tabs become spaces
fn single_line(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .replace("\r\n", "\n")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Translate a key press into an event for a focused choice field
pub fn field_event(key: KeyEvent) -> Option<FieldEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(FieldEvent::Clear),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(FieldEvent::InsertChar(c)),
        KeyCode::Backspace => Some(FieldEvent::Backspace),
        KeyCode::Down => Some(FieldEvent::HighlightNext),
        KeyCode::Up => Some(FieldEvent::HighlightPrev),
        KeyCode::Enter => Some(FieldEvent::Activate),
        KeyCode::Esc => Some(FieldEvent::Dismiss),
        _ => None,
    }
}

/// Apply a key press to a plain text input; returns whether it was consumed
pub fn edit_text(value: &mut String, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => {
            value.clear();
            true
        }
        KeyCode::Char(_) if ctrl => false,
        KeyCode::Char(c) => {
            value.push(c);
            true
        }
        KeyCode::Backspace => {
            value.pop();
            true
        }
        _ => false,
    }
}

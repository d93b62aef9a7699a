use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::backend::copy_to_clipboard;
use crate::app::{App, Focus};
use crate::engine::QueryEngine;

/// Ctrl+Y copies whatever the focused component shows
///
/// Returns true if the key was handled.
pub fn handle_clipboard_key<E: QueryEngine>(app: &mut App<E>, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('y') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return copy_focused_content(app);
    }
    false
}

fn copy_focused_content<E: QueryEngine>(app: &mut App<E>) -> bool {
    let (text, what) = match app.focus {
        Focus::FragmentField => (app.fragment_field.text().to_string(), "start fragment"),
        Focus::QueryPicker | Focus::Editor => (app.controller.query_text().to_string(), "query"),
        Focus::Results => (app.controller.results().text().to_string(), "results"),
        Focus::Log => (app.controller.log().text().to_string(), "log"),
    };
    if text.is_empty() {
        return false;
    }

    match copy_to_clipboard(&text, app.clipboard_backend) {
        Ok(()) => {
            app.notification.show(&format!("Copied {}!", what));
            true
        }
        Err(e) => {
            log::warn!("Copy failed: {}", e);
            app.notification.show_warning(&e.to_string());
            true
        }
    }
}

#[cfg(test)]
#[path = "clipboard_events_tests.rs"]
mod clipboard_events_tests;

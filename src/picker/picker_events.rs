use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::widget::{ComboOption, Selection};

/// What a key did to an open dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownOutcome {
    /// The dropdown consumed the key
    Handled,
    /// The dropdown closed; carries the new value if it changed
    Confirmed(Option<String>),
}

pub fn handle_dropdown_key<T: ComboOption>(
    selection: &mut Selection<T>,
    key: KeyEvent,
) -> DropdownOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => selection.close(),
        KeyCode::Enter => return DropdownOutcome::Confirmed(selection.confirm()),
        KeyCode::Down | KeyCode::Tab => selection.highlight_next(),
        KeyCode::Up | KeyCode::BackTab => selection.highlight_previous(),
        KeyCode::Char('n') if ctrl => selection.highlight_next(),
        KeyCode::Char('p') if ctrl => selection.highlight_previous(),
        KeyCode::Backspace => {
            let mut filter = selection.filter().to_string();
            filter.pop();
            selection.set_filter(&filter);
        }
        KeyCode::Char(c) if !ctrl => {
            let filter = format!("{}{}", selection.filter(), c);
            selection.set_filter(&filter);
        }
        _ => {}
    }
    DropdownOutcome::Handled
}

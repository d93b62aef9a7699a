use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::scroll::ScrollState;

/// Scrolling keys shared by the results and log panes
///
/// Returns true if the key was handled.
pub fn handle_pane_key(scroll: &mut ScrollState, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => scroll.page_up(),
        KeyCode::Char('d') if ctrl => scroll.page_down(),
        KeyCode::PageUp => scroll.page_up(),
        KeyCode::PageDown => scroll.page_down(),
        _ if ctrl => return false,

        KeyCode::Up | KeyCode::Char('k') => scroll.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => scroll.scroll_down(1),
        KeyCode::Char('K') => scroll.scroll_up(10),
        KeyCode::Char('J') => scroll.scroll_down(10),

        KeyCode::Left | KeyCode::Char('h') => scroll.scroll_left(1),
        KeyCode::Right | KeyCode::Char('l') => scroll.scroll_right(1),
        KeyCode::Char('H') => scroll.scroll_left(10),
        KeyCode::Char('L') => scroll.scroll_right(10),
        KeyCode::Char('0') | KeyCode::Char('^') => scroll.jump_to_left(),
        KeyCode::Char('$') => scroll.jump_to_right(),

        KeyCode::Home | KeyCode::Char('g') => scroll.jump_to_top(),
        KeyCode::End | KeyCode::Char('G') => scroll.jump_to_bottom(),
        _ => return false,
    }
    true
}

#[cfg(test)]
#[path = "results_events_tests.rs"]
mod results_events_tests;

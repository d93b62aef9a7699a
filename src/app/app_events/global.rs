use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app_state::{App, Focus, OutputMode};
use crate::engine::QueryEngine;

/// Keys that work regardless of focus; returns true if handled
pub fn handle_global_keys<E: QueryEngine>(app: &mut App<E>, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('o') if ctrl => {
            app.output_mode = Some(OutputMode::Results);
            app.should_quit = true;
            true
        }
        KeyCode::Char('q') if ctrl => {
            app.output_mode = Some(OutputMode::Query);
            app.should_quit = true;
            true
        }
        KeyCode::Char('q') if matches!(app.focus, Focus::Results | Focus::Log) => {
            app.should_quit = true;
            true
        }

        KeyCode::F(5) => {
            app.execute();
            true
        }
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.execute();
            true
        }
        KeyCode::Esc if app.controller.is_running() => {
            app.controller.stop_execution(None);
            app.controller.logger().info("Execution stopped");
            true
        }

        KeyCode::Tab if !ctrl => {
            app.set_focus(app.focus.next());
            true
        }
        KeyCode::BackTab => {
            app.set_focus(app.focus.previous());
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "global_tests.rs"]
mod global_tests;

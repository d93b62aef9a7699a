use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::app_state::{App, Focus};
use crate::clipboard;
use crate::engine::QueryEngine;
use crate::picker::picker_events::{DropdownOutcome, handle_dropdown_key};
use crate::results::results_events;
use crate::widget::WidgetEvent;

mod global;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

impl<E: QueryEngine> App<E> {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.poll_controller();

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(text);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Let the controller process background work, then catch up with it
    ///
    /// Returns true if anything visible changed.
    pub fn poll_controller(&mut self) -> bool {
        let changed = self.controller.poll();
        self.process_widget_events();
        self.sync_from_controller();
        changed
    }

    fn process_widget_events(&mut self) {
        for widget_event in self.controller.take_events() {
            match widget_event {
                WidgetEvent::QuerySetChanged(key) => {
                    self.notification.show(&format!("Query set: {}", key));
                }
                WidgetEvent::CollectionLoadFailed(message) => {
                    self.notification.show_warning(&message);
                }
                WidgetEvent::ExecutionStarted => {
                    self.notification.dismiss();
                }
            }
        }
    }

    pub(super) fn handle_paste_event(&mut self, text: String) {
        match self.focus {
            Focus::FragmentField => {
                self.fragment_field.paste(&text);
            }
            Focus::Editor => {
                if let Some(query) = self.editor.paste(&text) {
                    self.controller.edit_query(&query);
                }
            }
            Focus::QueryPicker | Focus::Results | Focus::Log => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let handled = self.handle_open_dropdown_key(key)
            || global::handle_global_keys(self, key)
            || clipboard::clipboard_events::handle_clipboard_key(self, key);
        if !handled {
            self.handle_focused_key(key);
        }

        self.process_widget_events();
        self.sync_from_controller();
    }

    /// An open dropdown takes every key except Ctrl+C
    fn handle_open_dropdown_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        if self.controller.fragment_picker().is_open() {
            let outcome = handle_dropdown_key(self.controller.fragment_picker_mut(), key);
            if let DropdownOutcome::Confirmed(Some(url)) = outcome {
                self.fragment_field.sync(&url);
                self.controller.select_start_fragment(&url);
            }
            return true;
        }

        if self.controller.query_picker().is_open() {
            let outcome = handle_dropdown_key(self.controller.query_picker_mut(), key);
            if let DropdownOutcome::Confirmed(Some(sparql)) = outcome {
                self.controller.select_query(&sparql);
            }
            return true;
        }

        false
    }

    fn handle_focused_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::FragmentField => match key.code {
                KeyCode::Enter => self.commit_fragment_field(),
                KeyCode::Down if !self.controller.fragment_picker().options().is_empty() => {
                    self.controller.fragment_picker_mut().open();
                }
                _ => {
                    self.fragment_field.handle_key(key);
                }
            },
            Focus::QueryPicker => {
                let opens = matches!(key.code, KeyCode::Enter | KeyCode::Down | KeyCode::Char(' '));
                if opens && !self.controller.query_picker().options().is_empty() {
                    self.controller.query_picker_mut().open();
                }
            }
            Focus::Editor => {
                if let Some(query) = self.editor.handle_key(key) {
                    self.controller.edit_query(&query);
                }
            }
            Focus::Results => {
                results_events::handle_pane_key(&mut self.controller.results_mut().scroll, key);
            }
            Focus::Log => {
                results_events::handle_pane_key(&mut self.controller.log_mut().scroll, key);
            }
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;

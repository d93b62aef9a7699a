use crate::config::{ClipboardBackend, Config};
use crate::editor::QueryEditor;
use crate::engine::{LdfEngine, QueryEngine};
use crate::input::FragmentField;
use crate::notification::NotificationState;
use crate::widget::QueryController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FragmentField,
    QueryPicker,
    Editor,
    Results,
    Log,
}

impl Focus {
    /// Tab order
    pub fn next(self) -> Self {
        match self {
            Focus::FragmentField => Focus::QueryPicker,
            Focus::QueryPicker => Focus::Editor,
            Focus::Editor => Focus::Results,
            Focus::Results => Focus::Log,
            Focus::Log => Focus::FragmentField,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::FragmentField => Focus::Log,
            Focus::QueryPicker => Focus::FragmentField,
            Focus::Editor => Focus::QueryPicker,
            Focus::Results => Focus::Editor,
            Focus::Log => Focus::Results,
        }
    }
}

/// What to print after the terminal is restored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Results,
    Query,
}

pub struct App<E: QueryEngine = LdfEngine> {
    pub controller: QueryController<E>,
    pub focus: Focus,
    pub fragment_field: FragmentField,
    pub editor: QueryEditor,
    pub output_mode: Option<OutputMode>,
    pub should_quit: bool,
    pub notification: NotificationState,
    pub clipboard_backend: ClipboardBackend,
}

impl<E: QueryEngine> App<E> {
    pub fn new(controller: QueryController<E>, config: &Config) -> Self {
        let mut app = Self {
            controller,
            focus: Focus::Editor,
            fragment_field: FragmentField::new(),
            editor: QueryEditor::new(),
            output_mode: None,
            should_quit: false,
            notification: NotificationState::new(),
            clipboard_backend: config.clipboard.backend,
        };
        app.sync_from_controller();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn output_mode(&self) -> Option<OutputMode> {
        self.output_mode
    }

    /// Text the query editor currently holds
    pub fn query(&self) -> &str {
        self.controller.query_text()
    }

    /// Pull programmatic changes (picked query, selected start fragment)
    /// into the text widgets
    pub fn sync_from_controller(&mut self) {
        self.editor
            .sync(self.controller.query_text(), self.controller.query_revision());
        if self.focus != Focus::FragmentField || !self.fragment_field.is_dirty() {
            self.fragment_field
                .sync(self.controller.fragment_picker().value());
        }
    }

    /// Hand typed fragment field text to the controller
    pub fn commit_fragment_field(&mut self) {
        if let Some(url) = self.fragment_field.commit() {
            log::debug!("Start fragment field committed: {}", url);
            self.controller.select_start_fragment(&url);
            self.sync_from_controller();
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus == Focus::FragmentField && focus != Focus::FragmentField {
            self.commit_fragment_field();
        }
        self.controller.fragment_picker_mut().close();
        self.controller.query_picker_mut().close();
        self.focus = focus;
    }

    /// Run the editor's query against the fragment field's start fragments
    pub fn execute(&mut self) {
        self.commit_fragment_field();
        self.controller.execute();
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;

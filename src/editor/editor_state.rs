use ratatui::crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::theme;

pub struct QueryEditor {
    pub textarea: TextArea<'static>,
    /// Controller query revision the textarea was last loaded from
    revision: Option<u64>,
}

impl Default for QueryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEditor {
    pub fn new() -> Self {
        Self {
            textarea: editor_textarea(""),
            revision: None,
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Load `text` if the controller changed it since the last sync
    pub fn sync(&mut self, text: &str, revision: u64) {
        if self.revision == Some(revision) {
            return;
        }
        self.textarea = editor_textarea(text);
        self.revision = Some(revision);
    }

    /// Forward an editing key; returns the new text if it changed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        self.textarea.input(key).then(|| self.text())
    }

    pub fn paste(&mut self, text: &str) -> Option<String> {
        self.textarea.insert_str(text).then(|| self.text())
    }
}

fn editor_textarea(text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::from(text.split('\n').map(str::to_string));
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(theme::palette::CURSOR);
    textarea
}

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::theme;

pub struct FragmentField {
    pub textarea: TextArea<'static>,
    /// Last value exchanged with the controller
    committed: String,
}

impl Default for FragmentField {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentField {
    pub fn new() -> Self {
        Self {
            textarea: single_line(""),
            committed: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.textarea.lines().first().map_or("", String::as_str)
    }

    /// Typed text not yet handed to the controller
    pub fn is_dirty(&self) -> bool {
        self.text() != self.committed
    }

    /// Show `value`, discarding uncommitted typing
    pub fn sync(&mut self, value: &str) {
        if self.committed == value && !self.is_dirty() {
            return;
        }
        self.textarea = single_line(value);
        self.committed = value.to_string();
    }

    /// The typed text, if it differs from what the controller last saw
    pub fn commit(&mut self) -> Option<String> {
        if !self.is_dirty() {
            return None;
        }
        self.committed = self.text().to_string();
        Some(self.committed.clone())
    }

    /// Forward an editing key; newlines are not accepted
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let newline = matches!(key.code, KeyCode::Enter)
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if newline {
            return false;
        }
        self.textarea.input(key)
    }

    /// Insert pasted text, keeping only its first line
    pub fn paste(&mut self, text: &str) -> bool {
        let first_line = text.lines().next().unwrap_or("");
        self.textarea.insert_str(first_line)
    }
}

fn single_line(value: &str) -> TextArea<'static> {
    let mut textarea = TextArea::from([value.to_string()]);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(theme::palette::CURSOR);
    textarea.move_cursor(CursorMove::End);
    textarea
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::key;

    #[test]
    fn test_typing_marks_field_dirty() {
        let mut field = FragmentField::new();
        field.sync("http://fragments.dbpedia.org/2015/en");

        assert!(!field.is_dirty());
        field.handle_key(key(KeyCode::Backspace));

        assert!(field.is_dirty());
        assert_eq!(field.text(), "http://fragments.dbpedia.org/2015/e");
    }

    #[test]
    fn test_commit_returns_changed_text_once() {
        let mut field = FragmentField::new();
        field.paste("http://data.linkeddatafragments.org/viaf");

        assert_eq!(
            field.commit().as_deref(),
            Some("http://data.linkeddatafragments.org/viaf")
        );
        assert_eq!(field.commit(), None);
    }

    #[test]
    fn test_enter_does_not_insert_newline() {
        let mut field = FragmentField::new();
        field.paste("http://a.example.org/");

        assert!(!field.handle_key(key(KeyCode::Enter)));
        assert_eq!(field.textarea.lines().len(), 1);
    }

    #[test]
    fn test_paste_keeps_first_line() {
        let mut field = FragmentField::new();

        field.paste("http://a.example.org/\nhttp://b.example.org/");

        assert_eq!(field.text(), "http://a.example.org/");
    }

    #[test]
    fn test_sync_replaces_uncommitted_text() {
        let mut field = FragmentField::new();
        field.paste("http://typed.example.org/");

        field.sync("http://picked.example.org/");

        assert_eq!(field.text(), "http://picked.example.org/");
        assert!(!field.is_dirty());
    }
}

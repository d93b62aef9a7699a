use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::editor_state::QueryEditor;
use crate::theme;

pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    editor: &mut QueryEditor,
    edited: bool,
    focused: bool,
) {
    let border_color = if focused {
        theme::editor::BORDER_FOCUSED
    } else {
        theme::editor::BORDER_UNFOCUSED
    };

    let mut title = vec![Span::raw(" SPARQL ")];
    if edited {
        title.push(Span::styled(
            "(edited) ",
            Style::default().fg(theme::editor::EDITED_HINT),
        ));
    }

    editor.textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title))
            .border_style(Style::default().fg(border_color)),
    );
    if focused {
        editor.textarea.set_style(Style::default());
        editor.textarea.set_cursor_style(theme::palette::CURSOR);
    } else {
        editor
            .textarea
            .set_style(Style::default().fg(theme::editor::TEXT_UNFOCUSED));
        editor.textarea.set_cursor_style(Style::default());
    }

    frame.render_widget(&editor.textarea, area);
}

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::input_state::FragmentField;
use crate::theme;
use crate::widget::{Selection, StartFragment};

/// Render the fragment field; the title names the selected start fragment
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    field: &mut FragmentField,
    picker: &Selection<StartFragment>,
    focused: bool,
) {
    let border_color = if focused {
        theme::input::BORDER_FOCUSED
    } else {
        theme::input::BORDER_UNFOCUSED
    };

    let mut title = vec![Span::raw(" Start fragment ")];
    if let Some(fragment) = picker.selected()
        && !fragment.name.is_empty()
        && !field.is_dirty()
    {
        title.push(Span::styled(
            format!("{} ", fragment.name),
            Style::default().fg(theme::input::FRAGMENT_NAME),
        ));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(Style::default().fg(border_color));
    if focused && !picker.options().is_empty() {
        block = block.title_bottom(Line::from(" ↓ choose ").right_aligned());
    }

    field.textarea.set_block(block);
    field
        .textarea
        .set_style(Style::default().fg(theme::input::TEXT));
    field.textarea.set_cursor_style(if focused {
        theme::palette::CURSOR
    } else {
        Style::default()
    });

    frame.render_widget(&field.textarea, area);
}

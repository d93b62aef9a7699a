use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::theme;
use crate::widget::{ComboOption, Selection};
use crate::widgets::{popup, scrollbar};

const MAX_VISIBLE_OPTIONS: u16 = 12;

/// The closed query picker: label of the picked query
pub fn render_picker_field<T: ComboOption>(
    frame: &mut Frame,
    area: Rect,
    selection: &Selection<T>,
    edited: bool,
    focused: bool,
) {
    let border_color = if focused {
        theme::picker::BORDER_FOCUSED
    } else {
        theme::picker::BORDER_UNFOCUSED
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" Query ")
        .border_style(Style::default().fg(border_color));
    if focused {
        block = block.title_bottom(Line::from(" ↵ choose ").right_aligned());
    }

    let mut spans = match selection.selected() {
        Some(option) => vec![Span::styled(
            single_line(option.label()),
            Style::default().fg(theme::picker::LABEL),
        )],
        None if selection.options().is_empty() => vec![Span::styled(
            "(no predefined queries)",
            Style::default().fg(theme::picker::PLACEHOLDER),
        )],
        None => vec![Span::styled(
            "(custom query)",
            Style::default().fg(theme::picker::PLACEHOLDER),
        )],
    };
    if edited && selection.selected().is_some() {
        spans.push(Span::styled(
            " *",
            Style::default().fg(theme::picker::EDITED_MARKER),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render an open dropdown below `anchor`
pub fn render_dropdown<T: ComboOption>(
    frame: &mut Frame,
    anchor: Rect,
    selection: &Selection<T>,
    title: &str,
) {
    let options: Vec<&T> = selection.visible_options().collect();
    let height = (options.len() as u16).clamp(1, MAX_VISIBLE_OPTIONS) + 2;
    let area = popup::popup_below_anchor(anchor, frame.area(), anchor.width, height);
    if area.height < 3 {
        return;
    }

    popup::clear_area(frame, area);

    let filter_title = if selection.filter().is_empty() {
        Line::from(format!(" {} ", title))
    } else {
        Line::from(vec![
            Span::raw(format!(" {}: ", title)),
            Span::styled(
                selection.filter().to_string(),
                Style::default().fg(theme::picker::FILTER),
            ),
            Span::raw(" "),
        ])
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(filter_title)
        .border_style(Style::default().fg(theme::picker::DROPDOWN_BORDER))
        .style(Style::default().bg(theme::picker::DROPDOWN_BG));

    if options.is_empty() {
        let empty = Paragraph::new(Span::styled(
            " No matches",
            Style::default().fg(theme::picker::NO_MATCHES),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let viewport = area.height.saturating_sub(2) as usize;
    let first = selection
        .highlighted()
        .saturating_sub(viewport.saturating_sub(1));
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .skip(first)
        .take(viewport)
        .map(|(index, option)| {
            let is_current = option.value() == selection.value();
            let marker = if is_current { "● " } else { "  " };
            let label = single_line(option.label());
            if index == selection.highlighted() {
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", marker, label),
                    Style::default()
                        .fg(theme::picker::ITEM_SELECTED_FG)
                        .bg(theme::picker::ITEM_SELECTED_BG)
                        .add_modifier(theme::picker::ITEM_SELECTED_MODIFIER),
                )))
            } else {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        marker,
                        Style::default().fg(theme::picker::ITEM_CURRENT_INDICATOR),
                    ),
                    Span::styled(label, Style::default().fg(theme::picker::ITEM_NORMAL_FG)),
                ]))
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
    scrollbar::render_vertical_scrollbar(
        frame,
        area,
        options.len(),
        viewport,
        first,
        theme::scrollbar::DEFAULT,
    );
}

/// Labels may be whole queries; show their first line only
fn single_line(label: &str) -> String {
    let mut lines = label.lines();
    let first = lines.next().unwrap_or("").trim().to_string();
    if lines.next().is_some() {
        format!("{} …", first)
    } else {
        first
    }
}

#[cfg(test)]
#[path = "picker_render_tests.rs"]
mod picker_render_tests;

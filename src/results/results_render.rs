use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme;
use crate::widget::TextPane;
use crate::widget::markup::Segment;
use crate::widgets::scrollbar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Results,
    Log,
}

impl PaneKind {
    fn title(self) -> &'static str {
        match self {
            PaneKind::Results => "Results",
            PaneKind::Log => "Log",
        }
    }
}

pub fn render_pane(
    frame: &mut Frame,
    area: Rect,
    pane: &mut TextPane,
    kind: PaneKind,
    focused: bool,
    running: bool,
) {
    let viewport_height = area.height.saturating_sub(2);
    let viewport_width = area.width.saturating_sub(2);
    let line_count = pane.line_count();
    let max_line_width = pane.max_line_width();
    pane.scroll.update_bounds(line_count, viewport_height);
    pane.scroll.update_h_bounds(max_line_width, viewport_width);

    let border_color = if focused {
        theme::results::BORDER_FOCUSED
    } else {
        theme::results::BORDER_UNFOCUSED
    };

    let mut title = vec![Span::styled(
        format!(" {} ", kind.title()),
        Style::default().fg(theme::results::TITLE),
    )];
    if running {
        title.push(Span::styled(
            "● running ",
            Style::default().fg(theme::results::RUNNING),
        ));
    }
    if pane.scroll.following && pane.scroll.max_offset > 0 {
        title.push(Span::styled(
            "↓ following ",
            Style::default().fg(theme::results::FOLLOWING),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(Style::default().fg(border_color));

    let text_color = match kind {
        PaneKind::Results => theme::results::TEXT,
        PaneKind::Log => theme::results::LOG_TEXT,
    };
    let text = visible_text(
        pane,
        pane.scroll.offset as usize,
        viewport_height as usize,
        Style::default().fg(text_color),
    );

    // Only visible lines are built, so vertical scroll is already applied
    let content = Paragraph::new(text)
        .block(block)
        .scroll((0, pane.scroll.h_offset));
    frame.render_widget(content, area);

    scrollbar::render_vertical_scrollbar(
        frame,
        area,
        line_count as usize,
        viewport_height as usize,
        pane.scroll.offset as usize,
        theme::scrollbar::DEFAULT,
    );
}

/// Styled lines `offset..offset + height` with links underlined
fn visible_text(pane: &TextPane, offset: usize, height: usize, style: Style) -> Text<'_> {
    let lines: Vec<Line> = pane
        .line_segments(offset, height)
        .into_iter()
        .map(|segments| {
            let spans: Vec<Span> = segments
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(plain) => Span::styled(plain, style),
                    Segment::Link(url) => Span::styled(url, theme::results::LINK),
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    Text::from(lines)
}

#[cfg(test)]
#[path = "results_render_tests.rs"]
mod results_render_tests;

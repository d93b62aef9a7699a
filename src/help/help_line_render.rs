use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Focus};
use crate::engine::QueryEngine;
use crate::theme;

macro_rules! hints {
    ($($key:literal => $desc:literal),+ $(,)?) => {
        vec![$(($key, $desc)),+]
    };
}

fn get_context_hints<E: QueryEngine>(app: &App<E>) -> Vec<(&'static str, &'static str)> {
    let dropdown_open = app.controller.fragment_picker().is_open()
        || app.controller.query_picker().is_open();

    if dropdown_open {
        return hints!["↑/↓" => "Move", "Enter" => "Select", "Type" => "Filter", "Esc" => "Close"];
    }

    let mut hints = if app.controller.is_running() {
        hints!["Esc" => "Stop"]
    } else {
        hints!["F5" => "Execute"]
    };
    hints.extend(match app.focus {
        Focus::FragmentField => {
            hints!["Enter" => "Apply", "↓" => "Start fragments", "Tab" => "Next", "Ctrl+C" => "Quit"]
        }
        Focus::QueryPicker => {
            hints!["Enter" => "Choose query", "Tab" => "Next", "Ctrl+C" => "Quit"]
        }
        Focus::Editor => {
            hints!["Tab" => "Next", "Ctrl+Y" => "Copy query", "Ctrl+Q" => "Print query", "Ctrl+C" => "Quit"]
        }
        Focus::Results | Focus::Log => {
            hints!["j/k" => "Scroll", "g/G" => "Top/Bottom", "Ctrl+Y" => "Copy", "Ctrl+O" => "Print results", "q" => "Quit"]
        }
    });
    hints
}

fn build_styled_spans(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(theme::help_line::KEY);
    let action_style = Style::default().fg(theme::help_line::ACTION_KEY);
    let desc_style = Style::default().fg(theme::help_line::DESCRIPTION);
    let sep_style = Style::default().fg(theme::help_line::SEPARATOR);

    let mut spans = Vec::with_capacity(hints.len() * 4 + 1);
    spans.push(Span::raw(" "));

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2022} ", sep_style));
        }
        // The first hint is the execute/stop action
        spans.push(Span::styled(*key, if i == 0 { action_style } else { key_style }));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, desc_style));
    }

    spans
}

pub fn render_line<E: QueryEngine>(app: &App<E>, frame: &mut Frame, area: Rect) {
    let hints = get_context_hints(app);
    let spans = build_styled_spans(&hints);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "help_line_render_tests.rs"]
mod help_line_render_tests;

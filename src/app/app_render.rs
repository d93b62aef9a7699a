use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::app_state::{App, Focus};
use crate::editor::render_editor;
use crate::engine::QueryEngine;
use crate::help::help_line_render;
use crate::input::render_field;
use crate::notification::render_notification;
use crate::picker::{render_dropdown, render_picker_field};
use crate::results::{PaneKind, render_pane};

const TOP_ROW_HEIGHT: u16 = 3;
const EDITOR_HEIGHT: u16 = 8;
const LOG_HEIGHT: u16 = 7;

impl<E: QueryEngine> App<E> {
    pub fn render(&mut self, frame: &mut Frame) {
        let [top_area, editor_area, results_area, log_area, help_area] = Layout::vertical([
            Constraint::Length(TOP_ROW_HEIGHT),
            Constraint::Length(EDITOR_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [fragment_area, picker_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Percentage(40)]).areas(top_area);

        let running = self.controller.is_running();
        let query_edited = self.controller.is_query_edited();

        render_field(
            frame,
            fragment_area,
            &mut self.fragment_field,
            self.controller.fragment_picker(),
            self.focus == Focus::FragmentField,
        );
        render_picker_field(
            frame,
            picker_area,
            self.controller.query_picker(),
            query_edited,
            self.focus == Focus::QueryPicker,
        );
        render_editor(
            frame,
            editor_area,
            &mut self.editor,
            query_edited,
            self.focus == Focus::Editor,
        );
        render_pane(
            frame,
            results_area,
            self.controller.results_mut(),
            PaneKind::Results,
            self.focus == Focus::Results,
            running,
        );
        render_pane(
            frame,
            log_area,
            self.controller.log_mut(),
            PaneKind::Log,
            self.focus == Focus::Log,
            false,
        );

        help_line_render::render_line(self, frame, help_area);

        // Dropdowns draw over the panes below their field
        if self.controller.fragment_picker().is_open() {
            render_dropdown(
                frame,
                fragment_area,
                self.controller.fragment_picker(),
                "Start fragments",
            );
        } else if self.controller.query_picker().is_open() {
            render_dropdown(frame, picker_area, self.controller.query_picker(), "Queries");
        }

        render_notification(frame, &mut self.notification);
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;

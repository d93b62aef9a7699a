use super::*;
use crate::widget::{QueryRecord, StartFragment};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn render_to_string(draw: impl FnOnce(&mut Frame)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fragments() -> Selection<StartFragment> {
    let mut selection = Selection::new(false);
    selection.set_options(vec![
        StartFragment::new("http://fragments.dbpedia.org/2015/en", "DBpedia 2015"),
        StartFragment::new("http://data.linkeddatafragments.org/viaf", "VIAF"),
    ]);
    selection.set_value("http://data.linkeddatafragments.org/viaf");
    selection
}

#[test]
fn test_field_shows_selected_label() {
    let mut queries = Selection::new(true);
    queries.set_options(vec![QueryRecord::new("SELECT ?s", "Everything")]);
    queries.set_value("SELECT ?s");

    let output = render_to_string(|f| {
        render_picker_field(f, Rect::new(0, 0, 40, 3), &queries, false, false)
    });

    assert!(output.contains("Query"));
    assert!(output.contains("Everything"));
    assert!(!output.contains('*'));
}

#[test]
fn test_field_marks_edited_query() {
    let mut queries = Selection::new(true);
    queries.set_options(vec![QueryRecord::new("SELECT ?s", "Everything")]);
    queries.set_value("SELECT ?s");

    let output = render_to_string(|f| {
        render_picker_field(f, Rect::new(0, 0, 40, 3), &queries, true, false)
    });

    assert!(output.contains("Everything *"));
}

#[test]
fn test_field_placeholder_without_queries() {
    let queries: Selection<QueryRecord> = Selection::new(true);

    let output = render_to_string(|f| {
        render_picker_field(f, Rect::new(0, 0, 40, 3), &queries, false, true)
    });

    assert!(output.contains("(no predefined queries)"));
}

#[test]
fn test_dropdown_lists_labels_with_current_marker() {
    let mut selection = fragments();
    selection.open();

    let output = render_to_string(|f| {
        render_dropdown(f, Rect::new(0, 0, 50, 3), &selection, "Start fragments")
    });

    assert!(output.contains("Start fragments"));
    assert!(output.contains("  DBpedia 2015"));
    assert!(output.contains("● VIAF"));
}

#[test]
fn test_dropdown_shows_filter_and_no_matches() {
    let mut selection = fragments();
    selection.open();
    selection.set_filter("zzz");

    let output = render_to_string(|f| {
        render_dropdown(f, Rect::new(0, 0, 50, 3), &selection, "Start fragments")
    });

    assert!(output.contains("Start fragments: zzz"));
    assert!(output.contains("No matches"));
}

#[test]
fn test_multiline_label_shows_first_line() {
    assert_eq!(single_line("SELECT ?s\nWHERE { ?s ?p ?o }"), "SELECT ?s …");
    assert_eq!(single_line("  Everything  "), "Everything");
}

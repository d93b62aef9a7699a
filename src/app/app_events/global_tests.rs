use super::*;
use crate::engine::QueryType;
use crate::test_utils::test_helpers::{FakeEngine, key, key_with_mods, test_app};
use crate::widget::{StartFragment, WidgetOptions};

fn app() -> App<FakeEngine> {
    test_app(WidgetOptions {
        start_fragments: vec![StartFragment::new("http://a.example.org/", "A")],
        query: Some("SELECT * { ?s ?p ?o }".to_string()),
        ..WidgetOptions::default()
    })
}

#[test]
fn test_ctrl_c_quits_without_output() {
    let mut app = app();

    assert!(handle_global_keys(
        &mut app,
        key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL)
    ));

    assert!(app.should_quit());
    assert_eq!(app.output_mode(), None);
}

#[test]
fn test_ctrl_o_prints_results() {
    let mut app = app();

    handle_global_keys(&mut app, key_with_mods(KeyCode::Char('o'), KeyModifiers::CONTROL));

    assert!(app.should_quit());
    assert_eq!(app.output_mode(), Some(OutputMode::Results));
}

#[test]
fn test_ctrl_q_prints_query() {
    let mut app = app();

    handle_global_keys(&mut app, key_with_mods(KeyCode::Char('q'), KeyModifiers::CONTROL));

    assert_eq!(app.output_mode(), Some(OutputMode::Query));
}

#[test]
fn test_plain_q_quits_only_from_panes() {
    let mut app = app();
    app.focus = Focus::Editor;
    assert!(!handle_global_keys(&mut app, key(KeyCode::Char('q'))));
    assert!(!app.should_quit());

    app.focus = Focus::Log;
    assert!(handle_global_keys(&mut app, key(KeyCode::Char('q'))));
    assert!(app.should_quit());
}

#[test]
fn test_f5_executes_query() {
    let mut app = app();
    let _run = app.controller.engine().prepare(QueryType::Select);

    assert!(handle_global_keys(&mut app, key(KeyCode::F(5))));

    assert!(app.controller.is_running());
    let calls = app.controller.engine().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "SELECT * { ?s ?p ?o }");
    assert_eq!(calls[0].start_fragments, vec!["http://a.example.org/".to_string()]);
}

#[test]
fn test_alt_enter_executes_query() {
    let mut app = app();
    let _run = app.controller.engine().prepare(QueryType::Ask);

    handle_global_keys(&mut app, key_with_mods(KeyCode::Enter, KeyModifiers::ALT));

    assert!(app.controller.is_running());
}

#[test]
fn test_esc_stops_running_execution() {
    let mut app = app();
    let run = app.controller.engine().prepare(QueryType::Select);
    handle_global_keys(&mut app, key(KeyCode::F(5)));

    assert!(handle_global_keys(&mut app, key(KeyCode::Esc)));

    assert!(!app.controller.is_running());
    assert!(run.cancel_token.is_cancelled());
}

#[test]
fn test_esc_is_free_when_idle() {
    let mut app = app();

    assert!(!handle_global_keys(&mut app, key(KeyCode::Esc)));
}

#[test]
fn test_tab_cycles_focus() {
    let mut app = app();
    app.focus = Focus::FragmentField;

    let mut seen = vec![app.focus];
    for _ in 0..5 {
        handle_global_keys(&mut app, key(KeyCode::Tab));
        seen.push(app.focus);
    }

    assert_eq!(
        seen,
        vec![
            Focus::FragmentField,
            Focus::QueryPicker,
            Focus::Editor,
            Focus::Results,
            Focus::Log,
            Focus::FragmentField,
        ]
    );
}

#[test]
fn test_backtab_goes_back() {
    let mut app = app();
    app.focus = Focus::FragmentField;

    handle_global_keys(&mut app, key(KeyCode::BackTab));

    assert_eq!(app.focus, Focus::Log);
}

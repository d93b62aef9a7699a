use ratatui::{Terminal, backend::TestBackend, layout::Rect, style::Color};

use super::render_vertical_scrollbar;

const THUMB: &str = "█";
const TRACK: &str = "║";

/// Render into a 5x`height` terminal and return the rightmost column
fn scrollbar_column(total: usize, viewport: usize, offset: usize, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(5, height)).unwrap();
    terminal
        .draw(|frame| {
            render_vertical_scrollbar(
                frame,
                Rect::new(0, 0, 5, height),
                total,
                viewport,
                offset,
                Color::White,
            );
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| buffer[(4, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_scrollbar_not_rendered_when_content_fits() {
    let column = scrollbar_column(10, 10, 0, 10);
    assert!(column.iter().all(|symbol| symbol == " "));
}

#[test]
fn test_scrollbar_not_rendered_for_empty_viewport() {
    let column = scrollbar_column(50, 0, 0, 10);
    assert!(column.iter().all(|symbol| symbol == " "));
}

#[test]
fn test_scrollbar_rendered_when_content_exceeds_viewport() {
    let column = scrollbar_column(11, 10, 0, 10);
    assert!(column.iter().all(|symbol| symbol != " "));
}

#[test]
fn test_thumb_at_top_when_not_scrolled() {
    let column = scrollbar_column(20, 10, 0, 10);

    assert_eq!(column[0], THUMB);
    assert_eq!(column[9], TRACK);
}

#[test]
fn test_thumb_reaches_bottom_at_max_scroll() {
    let column = scrollbar_column(20, 10, 10, 10);

    assert_eq!(column[0], TRACK);
    assert_eq!(column[9], THUMB);
}

#[test]
fn test_offset_past_end_is_clamped() {
    assert_eq!(
        scrollbar_column(20, 10, 500, 10),
        scrollbar_column(20, 10, 10, 10)
    );
}

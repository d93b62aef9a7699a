use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Area directly below `anchor`, clamped to the bottom of `bounds`
pub fn popup_below_anchor(anchor: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let popup_y = anchor.bottom();
    let available = bounds.bottom().saturating_sub(popup_y);

    Rect {
        x: anchor.x,
        y: popup_y,
        width: width.min(bounds.right().saturating_sub(anchor.x)),
        height: height.min(available),
    }
}

/// Area of the given size in the top-right corner of `frame_area`
pub fn top_right(frame_area: Rect, width: u16, height: u16, margin: u16) -> Rect {
    let popup_width = width.min(frame_area.width.saturating_sub(margin * 2));
    let popup_height = height.min(frame_area.height.saturating_sub(margin * 2));

    Rect {
        x: frame_area.right().saturating_sub(popup_width + margin),
        y: frame_area.y + margin,
        width: popup_width,
        height: popup_height,
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

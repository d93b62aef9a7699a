/// Scroll position of a text pane
///
/// `following` keeps the view pinned to the last line while text is being
/// appended; any manual scroll up releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub offset: u16,
    pub max_offset: u16,
    pub viewport_height: u16,
    pub h_offset: u16,
    pub max_h_offset: u16,
    pub viewport_width: u16,
    pub following: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_bounds(&mut self, content_lines: u32, viewport_height: u16) {
        self.viewport_height = viewport_height;

        // Clamp to u16::MAX for ratatui compatibility
        self.max_offset = content_lines
            .saturating_sub(viewport_height as u32)
            .min(u16::MAX as u32) as u16;

        self.offset = if self.following {
            self.max_offset
        } else {
            self.offset.min(self.max_offset)
        };
    }

    pub fn update_h_bounds(&mut self, max_line_width: u16, viewport_width: u16) {
        self.viewport_width = viewport_width;
        self.max_h_offset = max_line_width.saturating_sub(viewport_width);
        self.h_offset = self.h_offset.min(self.max_h_offset);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset);
        self.following = self.offset == self.max_offset && self.following;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.following = false;
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height / 2);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height / 2);
    }

    pub fn scroll_right(&mut self, cols: u16) {
        self.h_offset = self.h_offset.saturating_add(cols).min(self.max_h_offset);
    }

    pub fn scroll_left(&mut self, cols: u16) {
        self.h_offset = self.h_offset.saturating_sub(cols);
    }

    pub fn jump_to_left(&mut self) {
        self.h_offset = 0;
    }

    pub fn jump_to_right(&mut self) {
        self.h_offset = self.max_h_offset;
    }

    pub fn jump_to_top(&mut self) {
        self.offset = 0;
        self.following = false;
    }

    /// Pin the view to the last line, including lines appended later
    pub fn jump_to_bottom(&mut self) {
        self.offset = self.max_offset;
        self.following = true;
    }

    pub fn reset(&mut self) {
        self.offset = 0;
        self.h_offset = 0;
        self.following = false;
    }
}

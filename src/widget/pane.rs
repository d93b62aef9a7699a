use std::fmt::Display;
use std::ops::Range;

use super::markup::{self, Segment};
use crate::scroll::ScrollState;

/// Append-only text area backing the results and log panes
#[derive(Debug, Clone, Default)]
pub struct TextPane {
    text: String,
    /// Links detected in each appended part, as byte ranges of `text`
    links: Vec<Range<usize>>,
    pub scroll: ScrollState,
}

impl TextPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every part in order and scroll to the end
    pub fn append_text<I>(&mut self, parts: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        use std::fmt::Write;

        for part in parts {
            let start = self.text.len();
            let _ = write!(self.text, "{}", part);
            let links = markup::link_ranges(&self.text[start..]);
            self.links
                .extend(links.into_iter().map(|link| link.start + start..link.end + start));
        }
        self.scroll.jump_to_bottom();
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.links = markup::link_ranges(&self.text);
        self.scroll.reset();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.links.clear();
        self.scroll.reset();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> u32 {
        self.text.lines().count() as u32
    }

    pub fn max_line_width(&self) -> u16 {
        self.text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16
    }

    /// Lines `skip..skip + take`, split into plain runs and links
    pub fn line_segments(&self, skip: usize, take: usize) -> Vec<Vec<Segment<'_>>> {
        let mut offset = 0;
        self.text
            .split_inclusive('\n')
            .map(|raw| {
                let start = offset;
                offset += raw.len();
                let line = match raw.strip_suffix('\n') {
                    Some(line) => line.strip_suffix('\r').unwrap_or(line),
                    None => raw,
                };
                (start, line)
            })
            .skip(skip)
            .take(take)
            .map(|(start, line)| markup::split_at_links(line, start, &self.links))
            .collect()
    }

    /// Escaped, linkified rendering of the content
    pub fn to_html(&self) -> String {
        markup::segments_to_html(&markup::split_at_links(&self.text, 0, &self.links))
    }
}

//! Escaping and link detection for pane text
//!
//! Pane text is split into plain runs and links. The HTML rendering escapes
//! `<`, `>` and `&` and wraps links in anchors; the terminal rendering styles
//! the link segments instead. Links are found once per piece of text, so a
//! URL split over two appended pieces stays two separate links.

use std::fmt::Write;
use std::ops::Range;

const SCHEMES: [&str; 2] = ["http://", "https://"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(text) | Segment::Link(text) => text,
        }
    }
}

fn is_url_char(c: char) -> bool {
    !c.is_whitespace() && c != '<' && c != '>'
}

/// Length of the URL starting at the beginning of `text`, if any
fn url_len(text: &str) -> Option<usize> {
    let scheme = SCHEMES.iter().find(|scheme| text.starts_with(*scheme))?;
    let rest = &text[scheme.len()..];
    let body = rest.find(|c| !is_url_char(c)).unwrap_or(rest.len());
    (body > 0).then_some(scheme.len() + body)
}

/// Byte ranges of the `http(s)://` links in `text`
pub fn link_ranges(text: &str) -> Vec<Range<usize>> {
    let mut links = Vec::new();
    let mut position = 0;

    while position < text.len() {
        let rest = &text[position..];
        if let Some(len) = url_len(rest) {
            links.push(position..position + len);
            position += len;
        } else {
            position += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    links
}

/// Split `text`, found at byte `offset` of a larger document, at that
/// document's link ranges
///
/// `links` must be sorted and non-overlapping.
pub fn split_at_links<'a>(
    text: &'a str,
    offset: usize,
    links: &[Range<usize>],
) -> Vec<Segment<'a>> {
    let end = offset + text.len();
    let first = links.partition_point(|link| link.end <= offset);
    let mut segments = Vec::new();
    let mut position = offset;

    for link in links[first..].iter().take_while(|link| link.start < end) {
        let link_start = link.start.max(offset);
        let link_end = link.end.min(end);
        if position < link_start {
            segments.push(Segment::Text(&text[position - offset..link_start - offset]));
        }
        segments.push(Segment::Link(&text[link_start - offset..link_end - offset]));
        position = link_end;
    }
    if position < end {
        segments.push(Segment::Text(&text[position - offset..]));
    }
    segments
}

/// Split text into plain runs and `http(s)://` links
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    split_at_links(text, 0, &link_ranges(text))
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            c => out.push(c),
        }
    }
}

/// Escape special HTML characters and turn URLs into links
pub fn to_html(text: &str) -> String {
    segments_to_html(&segments(text))
}

/// Escape plain runs and wrap links in anchors
pub fn segments_to_html(segments: &[Segment<'_>]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            Segment::Text(plain) => escape_into(&mut html, plain),
            Segment::Link(url) => {
                let mut escaped = String::with_capacity(url.len());
                escape_into(&mut escaped, url);
                let _ = write!(
                    html,
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    escaped.replace('"', "&quot;"),
                    escaped
                );
            }
        }
    }
    html
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod markup_tests;

use super::*;
use proptest::prelude::*;

#[test]
fn test_special_characters_are_escaped() {
    assert_eq!(to_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
}

#[test]
fn test_urls_become_links() {
    insta::assert_snapshot!(
        to_html("?s: http://dbpedia.org/resource/Ghent"),
        @r#"?s: <a href="http://dbpedia.org/resource/Ghent" target="_blank">http://dbpedia.org/resource/Ghent</a>"#
    );
}

#[test]
fn test_url_stops_at_angle_brackets() {
    assert_eq!(
        segments("<https://example.org/a>."),
        vec![
            Segment::Text("<"),
            Segment::Link("https://example.org/a"),
            Segment::Text(">."),
        ]
    );
}

#[test]
fn test_bare_scheme_is_not_a_link() {
    assert_eq!(segments("http:// x"), vec![Segment::Text("http:// x")]);
}

#[test]
fn test_ampersand_inside_url_is_escaped() {
    assert_eq!(
        to_html("http://example.org/?a=1&b=2"),
        "<a href=\"http://example.org/?a=1&amp;b=2\" target=\"_blank\">http://example.org/?a=1&amp;b=2</a>"
    );
}

#[test]
fn test_multibyte_text_is_preserved() {
    assert_eq!(
        segments("café → http://example.org/é"),
        vec![
            Segment::Text("café → "),
            Segment::Link("http://example.org/é"),
        ]
    );
}

#[test]
fn test_split_at_links_uses_document_offsets() {
    let document = "a: http://x.example.org/\nb: http://y.example.org/";
    let links = link_ranges(document);
    let second_line = &document[25..];

    assert_eq!(
        split_at_links(second_line, 25, &links),
        vec![Segment::Text("b: "), Segment::Link("http://y.example.org/")]
    );
}

#[test]
fn test_adjacent_pieces_keep_separate_links() {
    let links = vec![0..10, 10..18];
    let text = "http://a/bhttp://c";

    assert_eq!(
        segments_to_html(&split_at_links(text, 0, &links)),
        "<a href=\"http://a/b\" target=\"_blank\">http://a/b</a><a href=\"http://c\" target=\"_blank\">http://c</a>"
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_segments_cover_input(text in ".{0,80}") {
        let joined: String = segments(&text).iter().map(Segment::as_str).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn prop_pieces_cover_input(first in ".{0,40}", second in ".{0,40}") {
        let mut links = link_ranges(&first);
        links.extend(
            link_ranges(&second)
                .into_iter()
                .map(|link| link.start + first.len()..link.end + first.len()),
        );
        let text = format!("{}{}", first, second);

        let joined: String = split_at_links(&text, 0, &links)
            .iter()
            .map(Segment::as_str)
            .collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn prop_text_without_specials_passes_through(text in "[a-zA-Z0-9 .,;:!?\n-]{0,80}") {
        prop_assert_eq!(to_html(&text), text);
    }
}

//! Inline link markup for definition terms
//!
//! Terms are untrusted, in-place editable text. The only markup recognized is
//! `[display text](href)`; every other character, including `<`, `>` and `&`,
//! stays literal. Nothing here goes through an HTML parser.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `[text](href)`: no `]` inside the text, no `)` inside the href
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(?P<text>[^\]]+)\]\((?P<href>[^)]+)\)").expect("link pattern is valid"));

/// Schemes that are never turned into links
const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// One piece of rendered term content
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment {
    /// Literal text node
    Text { text: String },
    /// Anchor with display text and target
    Link { text: String, href: String },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Segment::Link {
            text: text.into(),
            href: href.into(),
        }
    }

    /// The text a reader sees for this segment
    pub fn display_text(&self) -> &str {
        match self {
            Segment::Text { text } | Segment::Link { text, .. } => text,
        }
    }
}

/// Split `term` into literal and link segments, left to right
///
/// Adjacent literal runs are merged and empty runs are omitted, so a term that
/// is exactly one link yields exactly one segment.
pub fn parse_term(term: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut cursor = 0;

    for caps in LINK_PATTERN.captures_iter(term) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let text = &caps["text"];
        let href = &caps["href"];

        literal.push_str(&term[cursor..whole.start()]);
        cursor = whole.end();

        if is_blocked_href(href) {
            log::debug!("leaving link with blocked scheme as text: {}", href);
            literal.push_str(whole.as_str());
            continue;
        }

        if !literal.is_empty() {
            segments.push(Segment::text(std::mem::take(&mut literal)));
        }
        segments.push(Segment::link(text, href));
    }

    literal.push_str(&term[cursor..]);
    if !literal.is_empty() {
        segments.push(Segment::text(literal));
    }

    segments
}

fn is_blocked_href(href: &str) -> bool {
    // Browsers ignore embedded whitespace and control characters in schemes
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();
    BLOCKED_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}

/// Concatenated display text, what `textContent` would report
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::display_text).collect()
}

/// Serialize segments as escaped HTML, matching what the DOM would report as
/// `innerHTML` for the rendered nodes
pub fn to_html(segments: &[Segment]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            Segment::Text { text } => escape_into(&mut html, text, false),
            Segment::Link { text, href } => {
                html.push_str("<a href=\"");
                escape_into(&mut html, href, true);
                html.push_str("\">");
                escape_into(&mut html, text, false);
                html.push_str("</a>");
            }
        }
    }
    html
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_in_the_middle() {
        assert_eq!(
            parse_term("a [link](#x) b"),
            vec![Segment::text("a "), Segment::link("link", "#x"), Segment::text(" b")]
        );
    }

    #[test]
    fn test_only_link() {
        let segments = parse_term("[a link](#link)");
        assert_eq!(segments, vec![Segment::link("a link", "#link")]);
        assert_eq!(to_html(&segments), r##"<a href="#link">a link</a>"##);
    }

    #[test]
    fn test_multiple_links() {
        let segments = parse_term("[one](#1) and [two](#2)");
        assert_eq!(
            segments,
            vec![
                Segment::link("one", "#1"),
                Segment::text(" and "),
                Segment::link("two", "#2"),
            ]
        );
        assert_eq!(plain_text(&segments), "one and two");
    }

    #[test]
    fn test_markup_stays_literal() {
        let segments = parse_term("<b>bold</b>");
        assert_eq!(segments, vec![Segment::text("<b>bold</b>")]);

        let term = "Button text with <strong>bold</strong> wording";
        assert_eq!(
            to_html(&parse_term(term)),
            "Button text with &lt;strong&gt;bold&lt;/strong&gt; wording"
        );
    }

    #[test]
    fn test_html_matches_rendered_link() {
        let term = "Button text with [a link](#link) to a place";
        assert_eq!(
            to_html(&parse_term(term)),
            r##"Button text with <a href="#link">a link</a> to a place"##
        );
    }

    #[test]
    fn test_unmatched_brackets_are_literal() {
        for term in ["[open", "[text](", "(x)[y]", "[](#empty)", "[x]()"] {
            assert_eq!(parse_term(term), vec![Segment::text(term)], "term {:?}", term);
        }
    }

    #[test]
    fn test_no_nested_brackets() {
        // the text group only forbids ']', so the match opens at the first '['
        let segments = parse_term("x [a [b](#c)");
        assert_eq!(segments, vec![Segment::text("x "), Segment::link("a [b", "#c")]);
    }

    #[test]
    fn test_blocked_schemes_stay_text() {
        let term = "click [me](javascript:alert(1)) now";
        assert_eq!(plain_text(&parse_term(term)), term);
        assert!(parse_term(term).iter().all(|s| matches!(s, Segment::Text { .. })));

        assert!(parse_term("[x]( JavaScript:void 0)")
            .iter()
            .all(|s| matches!(s, Segment::Text { .. })));
    }

    #[test]
    fn test_href_is_escaped_in_html() {
        let segments = parse_term(r#"[q](/a?b="c"&d)"#);
        assert_eq!(to_html(&segments), r#"<a href="/a?b=&quot;c&quot;&amp;d">q</a>"#);
    }

    #[test]
    fn test_empty_term() {
        assert!(parse_term("").is_empty());
    }
}

//! Text helpers shared by both article adapters.
//!
//! This module provides:
//! - Markup-to-text rendering for article bodies
//! - Sentence segmentation of rendered text
//! - Whitespace normalization for values read from document regions
//! - Log-friendly truncation and JSON error classification

use itertools::Itertools;
use scraper::{ElementRef, Html, Node};

/// Elements whose boundaries separate words in the rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Elements whose text is never visible.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Render an HTML fragment as plain visible text.
///
/// Tags are dropped, entities are decoded by the HTML parser, both edges of
/// a block element become spaces and runs of whitespace collapse to one space.
///
/// # Arguments
///
/// * `markup` - HTML fragment, such as the `Content` field of a listing entry
///
/// # Returns
///
/// The visible text, trimmed. Plain text without tags comes back normalized.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(markup_to_text("<p>One.</p><p>Two.</p>"), "One. Two.");
/// assert_eq!(markup_to_text("<div>a</div>b"), "a b");
/// ```
pub fn markup_to_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    element_text(&fragment.root_element())
}

/// Visible text of an element and its descendants, normalized like [`markup_to_text`].
pub fn element_text(element: &ElementRef<'_>) -> String {
    let mut out = String::new();
    push_visible_text(*element, &mut out);
    collapse_whitespace(&out)
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN_TAGS.contains(&name) {
            continue;
        }
        let block = BLOCK_TAGS.contains(&name);
        if block {
            out.push(' ');
        }
        push_visible_text(child, out);
        if block {
            out.push(' ');
        }
    }
}

/// Split text into sentences on `.`.
///
/// Each fragment is trimmed, empty fragments are dropped and the
/// terminating period is re-appended.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!("{fragment}."))
        .collect()
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Normalized text, or `None` when nothing visible is left.
pub fn non_blank(s: &str) -> Option<String> {
    let collapsed = collapse_whitespace(s);
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Truncate a string for logging purposes.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if it fits, otherwise the prefix ending at the last
/// character boundary at or before `max` with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

//! Visible-text extraction from HTML documents.

use scraper::{Html, Node, Selector};

/// Elements whose text content is never visible on the page.
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

/// Extract the visible text of the document's `<body>`.
///
/// Text inside `<script>`/`<style>` is dropped, every run of whitespace is
/// collapsed to a single space and separate text nodes are joined with a
/// space. Returns `None` when there is no body or it holds no visible text.
pub fn visible_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").ok()?;
    let body = document.select(&body_selector).next()?;

    let mut words: Vec<&str> = Vec::new();
    for node in body.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

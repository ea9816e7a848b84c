//! HTML parser for extracting text, headings and links
//!
//! This module turns a fetched page into:
//! - flattened body text, without non-content elements
//! - the first heading, by level priority
//! - the raw `href` of every anchor, in document order

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

/// Elements whose subtrees never contribute text or headings
pub const NON_CONTENT_TAGS: &[&str] = &[
    "style", "script", "nav", "header", "footer", "head", "title",
];

/// Heading levels searched for the page heading, highest priority first
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5"];

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("hardcoded selector is valid"));

static HEADING_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    HEADING_TAGS
        .iter()
        .map(|tag| Selector::parse(tag).expect("hardcoded selector is valid"))
        .collect()
});

/// Extracted information from an HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Body text with newlines and tabs replaced by spaces
    pub text: String,

    /// Text of the first heading, or empty
    pub heading: String,

    /// Raw anchor targets, unresolved
    pub links: Vec<String>,
}

/// Parses a page once and extracts text, heading and links
///
/// # Example
///
/// ```
/// use text_scraper::crawler::parse_page;
///
/// let html = r#"<html><head><title>T</title></head>
///     <body><h2>Welcome</h2><p>Hello</p><a href="/next">next</a></body></html>"#;
/// let page = parse_page(html);
/// assert_eq!(page.heading, "Welcome");
/// assert_eq!(page.links, vec!["/next".to_string()]);
/// assert!(page.text.contains("Hello"));
/// assert!(!page.text.contains('\n'));
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_text(&document),
        heading: extract_heading(&document),
        links: extract_anchors(&document),
    }
}

/// Converts a page into `(body_text, heading)`
pub fn transform(html: &str) -> (String, String) {
    let document = Html::parse_document(html);
    (extract_text(&document), extract_heading(&document))
}

/// Collects the raw `href` of every anchor on the page, in document order
///
/// Anchors inside navigation, header and footer are included: they are
/// excluded from text, not from link discovery.
pub fn extract_links(html: &str) -> Vec<String> {
    extract_anchors(&Html::parse_document(html))
}

fn extract_anchors(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Concatenates all text outside non-content subtrees, then flattens it
fn extract_text(document: &Html) -> String {
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);
    flatten(&text)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    if is_non_content(element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Finds the first `h1`, else the first `h2`, and so on down to `h5`
fn extract_heading(document: &Html) -> String {
    for selector in HEADING_SELECTORS.iter() {
        let heading = document
            .select(selector)
            .find(|element| !inside_non_content(element));

        if let Some(heading) = heading {
            return heading.text().collect::<String>().trim().to_string();
        }
    }

    String::new()
}

fn inside_non_content(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_non_content(ancestor.value().name()))
}

fn is_non_content(name: &str) -> bool {
    NON_CONTENT_TAGS.contains(&name)
}

/// Replaces every newline and tab with a single space
fn flatten(text: &str) -> String {
    text.replace(['\n', '\t'], " ")
}

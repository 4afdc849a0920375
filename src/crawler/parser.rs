//! HTML document handling
//!
//! This module turns a fetched body into a [`Document`] and extracts what the
//! crawl needs from it:
//! - Raw `<a href>` values (resolution happens later, against the page base)
//! - The declared `<base href>`
//! - The `<html lang>` attribute and the visible text, for language sampling

use crate::ParseError;
use rand::seq::SliceRandom;
use rand::Rng;
use scraper::{Html, Node, Selector};

/// File extensions that are never worth fetching as pages
pub const BLOCKED_EXTENSIONS: &[&str] = &[
    ".jpeg", ".png", ".pdf", ".mp4", ".gif", ".mov", ".webm", ".webp",
];

/// Elements whose text content is not rendered
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// Parses a fetched body into a document tree
///
/// The body is decoded as UTF-8, replacing invalid sequences.
///
/// # Returns
///
/// * `Ok(Document)` - The parsed document
/// * `Err(ParseError::EmptyDocument)` - The body is empty or whitespace only
/// * `Err(ParseError::Binary)` - The body contains NUL bytes
///
/// # Example
///
/// ```
/// use babel_ripple::crawler::parse_document;
///
/// let doc = parse_document(br#"<html lang="pl"><body><a href="/x">x</a></body></html>"#).unwrap();
/// assert_eq!(doc.lang_attribute().as_deref(), Some("pl"));
/// assert_eq!(doc.raw_links(), vec!["/x".to_string()]);
/// ```
pub fn parse_document(body: &[u8]) -> Result<Document, ParseError> {
    if body.contains(&0) {
        return Err(ParseError::Binary);
    }

    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    Ok(Document {
        html: Html::parse_document(&text),
    })
}

impl Document {
    /// Returns the `lang` attribute of the root `<html>` element, if non-empty
    pub fn lang_attribute(&self) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr("lang")
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    }

    /// Returns the `href` of the first `<base>` element, if any
    pub fn base_href(&self) -> Option<String> {
        let selector = Selector::parse("base[href]").ok()?;
        self.html
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("href"))
            .map(str::to_string)
    }

    /// Returns every `<a href>` value in document order, unresolved
    pub fn raw_links(&self) -> Vec<String> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        self.html
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    /// Concatenates all rendered text nodes, separated by single spaces
    pub fn visible_text(&self) -> String {
        let mut parts = Vec::new();

        for node in self.html.root_element().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|element| HIDDEN_TEXT_ELEMENTS.contains(&element.name()));
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }

        parts.join(" ")
    }
}

/// Extracts at most `max_links` raw hyperlinks from a document
///
/// When the page has more than `max_links` anchors, a random subset of
/// `max_links` is kept. Links to blocked file types are dropped afterwards,
/// so the result can be shorter than `max_links` even on large pages.
pub fn extract_links<R: Rng + ?Sized>(document: &Document, max_links: usize, rng: &mut R) -> Vec<String> {
    let mut links = document.raw_links();

    if links.len() > max_links {
        links.shuffle(rng);
        links.truncate(max_links);
    }

    links.retain(|link| !is_blocked_extension(link));
    links
}

/// Returns true if the link's path ends with a blocked file extension
///
/// Surrounding whitespace, query and fragment are ignored; the comparison
/// is case-sensitive.
pub fn is_blocked_extension(link: &str) -> bool {
    let link = link.trim();
    let path = link
        .split_once(&['?', '#'][..])
        .map_or(link, |(before, _)| before);

    BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

//! HTML parser for extracting anchor targets
//!
//! Targets are recorded exactly as written in the markup: no trimming,
//! no resolution against the page URL, no scheme filtering.

use crate::results::LinkSet;
use scraper::{Html, Selector};

/// Turns fetched page content into a set of link targets
///
/// Extraction never fails. Malformed markup yields whatever anchors could
/// be recovered, possibly none.
pub trait LinkExtractor: Send + Sync {
    /// Collects the distinct link targets in `content`
    fn extract(&self, content: &str) -> LinkSet;
}

/// Extracts the `href` of every `<a>` element using an HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, content: &str) -> LinkSet {
        extract_links(content)
    }
}

/// Parses HTML content and extracts anchor targets
///
/// # Example
///
/// ```
/// use link_harvest::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a><a href="/b">B</a><a href="/a">again</a>"#;
/// let links = extract_links(html);
/// assert_eq!(links.len(), 2);
/// ```
pub fn extract_links(html: &str) -> LinkSet {
    let document = Html::parse_document(html);
    let mut links = LinkSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                links.insert(href.to_string());
            }
        }
    }

    links
}

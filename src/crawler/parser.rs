//! HTML parser for extracting page metadata, links and images
//!
//! Parsing is a pure function of the HTML text and the URL it came from.

use crate::url::resolve_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// An `<img>` reference found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Absolute image URL
    pub url: String,
    pub alt: String,
    pub title: String,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Trimmed `<title>` text, empty when absent
    pub title: String,

    /// `<meta name="description">` content, empty when absent
    pub description: String,

    /// Whitespace-separated words of visible text
    pub word_count: usize,

    /// Every HTTP(S) `<a href>` target, absolute and normalized, in document
    /// order (duplicates kept)
    pub links: Vec<Url>,

    pub images: Vec<ImageRef>,
}

/// Parses HTML content and extracts metadata, links and images
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">` that resolves to an HTTP(S) URL.
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only
/// hrefs. Fragments are stripped from the rest.
///
/// # Example
///
/// ```
/// use site_harvester::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &base_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        description: extract_description(&document),
        word_count: visible_word_count(&document),
        links: extract_links(&document, base_url),
        images: extract_images(&document, base_url),
    }
}

/// Convenience function for extracting just the anchor targets from HTML
pub fn extract_links_simple(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    extract_links(&document, base_url)
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_title(document: &Html) -> String {
    selector("title")
        .and_then(|s| document.select(&s).next().map(element_text))
        .unwrap_or_default()
}

fn extract_description(document: &Html) -> String {
    selector(r#"meta[name="description"]"#)
        .and_then(|s| {
            document
                .select(&s)
                .next()
                .and_then(|m| m.value().attr("content"))
                .map(|c| c.trim().to_string())
        })
        .unwrap_or_default()
}

/// Counts words in text nodes, skipping script and style bodies
fn visible_word_count(document: &Html) -> usize {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()));
            match parent {
                Some("script") | Some("style") | Some("noscript") => None,
                _ => Some(text.split_whitespace().count()),
            }
        })
        .sum()
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Some(a_selector) = selector("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

fn extract_images(document: &Html, base_url: &Url) -> Vec<ImageRef> {
    let Some(img_selector) = selector("img[src]") else {
        return Vec::new();
    };

    document
        .select(&img_selector)
        .filter_map(|img| {
            let src = img.value().attr("src")?.trim();
            if src.is_empty() || src.starts_with("data:") {
                return None;
            }
            let url = base_url.join(src).ok()?;
            Some(ImageRef {
                url: url.to_string(),
                alt: img.value().attr("alt").unwrap_or("").to_string(),
                title: img.value().attr("title").unwrap_or("").to_string(),
            })
        })
        .collect()
}

//! Heuristic extractor chains
//!
//! A field is extracted by trying an ordered list of independent extractor
//! functions; the first one returning `Some` wins and a full miss yields an
//! empty value.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Page being extracted from, with the URL relative links resolve against
pub struct Page<'a> {
    pub document: &'a Html,
    pub url: &'a Url,
}

/// One heuristic for one field
pub type Extractor<T> = fn(&Page<'_>) -> Option<T>;

/// Runs extractors in order and returns the first hit
pub fn first_match<T>(page: &Page<'_>, extractors: &[Extractor<T>]) -> Option<T> {
    extractors.iter().find_map(|extract| extract(page))
}

/// Like [`first_match`] for text fields, mapping a miss to an empty string
pub fn first_text(page: &Page<'_>, extractors: &[Extractor<String>]) -> String {
    first_match(page, extractors).unwrap_or_default()
}

/// Collapses all whitespace runs to single spaces and trims
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-normalized text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    let parts: Vec<&str> = element.text().collect();
    clean_text(&parts.join(" "))
}

/// Text of the first element matching `css`, if non-empty
pub fn select_text(root: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    root.select(&selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// First element matching `css` anywhere in the document
pub fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// All elements matching `css`, in document order
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => root.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Returns true if any class of the element contains `needle` (case-insensitive)
pub fn class_contains(element: ElementRef<'_>, needle: &str) -> bool {
    element
        .value()
        .classes()
        .any(|class| class.to_lowercase().contains(needle))
}

/// Resolves an attribute value against the page URL
pub fn absolute_url(page: &Page<'_>, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    page.url.join(reference).ok().map(|u| u.to_string())
}

/// Innermost element among `tags` whose text contains any of `patterns`
///
/// Wrapper elements contain every pattern their children contain, so the
/// first match without a matching descendant is returned.
pub fn innermost_containing<'a>(
    document: &'a Html,
    tags: &str,
    patterns: &[&str],
) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tags).ok()?;
    let matches = |element: &ElementRef<'_>| {
        let text = element_text(*element).to_lowercase();
        patterns.iter().any(|p| text.contains(p))
    };

    document
        .select(&selector)
        .filter(|element| matches(element))
        .find(|element| !element.select(&selector).any(|inner| matches(&inner)))
}

/// Text of the sibling elements following a heading, up to the next heading
pub fn section_after_heading(heading: ElementRef<'_>) -> String {
    let mut parts = Vec::new();

    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if matches!(sibling.value().name(), "h2" | "h3" | "h4") {
            break;
        }
        let text = element_text(sibling);
        if !text.is_empty() {
            parts.push(text);
        }
    }

    parts.join(" ")
}

/// Section text under the first h2/h3/h4 mentioning any of `words`
pub fn heading_section(document: &Html, words: &[&str]) -> Option<String> {
    let selector = Selector::parse("h2, h3, h4").ok()?;
    let heading = document.select(&selector).find(|h| {
        let text = element_text(*h).to_lowercase();
        words.iter().any(|w| text.contains(w))
    })?;

    let text = section_after_heading(heading);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Truncates to at most `max` characters on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

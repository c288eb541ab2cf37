//! Media URL harvesting from site map pages and person catalogs

use crate::downloader::classify::DOCUMENT_EXTENSIONS;
use crate::http::{fetch_url, FetchResult};
use crate::records::{MediaKind, PageRecord, PersonRecord};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

/// A media URL together with the kind the page suggested for it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MediaTarget {
    pub url: String,
    pub hint: MediaKind,
}

impl MediaTarget {
    pub fn new(url: impl Into<String>, hint: MediaKind) -> Self {
        Self {
            url: url.into(),
            hint,
        }
    }
}

/// Collects every `<img src>` and every document `<a href>` of one page
pub fn collect_media_urls(html: &str, page_url: &Url) -> Vec<MediaTarget> {
    let document = Html::parse_document(html);
    let mut targets = Vec::new();

    if let Ok(img_selector) = Selector::parse("img[src]") {
        for img in document.select(&img_selector) {
            let Some(src) = img.value().attr("src").map(str::trim) else {
                continue;
            };
            if src.is_empty() || src.starts_with("data:") {
                continue;
            }
            if let Some(url) = join_http(page_url, src) {
                targets.push(MediaTarget::new(url, MediaKind::Image));
            }
        }
    }

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for link in document.select(&a_selector) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !is_document_href(href) {
                continue;
            }
            if let Some(url) = join_http(page_url, href) {
                targets.push(MediaTarget::new(url, MediaKind::Document));
            }
        }
    }

    targets
}

/// Re-fetches every successfully crawled page and gathers its media URLs
///
/// The result is deduplicated on (url, hint) and sorted.
pub async fn harvest_media(client: &Client, pages: &[PageRecord], delay: Duration) -> Vec<MediaTarget> {
    let mut targets = BTreeSet::new();
    let mut first = true;

    for page in pages.iter().filter(|p| p.is_ok()) {
        let Ok(page_url) = Url::parse(&page.url) else {
            continue;
        };

        if !first && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        first = false;

        match fetch_url(client, page_url.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                targets.extend(collect_media_urls(&response.text(), &page_url));
            }
            FetchResult::Success(response) => {
                tracing::warn!("Error processing {}: HTTP {}", page_url, response.status_code);
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Error processing {}: {} ({})", page_url, kind, error);
            }
        }
    }

    tracing::info!("Found {} unique media files to download", targets.len());
    targets.into_iter().collect()
}

/// Photo URLs of scraped people, as image targets
pub fn photo_targets(people: &[PersonRecord]) -> Vec<MediaTarget> {
    people
        .iter()
        .filter(|p| !p.photo_url.is_empty())
        .map(|p| MediaTarget::new(p.photo_url.clone(), MediaKind::Image))
        .collect()
}

fn is_document_href(href: &str) -> bool {
    let lower = href.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or("");
    DOCUMENT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn join_http(base: &Url, reference: &str) -> Option<String> {
    let mut url = base.join(reference).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

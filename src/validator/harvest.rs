//! Link harvesting from site map pages

use crate::crawler::extract_links_simple;
use crate::http::{fetch_url, FetchResult};
use crate::records::PageRecord;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// One link to check, with the page it was found on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkTarget {
    pub url: String,
    pub source_page: String,
}

impl LinkTarget {
    pub fn new(url: impl Into<String>, source_page: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_page: source_page.into(),
        }
    }
}

/// Collects the link targets of one page's HTML
///
/// Anchors, `javascript:`, `mailto:` and `tel:` hrefs are skipped. Both
/// internal and external links are returned.
pub fn collect_link_targets(html: &str, source_page: &Url) -> Vec<LinkTarget> {
    extract_links_simple(html, source_page)
        .into_iter()
        .map(|url| LinkTarget::new(url.as_str(), source_page.as_str()))
        .collect()
}

/// Re-fetches every successfully crawled page and gathers its links
///
/// Returned pairs are unique and sorted, so the validator input is stable
/// across runs over the same site map.
pub async fn harvest_links(client: &Client, pages: &[PageRecord], delay: Duration) -> Vec<LinkTarget> {
    let mut targets: HashSet<LinkTarget> = HashSet::new();
    let mut first = true;

    for page in pages.iter().filter(|p| p.is_ok()) {
        let Ok(source) = Url::parse(&page.url) else {
            continue;
        };

        if !first && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        first = false;

        match fetch_url(client, source.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                targets.extend(collect_link_targets(&response.text(), &source));
            }
            FetchResult::Success(response) => {
                tracing::warn!(
                    "Skipping link extraction for {}: HTTP {}",
                    source,
                    response.status_code
                );
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Error extracting links from {}: {} ({})", source, kind, error);
            }
        }
    }

    let mut targets: Vec<LinkTarget> = targets.into_iter().collect();
    targets.sort_by(|a, b| (&a.url, &a.source_page).cmp(&(&b.url, &b.source_page)));

    tracing::info!("Found {} unique links to validate", targets.len());
    targets
}

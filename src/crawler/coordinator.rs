//! Crawl coordinator - the sequential fetch/parse loop
//!
//! The coordinator owns the frontier for a single run and drives it until
//! the queue drains or the page ceiling is reached. Every visit produces a
//! `PageRecord`, including visits that failed.

use crate::config::Config;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::http::{build_http_client, fetch_url, FetchResult, FetchedResponse};
use crate::records::PageRecord;
use crate::url::{is_same_domain, normalize_url};
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Sequential breadth-first crawler for a single site
pub struct Coordinator {
    client: Client,
    seed: Url,
    frontier: Frontier,
    delay: Duration,
    pages: Vec<PageRecord>,
}

impl Coordinator {
    /// Creates a coordinator from the `[crawler]` and `[user-agent]` sections
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.timeout_secs),
        )?;

        Self::with_client(
            client,
            &config.crawler.start_url,
            config.crawler.max_pages,
            Duration::from_millis(config.crawler.request_delay_ms),
        )
    }

    /// Creates a coordinator around an existing client
    pub fn with_client(
        client: Client,
        seed_url: &str,
        max_pages: usize,
        delay: Duration,
    ) -> Result<Self> {
        let seed = normalize_url(seed_url)?;

        Ok(Self {
            client,
            frontier: Frontier::new(seed.clone(), max_pages),
            seed,
            delay,
            pages: Vec::new(),
        })
    }

    /// Runs the crawl loop to completion and returns the site map
    ///
    /// The loop:
    /// 1. Pops the next unvisited URL from the frontier
    /// 2. Waits out the politeness delay (skipped before the first fetch)
    /// 3. Fetches and parses the page
    /// 4. Records the page and enqueues its same-domain links
    pub async fn run(mut self) -> Vec<PageRecord> {
        tracing::info!("Starting crawl of {}", self.seed);

        let start_time = Instant::now();
        let mut first = true;

        while let Some(url) = self.frontier.next_url() {
            if !first && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            first = false;

            tracing::debug!("Processing URL: {}", url);
            let record = self.visit(&url).await;
            self.pages.push(record);

            let visited = self.frontier.visited_count();
            if visited % 10 == 0 {
                let rate = visited as f64 / start_time.elapsed().as_secs_f64().max(0.001);
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    visited,
                    self.frontier.pending(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}",
            self.pages.len(),
            start_time.elapsed()
        );

        self.pages
    }

    /// Fetches one URL and turns the outcome into a page record
    async fn visit(&mut self, url: &Url) -> PageRecord {
        match fetch_url(&self.client, url.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                self.record_page(url, response)
            }
            FetchResult::Success(response) => {
                tracing::warn!("HTTP {} for {}", response.status_code, url);
                let mut record = PageRecord::failed(
                    url.as_str(),
                    format!("HTTP {}", response.status_code),
                );
                record.status_code = Some(response.status_code);
                record.final_url = Some(response.final_url);
                record.content_type = response.content_type;
                record
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Failed to fetch {}: {} ({})", url, kind, error);
                PageRecord::failed(url.as_str(), kind.as_str())
            }
        }
    }

    /// Parses a successful response, enqueues internal links and builds the record
    fn record_page(&mut self, url: &Url, response: FetchedResponse) -> PageRecord {
        let base = Url::parse(&response.final_url).unwrap_or_else(|_| url.clone());
        let is_html = response.mime_type().is_empty() || response.mime_type().contains("html");

        let mut internal_link_count = 0;
        let mut external_link_count = 0;
        let mut title = String::new();
        let mut description = String::new();
        let mut word_count = 0;
        let mut image_count = 0;

        if is_html {
            let parsed = parse_page(&response.text(), &base);

            for link in parsed.links {
                if is_same_domain(&link, &self.seed) {
                    internal_link_count += 1;
                    self.frontier.enqueue(link);
                } else {
                    external_link_count += 1;
                }
            }

            title = parsed.title;
            description = parsed.description;
            word_count = parsed.word_count;
            image_count = parsed.images.len();
        }

        PageRecord {
            url: url.to_string(),
            final_url: Some(response.final_url),
            title,
            description,
            status_code: Some(response.status_code),
            word_count,
            internal_link_count,
            external_link_count,
            image_count,
            content_type: response.content_type,
            last_modified: response.last_modified,
            crawled_at: Utc::now(),
            error: None,
        }
    }
}

/// Crawls a site breadth-first from `seed_url`, visiting at most `max_pages`
/// pages with `delay` between requests
pub async fn crawl(
    client: Client,
    seed_url: &str,
    max_pages: usize,
    delay: Duration,
) -> Result<Vec<PageRecord>> {
    let coordinator = Coordinator::with_client(client, seed_url, max_pages, delay)?;
    Ok(coordinator.run().await)
}

/// Runs the crawl described by the configuration
pub async fn run_crawl(config: &Config) -> Result<Vec<PageRecord>> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

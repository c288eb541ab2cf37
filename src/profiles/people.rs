//! All-people directory extraction
//!
//! The directory lists everyone as `views-row` blocks. Each listing entry is
//! enriched from the person's own profile page.

use crate::config::Config;
use crate::http::{build_http_client, fetch_url, FetchResult};
use crate::profiles::chain::{absolute_url, element_text, select_all, select_first, Page};
use crate::profiles::social::{extract_lab_url, extract_social_links};
use crate::records::{PersonRecord, SocialLinks};
use crate::Result;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Category used when a listing entry has none
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Details only available on a person's profile page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDetails {
    pub bio: String,
    pub research_interests: Vec<String>,
    pub lab_url: String,
    pub social: SocialLinks,
}

/// Parses the directory listing into one record per `views-row` entry
///
/// Rows without a link are skipped. Default portrait images are dropped.
pub fn parse_directory(html: &str, base_url: &Url) -> Vec<PersonRecord> {
    let document = Html::parse_document(html);
    let page = Page {
        document: &document,
        url: base_url,
    };

    select_all(document.root_element(), "div.views-row")
        .into_iter()
        .filter_map(|row| parse_row(&page, row))
        .collect()
}

fn parse_row(page: &Page<'_>, row: ElementRef<'_>) -> Option<PersonRecord> {
    let name_link = select_all(row, "a[href]").into_iter().next()?;
    let profile_url = absolute_url(page, name_link.value().attr("href")?)?;

    let mut person = PersonRecord::new(&profile_url);
    person.name = element_text(name_link);
    person.title = row_field(row, "views-field-field-person-title");
    let category = row_field(row, "views-field-field-person-category");
    person.category = Some(if category.is_empty() {
        UNKNOWN_CATEGORY.to_string()
    } else {
        category
    });
    person.email = select_all(row, r#"a[href^="mailto:"]"#)
        .into_iter()
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim_start_matches("mailto:").trim().to_string())
        .unwrap_or_default();
    person.phone = row_field(row, "views-field-field-person-phone");
    person.office = row_field(row, "views-field-field-person-office");
    person.research_interests = select_all(row, "div.views-field-field-research-interests a")
        .into_iter()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect();
    person.photo_url = select_all(row, "img[src]")
        .into_iter()
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| absolute_url(page, src))
        .filter(|url| !url.to_lowercase().contains("default"))
        .unwrap_or_default();

    Some(person)
}

fn row_field(row: ElementRef<'_>, class: &str) -> String {
    select_all(row, &format!("div.{}", class))
        .into_iter()
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Extracts bio, research interests and external links from a profile page
pub fn extract_person_details(html: &str, profile_url: &Url) -> ProfileDetails {
    let document = Html::parse_document(html);
    let page = Page {
        document: &document,
        url: profile_url,
    };

    let bio = select_first(&document, "div.field-name-body")
        .or_else(|| select_first(&document, "div.field-type-text-with-summary"))
        .map(body_text)
        .unwrap_or_default();

    let research_interests = select_all(
        document.root_element(),
        "div.field-name-field-research-interests a",
    )
    .into_iter()
    .map(element_text)
    .filter(|t| !t.is_empty())
    .collect();

    let lab_url = extract_lab_url(&page)
        .filter(|url| url.starts_with("http"))
        .unwrap_or_default();

    ProfileDetails {
        bio,
        research_interests,
        lab_url,
        social: extract_social_links(&page),
    }
}

/// Text of a body field, leaving out nested navigation, scripts and styles
fn body_text(element: ElementRef<'_>) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|e| matches!(e.name(), "nav" | "script" | "style"))
                .unwrap_or(false)
        });
        if !skipped {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Folds profile details into a listing record
///
/// Profile values win when present; listing values are kept otherwise.
pub fn merge_details(person: &mut PersonRecord, details: ProfileDetails) {
    if !details.bio.is_empty() {
        person.bio = details.bio;
    }
    if !details.research_interests.is_empty() {
        person.research_interests = details.research_interests;
    }
    if !details.lab_url.is_empty() {
        person.lab_url = details.lab_url;
    }
    person.social = details.social;
}

/// Count of people per directory category, sorted by category name
pub fn category_summary(people: &[PersonRecord]) -> BTreeMap<String, usize> {
    let mut summary = BTreeMap::new();
    for person in people {
        let category = person
            .category
            .clone()
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        *summary.entry(category).or_insert(0) += 1;
    }
    summary
}

/// Sequential scraper for the all-people directory
pub struct PeopleScraper {
    client: Client,
    delay: Duration,
}

impl PeopleScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.timeout_secs),
        )?;
        Ok(Self::with_client(
            client,
            Duration::from_millis(config.scraper.request_delay_ms),
        ))
    }

    pub fn with_client(client: Client, delay: Duration) -> Self {
        Self { client, delay }
    }

    /// Scrapes the directory and every listed profile
    ///
    /// A failed directory fetch yields an empty list. A failed profile fetch
    /// keeps the listing data and sets `error`.
    pub async fn scrape_all(&self, people_url: &str) -> Vec<PersonRecord> {
        let Ok(directory_url) = Url::parse(people_url) else {
            tracing::warn!("Invalid people directory URL: {}", people_url);
            return Vec::new();
        };

        let mut people = match fetch_url(&self.client, directory_url.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                parse_directory(&response.text(), &directory_url)
            }
            FetchResult::Success(response) => {
                tracing::warn!("Error fetching people directory: HTTP {}", response.status_code);
                return Vec::new();
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Error fetching people directory: {} ({})", kind, error);
                return Vec::new();
            }
        };

        tracing::info!("Found {} people in directory", people.len());

        for person in people.iter_mut() {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            tracing::debug!("Fetching details from: {}", person.profile_url);
            self.enrich(person).await;
        }

        people
    }

    async fn enrich(&self, person: &mut PersonRecord) {
        let Ok(profile_url) = Url::parse(&person.profile_url) else {
            person.error = Some("invalid URL".to_string());
            return;
        };

        match fetch_url(&self.client, profile_url.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                let details = extract_person_details(&response.text(), &profile_url);
                merge_details(person, details);
            }
            FetchResult::Success(response) => {
                tracing::warn!("Error fetching details for {}: HTTP {}", person.name, response.status_code);
                person.error = Some(format!("HTTP {}", response.status_code));
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Error fetching details for {}: {}", person.name, error);
                person.error = Some(kind.to_string());
            }
        }
    }
}

//! Faculty directory and profile extraction
//!
//! Every field of a profile has its own extractor chain: class-name
//! heuristics first, then landmark tags, then a regex over the page text.

use crate::config::Config;
use crate::http::{build_http_client, fetch_url, FetchResult};
use crate::profiles::chain::{
    absolute_url, class_contains, clean_text, element_text, first_text, heading_section,
    innermost_containing, select_all, select_first, select_text, truncate_chars, Page,
};
use crate::profiles::social::{extract_lab_url, extract_social_links};
use crate::records::PersonRecord;
use crate::Result;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

static RE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());

const OFFICE_WORDS: &[&str] = &["office", "location", "room", "building"];
const TITLE_WORDS: &[&str] = &["professor", "lecturer", "instructor", "researcher"];
const BIO_HEADINGS: &[&str] = &["bio", "about", "biography", "background", "overview"];
const RESEARCH_HEADINGS: &[&str] = &["research"];
const PHOTO_HINTS: &[&str] = &["profile", "headshot", "photo", "avatar", "faculty"];
const PHOTO_SKIP: &[&str] = &["logo", "icon", "button"];

/// Main-content fallback bios are cut to this many characters
const FALLBACK_BIO_CHARS: usize = 1000;

/// Collects candidate profile links from a faculty listing page
///
/// Any link whose href mentions `faculty` or `people` qualifies, except the
/// listing itself. Order of first appearance is kept.
pub fn extract_faculty_links(html: &str, list_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();

    for link in select_all(document.root_element(), "a[href]") {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let lower = href.to_lowercase();
        if !lower.contains("faculty") && !lower.contains("people") {
            continue;
        }
        let Ok(mut full_url) = list_url.join(href) else {
            continue;
        };
        full_url.set_fragment(None);
        let full_url = full_url.to_string();

        if full_url != list_url.as_str() && !links.contains(&full_url) {
            links.push(full_url);
        }
    }

    links
}

/// Extracts a person record from a faculty profile page
///
/// Never fails: fields whose heuristics all miss are left empty.
pub fn extract_profile(html: &str, profile_url: &Url) -> PersonRecord {
    let document = Html::parse_document(html);
    let page = Page {
        document: &document,
        url: profile_url,
    };

    let mut person = PersonRecord::new(profile_url.as_str());
    person.page_title = first_text(&page, &[page_title]);
    person.name = first_text(&page, &[name_from_h1, name_from_named_heading]);
    person.email = first_text(&page, &[email_from_mailto]);
    person.phone = first_text(&page, &[phone_from_tel, phone_from_text]);
    person.office = first_text(&page, &[office_from_field, office_from_landmark]);
    person.title = first_text(&page, &[title_from_field, title_from_landmark]);
    person.bio = first_text(&page, &[bio_from_field, bio_from_heading, bio_from_main]);
    person.research = first_text(&page, &[research_from_heading]);
    person.lab_url = first_text(&page, &[extract_lab_url]);
    person.photo_url = first_text(&page, &[photo_from_hints, photo_from_first_image]);
    person.research_interests = research_tags(&page);
    person.social = extract_social_links(&page);
    person
}

fn page_title(page: &Page<'_>) -> Option<String> {
    select_text(page.document.root_element(), "title")
}

fn name_from_h1(page: &Page<'_>) -> Option<String> {
    select_text(page.document.root_element(), "h1")
}

fn name_from_named_heading(page: &Page<'_>) -> Option<String> {
    select_all(page.document.root_element(), "h2[class]")
        .into_iter()
        .find(|h| class_contains(*h, "name"))
        .map(element_text)
        .filter(|t| !t.is_empty())
}

fn email_from_mailto(page: &Page<'_>) -> Option<String> {
    let link = select_first(page.document, r#"a[href*="mailto:"]"#)?;
    let href = link.value().attr("href")?;
    let address = href
        .split_once("mailto:")
        .map(|(_, rest)| rest)
        .unwrap_or(href);
    let address = address.split('?').next().unwrap_or("").trim();
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}

fn phone_from_tel(page: &Page<'_>) -> Option<String> {
    let link = select_first(page.document, r#"a[href*="tel:"]"#)?;
    let text = element_text(link);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn phone_from_text(page: &Page<'_>) -> Option<String> {
    let text = element_text(page.document.root_element());
    RE_PHONE.find(&text).map(|m| m.as_str().to_string())
}

fn office_from_field(page: &Page<'_>) -> Option<String> {
    select_text(
        page.document.root_element(),
        ".field--name-field-office, .field-name-field-office, .office",
    )
}

fn office_from_landmark(page: &Page<'_>) -> Option<String> {
    innermost_containing(page.document, "p, div, span", OFFICE_WORDS).map(element_text)
}

fn title_from_field(page: &Page<'_>) -> Option<String> {
    select_text(
        page.document.root_element(),
        ".field--name-field-title, .field-name-field-person-title, .position",
    )
}

fn title_from_landmark(page: &Page<'_>) -> Option<String> {
    innermost_containing(page.document, "p, div, span, h2, h3", TITLE_WORDS).map(element_text)
}

fn bio_from_field(page: &Page<'_>) -> Option<String> {
    select_text(
        page.document.root_element(),
        ".field-name-body, .field--name-body, .biography, .bio",
    )
}

fn bio_from_heading(page: &Page<'_>) -> Option<String> {
    heading_section(page.document, BIO_HEADINGS)
}

fn bio_from_main(page: &Page<'_>) -> Option<String> {
    let main = select_first(page.document, "main")
        .or_else(|| select_first(page.document, "article"))
        .or_else(|| {
            select_all(page.document.root_element(), "div[class]")
                .into_iter()
                .find(|d| class_contains(*d, "content"))
        })?;

    let text = truncate_chars(&element_text(main), FALLBACK_BIO_CHARS);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn research_from_heading(page: &Page<'_>) -> Option<String> {
    heading_section(page.document, RESEARCH_HEADINGS)
}

fn photo_from_hints(page: &Page<'_>) -> Option<String> {
    select_all(page.document.root_element(), "img[src]")
        .into_iter()
        .find(|img| {
            let alt = img.value().attr("alt").unwrap_or("").to_lowercase();
            PHOTO_HINTS
                .iter()
                .any(|hint| class_contains(*img, hint) || alt.contains(hint))
        })
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| absolute_url(page, src))
}

fn photo_from_first_image(page: &Page<'_>) -> Option<String> {
    select_all(page.document.root_element(), "img[src]")
        .into_iter()
        .filter_map(|img| img.value().attr("src"))
        .find(|src| {
            let lower = src.to_lowercase();
            !src.trim().is_empty() && !PHOTO_SKIP.iter().any(|skip| lower.contains(skip))
        })
        .and_then(|src| absolute_url(page, src))
}

/// Tag-like spans and links (class mentions tag, category or keyword)
fn research_tags(page: &Page<'_>) -> Vec<String> {
    let root = page.document.root_element();

    let field_links: Vec<String> = select_all(root, ".field-name-field-research-interests a")
        .into_iter()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect();
    if !field_links.is_empty() {
        return field_links;
    }

    select_all(root, "span[class], a[class]")
        .into_iter()
        .filter(|el| {
            class_contains(*el, "tag") || class_contains(*el, "category") || class_contains(*el, "keyword")
        })
        .map(|el| clean_text(&element_text(el)))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Sequential faculty directory scraper
pub struct FacultyScraper {
    client: Client,
    delay: Duration,
}

impl FacultyScraper {
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

    /// Fetches the listing and returns candidate profile URLs
    ///
    /// A failed fetch is logged and yields an empty list.
    pub async fn scrape_list(&self, list_url: &str) -> Vec<String> {
        let Ok(list) = Url::parse(list_url) else {
            tracing::warn!("Invalid faculty list URL: {}", list_url);
            return Vec::new();
        };

        match fetch_url(&self.client, list.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                let links = extract_faculty_links(&response.text(), &list);
                tracing::info!("Found {} potential faculty profile links", links.len());
                links
            }
            FetchResult::Success(response) => {
                tracing::warn!("Error fetching faculty list: HTTP {}", response.status_code);
                Vec::new()
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Error fetching faculty list: {} ({})", kind, error);
                Vec::new()
            }
        }
    }

    /// Fetches one profile; fetch failures produce a record carrying `error`
    pub async fn scrape_profile(&self, profile_url: &str) -> PersonRecord {
        let Ok(url) = Url::parse(profile_url) else {
            let mut person = PersonRecord::new(profile_url);
            person.error = Some("invalid URL".to_string());
            return person;
        };

        match fetch_url(&self.client, url.as_str()).await {
            FetchResult::Success(response) if response.is_success() => {
                extract_profile(&response.text(), &url)
            }
            FetchResult::Success(response) => {
                let mut person = PersonRecord::new(profile_url);
                person.error = Some(format!("HTTP {}", response.status_code));
                person
            }
            FetchResult::NetworkError { kind, error } => {
                tracing::warn!("Error scraping {}: {}", profile_url, error);
                let mut person = PersonRecord::new(profile_url);
                person.error = Some(kind.to_string());
                person
            }
        }
    }

    /// Scrapes the listing and then every profile on it
    pub async fn scrape_all(&self, list_url: &str) -> Vec<PersonRecord> {
        let urls = self.scrape_list(list_url).await;
        if urls.is_empty() {
            tracing::warn!("No faculty URLs found at {}", list_url);
            return Vec::new();
        }

        let mut people = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            tracing::debug!("[{}/{}] {}", i + 1, urls.len(), url);
            people.push(self.scrape_profile(url).await);
        }

        tracing::info!("Faculty scraping complete: {} profiles", people.len());
        people
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"<html>
        <head><title>Jane Doe | EEMB</title></head>
        <body>
            <header><img src="/themes/logo.png" alt="Site logo"></header>
            <main>
                <h1>Jane Doe</h1>
                <div class="field--name-field-title">Associate Professor</div>
                <div class="contact">
                    <p>Office: 2112 Noble Hall</p>
                    <a href="mailto:jdoe@ucsb.edu">jdoe@ucsb.edu</a>
                    <a href="tel:8058931234">(805) 893-1234</a>
                </div>
                <img class="profile-photo" src="/files/jdoe.jpg" alt="Jane Doe">
                <div class="links">
                    <a href="https://doelab.example.org">Doe Lab website</a>
                    <span class="research-tag">Kelp</span>
                    <span class="research-tag">Food webs</span>
                </div>
                <h2>Biography</h2>
                <p>Jane studies kelp forest food webs.</p>
                <h2>Research</h2>
                <p>Trophic cascades in temperate reefs.</p>
            </main>
        </body></html>"#;

    fn profile_url() -> Url {
        Url::parse("https://example.com/people/faculty/jane-doe").unwrap()
    }

    #[test]
    fn test_extract_profile_fields() {
        let person = extract_profile(PROFILE, &profile_url());

        assert_eq!(person.page_title, "Jane Doe | EEMB");
        assert_eq!(person.name, "Jane Doe");
        assert_eq!(person.email, "jdoe@ucsb.edu");
        assert_eq!(person.phone, "(805) 893-1234");
        assert_eq!(person.office, "Office: 2112 Noble Hall");
        assert_eq!(person.title, "Associate Professor");
        assert_eq!(person.bio, "Jane studies kelp forest food webs.");
        assert_eq!(person.research, "Trophic cascades in temperate reefs.");
        assert_eq!(person.lab_url, "https://doelab.example.org/");
        assert_eq!(person.photo_url, "https://example.com/files/jdoe.jpg");
        assert_eq!(person.research_interests, vec!["Kelp", "Food webs"]);
        assert!(person.error.is_none());
    }

    #[test]
    fn test_empty_page_yields_empty_fields() {
        let person = extract_profile("<html><body></body></html>", &profile_url());
        assert!(person.name.is_empty());
        assert!(person.email.is_empty());
        assert!(person.photo_url.is_empty());
        assert!(person.research_interests.is_empty());
        assert_eq!(person.profile_url, profile_url().as_str());
    }

    #[test]
    fn test_phone_regex_fallback() {
        let html = "<html><body><p>Call 805.893.4321 anytime</p></body></html>";
        let person = extract_profile(html, &profile_url());
        assert_eq!(person.phone, "805.893.4321");
    }

    #[test]
    fn test_extract_faculty_links() {
        let list = Url::parse("https://example.com/people/faculty").unwrap();
        let html = r#"<body>
            <a href="/people/faculty">All faculty</a>
            <a href="/people/faculty/jane-doe">Jane Doe</a>
            <a href="/people/faculty/jane-doe#bio">Jane Doe bio</a>
            <a href="/people/faculty/john-roe">John Roe</a>
            <a href="/news">News</a>
        </body>"#;

        let links = extract_faculty_links(html, &list);
        assert_eq!(
            links,
            vec![
                "https://example.com/people/faculty/jane-doe".to_string(),
                "https://example.com/people/faculty/john-roe".to_string(),
            ]
        );
    }
}

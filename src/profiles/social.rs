use crate::profiles::chain::{absolute_url, element_text, select_all, Page};
use crate::records::SocialLinks;

/// Link-text words that mark a personal or lab site
const LAB_WORDS: &[&str] = &["lab", "website", "homepage", "personal"];

/// Link-text words that mark an individual's own site
const HOMEPAGE_WORDS: &[&str] = &["homepage", "website", "personal site"];

/// Scans every link on the page for scholarly and social profiles
///
/// Later links overwrite earlier ones for the same network. The personal
/// website is the first absolute homepage link that is not a lab site.
pub fn extract_social_links(page: &Page<'_>) -> SocialLinks {
    let mut social = SocialLinks::default();

    for link in select_all(page.document.root_element(), "a[href]") {
        let Some(href) = link.value().attr("href").map(str::trim) else {
            continue;
        };
        let lower = href.to_lowercase();

        if lower.contains("scholar.google") {
            social.google_scholar = href.to_string();
        }
        if lower.contains("orcid.org") {
            if let Some(id) = href.trim_end_matches('/').rsplit('/').next() {
                social.orcid = id.to_string();
            }
        }
        if lower.contains("twitter.com") || lower.contains("://x.com") || lower.contains(".x.com") {
            social.twitter = href.to_string();
        }
        if lower.contains("linkedin.com") {
            social.linkedin = href.to_string();
        }
        if social.personal_website.is_empty() && is_personal_site(&element_text(link), &lower) {
            social.personal_website = href.to_string();
        }
    }

    social
}

fn is_personal_site(text: &str, href: &str) -> bool {
    let text = text.to_lowercase();
    href.starts_with("http")
        && !text.contains("lab")
        && !href.contains("lab.")
        && HOMEPAGE_WORDS.iter().any(|w| text.contains(w))
}

/// First absolute link whose text names a lab or personal website
pub fn extract_lab_url(page: &Page<'_>) -> Option<String> {
    select_all(page.document.root_element(), "a[href]")
        .into_iter()
        .find(|link| {
            let text = element_text(*link).to_lowercase();
            LAB_WORDS.iter().any(|w| text.contains(w))
        })
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| absolute_url(page, href))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social and external profile links found on a person's page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub google_scholar: String,
    /// ORCID identifier (the last path segment, not the full URL)
    #[serde(default)]
    pub orcid: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub personal_website: String,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.google_scholar.is_empty()
            && self.orcid.is_empty()
            && self.twitter.is_empty()
            && self.linkedin.is_empty()
            && self.personal_website.is_empty()
    }
}

/// Best-effort personnel record
///
/// Every field may be empty; a heuristic miss is never an error. Both the
/// faculty catalog and the all-people catalog hold these records; only the
/// people directory fills `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub bio: String,
    /// Free-text research description
    #[serde(default)]
    pub research: String,
    #[serde(default)]
    pub research_interests: Vec<String>,
    #[serde(default)]
    pub photo_url: String,
    pub profile_url: String,
    #[serde(default)]
    pub lab_url: String,
    #[serde(default)]
    pub page_title: String,
    /// Directory category (Faculty, Staff, ...)
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    pub scraped_at: DateTime<Utc>,
    /// Set when the profile page itself could not be fetched
    #[serde(default)]
    pub error: Option<String>,
}

impl PersonRecord {
    /// Creates an empty record for a profile URL
    pub fn new(profile_url: &str) -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            office: String::new(),
            bio: String::new(),
            research: String::new(),
            research_interests: Vec::new(),
            photo_url: String::new(),
            profile_url: profile_url.to_string(),
            lab_url: String::new(),
            page_title: String::new(),
            category: None,
            social: SocialLinks::default(),
            scraped_at: Utc::now(),
            error: None,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One visited page in the site map
///
/// Failed visits are recorded too: `status_code` is None for network
/// failures and `error` says what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL the crawler visited
    pub url: String,

    /// URL after redirects, when a response arrived
    #[serde(default)]
    pub final_url: Option<String>,

    #[serde(default)]
    pub title: String,

    /// Content of `<meta name="description">`
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status_code: Option<u16>,

    #[serde(default)]
    pub word_count: usize,

    #[serde(default)]
    pub internal_link_count: usize,

    #[serde(default)]
    pub external_link_count: usize,

    #[serde(default)]
    pub image_count: usize,

    #[serde(default)]
    pub content_type: String,

    /// `Last-Modified` response header, verbatim
    #[serde(default)]
    pub last_modified: String,

    pub crawled_at: DateTime<Utc>,

    #[serde(default)]
    pub error: Option<String>,
}

impl PageRecord {
    /// Creates a record for a visit that produced no usable response
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            final_url: None,
            title: String::new(),
            description: String::new(),
            status_code: None,
            word_count: 0,
            internal_link_count: 0,
            external_link_count: 0,
            image_count: 0,
            content_type: String::new(),
            last_modified: String::new(),
            crawled_at: Utc::now(),
            error: Some(error.into()),
        }
    }

    /// Returns true if the page was fetched with HTTP 200
    pub fn is_ok(&self) -> bool {
        self.status_code == Some(200) && self.error.is_none()
    }
}

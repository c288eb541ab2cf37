//! HTTP fetcher implementation
//!
//! Every stage talks to the origin site through these two calls. HTTP error
//! statuses are returned as data; only failures that produced no response at
//! all come back as `NetworkError`.

use crate::config::UserAgentConfig;
use reqwest::{header, redirect::Policy, Client};
use std::fmt;
use std::time::Duration;

/// Maximum redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Why a request produced no response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request exceeded the client timeout
    Timeout,
    /// DNS, TCP or TLS failure before any response
    Connection,
    /// Anything else (redirect limit, body decode, ...)
    Other,
}

impl FailureKind {
    fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connection
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connection => "connection_error",
            Self::Other => "error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed GET, whatever its status
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// Final URL after redirects
    pub final_url: String,
    pub status_code: u16,
    /// Content-Type header value, empty when absent
    pub content_type: String,
    /// Last-Modified header value, empty when absent
    pub last_modified: String,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Content-Type without parameters, lowercased
    pub fn mime_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase()
    }
}

/// Result of a GET request
#[derive(Debug)]
pub enum FetchResult {
    /// A response arrived (any status code)
    Success(FetchedResponse),

    /// No response arrived
    NetworkError { kind: FailureKind, error: String },
}

/// Result of a HEAD probe
#[derive(Debug)]
pub enum ProbeResult {
    Response {
        status_code: u16,
        final_url: String,
        content_type: String,
        elapsed: Duration,
    },
    NetworkError {
        kind: FailureKind,
        error: String,
        elapsed: Duration,
    },
}

/// Formats the user agent string sent with every request
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed automatically (up to 10 hops) since every stage
/// records the final URL rather than the redirect chain.
///
/// # Example
///
/// ```no_run
/// use site_harvester::config::UserAgentConfig;
/// use site_harvester::http::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "EEMB-Scraper".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

fn header_value(headers: &header::HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Fetches a URL with GET, following redirects
///
/// # Returns
///
/// `FetchResult::Success` for any HTTP response, including 4xx/5xx;
/// `FetchResult::NetworkError` when no response (or no complete body) arrived.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            return FetchResult::NetworkError {
                kind: FailureKind::classify(&e),
                error: e.to_string(),
            }
        }
    };

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = header_value(response.headers(), header::CONTENT_TYPE);
    let last_modified = header_value(response.headers(), header::LAST_MODIFIED);

    match response.bytes().await {
        Ok(body) => FetchResult::Success(FetchedResponse {
            final_url,
            status_code,
            content_type,
            last_modified,
            body: body.to_vec(),
        }),
        Err(e) => FetchResult::NetworkError {
            kind: FailureKind::classify(&e),
            error: e.to_string(),
        },
    }
}

/// Sends a HEAD request, following redirects, and times it
pub async fn probe_url(client: &Client, url: &str) -> ProbeResult {
    let started = std::time::Instant::now();

    match client.head(url).send().await {
        Ok(response) => ProbeResult::Response {
            status_code: response.status().as_u16(),
            final_url: response.url().to_string(),
            content_type: header_value(response.headers(), header::CONTENT_TYPE),
            elapsed: started.elapsed(),
        },
        Err(e) => ProbeResult::NetworkError {
            kind: FailureKind::classify(&e),
            error: e.to_string(),
            elapsed: started.elapsed(),
        },
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of a link check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// HTTP 200
    Ok,
    /// Any other 2xx
    OkOther,
    /// 3xx left after redirect following
    Redirect,
    /// HTTP 404
    NotFound,
    /// Any other 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// The probe ran out of time
    Timeout,
    /// Connection or protocol failure before any status arrived
    Error,
    /// A status outside 200..600
    Unknown,
}

impl StatusBucket {
    /// Maps an HTTP status code to its bucket
    ///
    /// Pure: the same code always yields the same bucket. Timeouts and
    /// connection failures never reach this function; they have their own
    /// buckets.
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            200 => Self::Ok,
            201..=299 => Self::OkOther,
            300..=399 => Self::Redirect,
            404 => Self::NotFound,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Returns true for outcomes that need attention in the broken links report
    pub fn is_broken(&self) -> bool {
        !matches!(self, Self::Ok | Self::OkOther | Self::Redirect)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::OkOther => "ok_other",
            Self::Redirect => "redirect",
            Self::NotFound => "not_found",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::Timeout => "timeout",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }

    /// All buckets, in report order
    pub fn all() -> [StatusBucket; 9] {
        [
            Self::Ok,
            Self::OkOther,
            Self::Redirect,
            Self::NotFound,
            Self::ClientError,
            Self::ServerError,
            Self::Timeout,
            Self::Error,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCheckRecord {
    pub url: String,
    /// Page the link was found on
    pub source_page: String,
    pub status_code: Option<u16>,
    pub status_bucket: StatusBucket,
    pub response_time_ms: f64,
    pub final_url: Option<String>,
    pub is_redirect: bool,
    #[serde(default)]
    pub content_type: String,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_codes_map_to_one_bucket() {
        assert_eq!(StatusBucket::from_status(200), StatusBucket::Ok);
        assert_eq!(StatusBucket::from_status(301), StatusBucket::Redirect);
        assert_eq!(StatusBucket::from_status(404), StatusBucket::NotFound);
        assert_eq!(StatusBucket::from_status(500), StatusBucket::ServerError);
    }

    #[test]
    fn test_classification_is_stable() {
        for code in [200u16, 204, 301, 404, 410, 500, 503, 99, 700] {
            assert_eq!(
                StatusBucket::from_status(code),
                StatusBucket::from_status(code)
            );
        }
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(StatusBucket::from_status(204), StatusBucket::OkOther);
        assert_eq!(StatusBucket::from_status(299), StatusBucket::OkOther);
        assert_eq!(StatusBucket::from_status(399), StatusBucket::Redirect);
        assert_eq!(StatusBucket::from_status(403), StatusBucket::ClientError);
        assert_eq!(StatusBucket::from_status(599), StatusBucket::ServerError);
        assert_eq!(StatusBucket::from_status(100), StatusBucket::Unknown);
        assert_eq!(StatusBucket::from_status(600), StatusBucket::Unknown);
    }

    #[test]
    fn test_broken_buckets() {
        assert!(!StatusBucket::Ok.is_broken());
        assert!(!StatusBucket::OkOther.is_broken());
        assert!(!StatusBucket::Redirect.is_broken());
        assert!(StatusBucket::NotFound.is_broken());
        assert!(StatusBucket::Timeout.is_broken());
        assert!(StatusBucket::Error.is_broken());
    }

    #[test]
    fn test_bucket_serializes_snake_case() {
        let json = serde_json::to_string(&StatusBucket::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
        let json = serde_json::to_string(&StatusBucket::OkOther).unwrap();
        assert_eq!(json, "\"ok_other\"");
    }
}

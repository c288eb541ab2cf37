use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a downloaded file, used to partition the asset tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Document,
    Other,
}

impl MediaKind {
    /// Subdirectory of the asset root holding files of this kind
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Document => "documents",
            Self::Other => "others",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file persisted by the media downloader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub source_url: String,
    pub local_path: String,
    pub filename: String,
    pub kind: MediaKind,
    pub content_type: String,
    pub size_bytes: u64,
    /// Hex SHA-256 of the file bytes
    pub content_hash: String,
    /// `WxH` for images whose header could be read
    pub dimensions: Option<String>,
    pub downloaded_at: DateTime<Utc>,
}

impl MediaRecord {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

//! Media downloader with content-hash deduplication
//!
//! One downloader instance covers one run. It remembers the hash of every
//! file it has written, so byte-identical content reached through different
//! URLs lands on disk exactly once.

use crate::config::Config;
use crate::downloader::classify::{categorize, format_dimensions};
use crate::downloader::harvest::MediaTarget;
use crate::downloader::naming::{content_hash, derive_filename, unique_path};
use crate::http::{build_http_client, fetch_url, FetchResult};
use crate::records::{MediaKind, MediaRecord};
use crate::{HarvestError, Result};
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Counters for one download run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Sequential downloader writing into a type-partitioned asset tree
pub struct MediaDownloader {
    client: Client,
    assets_dir: PathBuf,
    delay: Duration,
    seen_hashes: HashSet<String>,
    images: Vec<MediaRecord>,
    documents: Vec<MediaRecord>,
    stats: DownloadStats,
}

impl MediaDownloader {
    /// Builds a downloader from the `[downloader]` and `[user-agent]` sections
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.downloader.timeout_secs),
        )?;

        Ok(Self::with_client(
            client,
            &config.downloader.assets_dir,
            Duration::from_millis(config.downloader.request_delay_ms),
        ))
    }

    pub fn with_client(client: Client, assets_dir: impl AsRef<Path>, delay: Duration) -> Self {
        Self {
            client,
            assets_dir: assets_dir.as_ref().to_path_buf(),
            delay,
            seen_hashes: HashSet::new(),
            images: Vec::new(),
            documents: Vec::new(),
            stats: DownloadStats::default(),
        }
    }

    /// Downloads one URL
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - The file was written
    /// * `Ok(None)` - The content hash was already seen in this run; nothing was written
    /// * `Err(_)` - Network failure, non-2xx status or filesystem error
    pub async fn download(&mut self, url: &str, hint: MediaKind) -> Result<Option<MediaRecord>> {
        let response = match fetch_url(&self.client, url).await {
            FetchResult::Success(response) => response,
            FetchResult::NetworkError { kind, error } => {
                return Err(HarvestError::Fetch {
                    url: url.to_string(),
                    message: format!("{} ({})", kind, error),
                })
            }
        };

        if !response.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: response.status_code,
            });
        }

        let hash = content_hash(&response.body);
        if self.seen_hashes.contains(&hash) {
            tracing::debug!("Skipping duplicate: {}", url);
            return Ok(None);
        }

        let kind = match categorize(&response.content_type) {
            MediaKind::Other => hint,
            kind => kind,
        };

        let type_dir = self.assets_dir.join(kind.directory());
        std::fs::create_dir_all(&type_dir)?;

        let filename = derive_filename(url, &response.content_type);
        let path = unique_path(&type_dir, &filename);
        std::fs::write(&path, &response.body)?;
        self.seen_hashes.insert(hash.clone());

        let dimensions = match kind {
            MediaKind::Image => format_dimensions(&response.body),
            _ => None,
        };

        let record = MediaRecord {
            source_url: url.to_string(),
            local_path: path.display().to_string(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename),
            kind,
            content_type: response.content_type,
            size_bytes: response.body.len() as u64,
            content_hash: hash,
            dimensions,
            downloaded_at: Utc::now(),
        };

        tracing::debug!("Saved {} -> {}", url, record.local_path);

        match kind {
            MediaKind::Image => self.images.push(record.clone()),
            MediaKind::Document | MediaKind::Other => self.documents.push(record.clone()),
        }

        Ok(Some(record))
    }

    /// Downloads every target in order, pausing between requests
    ///
    /// Failures are logged and counted; they never stop the run.
    pub async fn download_all(&mut self, targets: &[MediaTarget]) -> DownloadStats {
        let before = self.stats;

        for (i, target) in targets.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.download(&target.url, target.hint).await {
                Ok(Some(_)) => self.stats.downloaded += 1,
                Ok(None) => self.stats.duplicates += 1,
                Err(e) => {
                    tracing::warn!("Error downloading {}: {}", target.url, e);
                    self.stats.failed += 1;
                }
            }
        }

        DownloadStats {
            downloaded: self.stats.downloaded - before.downloaded,
            duplicates: self.stats.duplicates - before.duplicates,
            failed: self.stats.failed - before.failed,
        }
    }

    /// Image catalog entries written so far
    pub fn images(&self) -> &[MediaRecord] {
        &self.images
    }

    /// Document catalog entries (documents and unclassified files)
    pub fn documents(&self) -> &[MediaRecord] {
        &self.documents
    }

    pub fn stats(&self) -> DownloadStats {
        self.stats
    }
}

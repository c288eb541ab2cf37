//! Media downloading
//!
//! This module handles:
//! - Harvesting image and document URLs from crawled pages
//! - Naming files and resolving name collisions
//! - Classifying downloads by content type and reading image dimensions
//! - Writing each distinct file once into `images/`, `documents/` or `others/`

pub mod classify;
mod harvest;
mod media;
pub mod naming;

pub use harvest::{collect_media_urls, harvest_media, photo_targets, MediaTarget};
pub use media::{DownloadStats, MediaDownloader};

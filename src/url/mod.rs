//! URL handling module for Site-Harvester
//!
//! This module provides the URL identity used by the crawl frontier and the
//! same-domain test that separates internal links from external ones.

mod domain;
mod normalize;

pub use domain::{is_same_domain, network_location};
pub use normalize::{normalize_url, resolve_link};

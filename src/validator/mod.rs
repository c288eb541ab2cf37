//! Link validation
//!
//! Links are harvested from the crawled pages, probed with HEAD through a
//! bounded pool and classified into status buckets.

mod harvest;
mod pool;
mod report;

pub use harvest::{collect_link_targets, harvest_links, LinkTarget};
pub use pool::{check_link, LinkValidator};
pub use report::ValidationReport;

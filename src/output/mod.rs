//! Output module for artifacts and run summaries
//!
//! This module handles:
//! - Reading and writing the JSON/CSV artifacts every stage exchanges
//! - Computing and printing end-of-run statistics

mod artifacts;
pub mod catalog;
pub mod stats;

pub use artifacts::{
    DataDir, ALL_PEOPLE_SCRAPED, BROKEN_LINKS, DOCUMENTS_CATALOG, FACULTY_SCRAPED,
    IMAGES_CATALOG, LINK_VALIDATION, SITE_MAP,
};
pub use stats::{
    print_category_summary, print_crawl_statistics, print_download_statistics,
    print_import_summary, print_people_statistics, print_validation_report, CrawlStatistics,
    PeopleStatistics,
};

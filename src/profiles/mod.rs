//! Personnel profile scraping
//!
//! Two independent scrapers share the extractor-chain helpers: the faculty
//! directory scraper and the all-people directory scraper.

pub mod chain;
mod faculty;
mod people;
mod social;

pub use faculty::{extract_faculty_links, extract_profile, FacultyScraper};
pub use people::{
    category_summary, extract_person_details, merge_details, parse_directory, PeopleScraper,
    ProfileDetails, UNKNOWN_CATEGORY,
};
pub use social::{extract_lab_url, extract_social_links};

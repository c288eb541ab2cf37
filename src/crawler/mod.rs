//! Crawler module for building the site map
//!
//! This module contains the core crawling logic, including:
//! - HTML parsing and link extraction
//! - The breadth-first frontier with its visited-set
//! - The sequential crawl loop

mod coordinator;
mod frontier;
mod parser;

pub use coordinator::{crawl, run_crawl, Coordinator};
pub use frontier::Frontier;
pub use parser::{extract_links_simple, parse_page, ImageRef, ParsedPage};

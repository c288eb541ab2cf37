//! End-of-run statistics
//!
//! Each stage computes a small summary struct from its records and prints
//! it to stdout once the run finishes.

use crate::downloader::DownloadStats;
use crate::import::ImportSummary;
use crate::records::{MediaRecord, PageRecord, PersonRecord};
use crate::validator::ValidationReport;
use std::collections::BTreeMap;

/// Slow links listed in the validation summary
const SLOW_LINKS_SHOWN: usize = 5;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of pages visited
    pub total_pages: usize,

    /// Pages fetched with HTTP 200
    pub successful: usize,

    /// Pages that failed or returned another status
    pub errors: usize,

    pub internal_links: usize,
    pub external_links: usize,
    pub images: usize,
}

impl CrawlStatistics {
    pub fn from_pages(pages: &[PageRecord]) -> Self {
        let successful = pages.iter().filter(|p| p.is_ok()).count();
        Self {
            total_pages: pages.len(),
            successful,
            errors: pages.len() - successful,
            internal_links: pages.iter().map(|p| p.internal_link_count).sum(),
            external_links: pages.iter().map(|p| p.external_link_count).sum(),
            images: pages.iter().map(|p| p.image_count).sum(),
        }
    }
}

/// Prints crawl statistics to stdout in a formatted manner
pub fn print_crawl_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");
    println!("  Total pages crawled: {}", stats.total_pages);
    println!("  Successful (200): {}", stats.successful);
    println!("  Errors: {}", stats.errors);
    println!("  Total internal links: {}", stats.internal_links);
    println!("  Total external links: {}", stats.external_links);
    println!("  Total images: {}", stats.images);

    let success_rate = if stats.total_pages > 0 {
        (stats.successful as f64 / stats.total_pages as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "\nSuccess Rate: {:.1}% ({} / {} pages)",
        success_rate, stats.successful, stats.total_pages
    );
}

fn total_mb(records: &[MediaRecord]) -> f64 {
    records.iter().map(|r| r.size_mb()).sum()
}

pub fn print_download_statistics(stats: &DownloadStats, images: &[MediaRecord], documents: &[MediaRecord]) {
    println!("=== Download Statistics ===\n");
    println!("  Images downloaded: {}", images.len());
    println!("  Documents downloaded: {}", documents.len());
    println!("  Duplicates skipped: {}", stats.duplicates);
    println!("  Failed downloads: {}", stats.failed);
    println!("  Total size (images): {:.2} MB", total_mb(images));
    println!("  Total size (documents): {:.2} MB", total_mb(documents));
}

pub fn print_validation_report(report: &ValidationReport, slow_threshold_ms: u64) {
    println!("=== Link Validation Statistics ===\n");
    println!("  Total links checked: {}", report.total);
    for (bucket, count) in &report.bucket_counts {
        if *count > 0 {
            println!("  {}: {}", bucket, count);
        }
    }
    println!("  Broken: {}", report.broken.len());

    if !report.slow.is_empty() {
        println!(
            "\n{} slow links (>{}ms):",
            report.slow.len(),
            slow_threshold_ms
        );
        for link in report.slow.iter().take(SLOW_LINKS_SHOWN) {
            println!("    {} - {:.2}ms", link.url, link.response_time_ms);
        }
    }
}

/// Field coverage of a person catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeopleStatistics {
    pub total: usize,
    pub with_email: usize,
    pub with_photo: usize,
    pub with_bio: usize,
    pub with_research: usize,
    pub errors: usize,
}

impl PeopleStatistics {
    pub fn from_people(people: &[PersonRecord]) -> Self {
        let count = |f: fn(&PersonRecord) -> bool| people.iter().filter(|p| f(p)).count();
        Self {
            total: people.len(),
            with_email: count(|p| !p.email.is_empty()),
            with_photo: count(|p| !p.photo_url.is_empty()),
            with_bio: count(|p| !p.bio.is_empty()),
            with_research: count(|p| !p.research.is_empty() || !p.research_interests.is_empty()),
            errors: count(|p| p.error.is_some()),
        }
    }
}

pub fn print_people_statistics(stats: &PeopleStatistics) {
    println!("=== Scraping Statistics ===\n");
    println!("  Total people scraped: {}", stats.total);
    println!("  With emails: {}", stats.with_email);
    println!("  With photos: {}", stats.with_photo);
    println!("  With bios: {}", stats.with_bio);
    println!("  With research descriptions: {}", stats.with_research);
    if stats.errors > 0 {
        println!("  Failed profiles: {}", stats.errors);
    }
}

pub fn print_category_summary(summary: &BTreeMap<String, usize>) {
    println!("\nSummary by Category:");
    for (category, count) in summary {
        println!("  {}: {}", category, count);
    }
}

pub fn print_import_summary(summary: &ImportSummary) {
    println!("=== Import Summary ===\n");
    println!("  Inserted: {}", summary.inserted);
    println!("  Skipped (already present): {}", summary.skipped);
    println!("  Filtered (not a faculty profile): {}", summary.filtered);
    println!("  Failed: {}", summary.failed);
    println!("  Total rows in store: {}", summary.total_in_store);
}

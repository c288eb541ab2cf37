//! Stage runners and the run-all orchestrator
//!
//! Each stage reads its inputs from the data directory, does its work and
//! writes its artifacts back. Stages never call each other; the orchestrator
//! runs them in order and keeps going when one fails.

use crate::config::Config;
use crate::crawler::run_crawl;
use crate::downloader::{harvest_media, photo_targets, MediaDownloader};
use crate::http::build_http_client;
use crate::import::{
    apply_roster, import_people, sql, transform_all, FacultyTransform, ImportSummary,
    RosterOutcome, SAMPLE_ROSTER,
};
use crate::output::{
    print_category_summary, print_crawl_statistics, print_download_statistics,
    print_import_summary, print_people_statistics, print_validation_report, CrawlStatistics,
    DataDir, PeopleStatistics, ALL_PEOPLE_SCRAPED, FACULTY_SCRAPED,
};
use crate::profiles::{category_summary, FacultyScraper, PeopleScraper};
use crate::records::{PageRecord, PersonRecord};
use crate::storage::open_store;
use crate::validator::{harvest_links, LinkValidator, ValidationReport};
use crate::{ConfigError, HarvestError, Result};
use reqwest::Client;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

fn data_dir(config: &Config) -> DataDir {
    DataDir::new(&config.output.data_dir)
}

/// Client used to re-fetch site-map pages when harvesting links and media
fn harvest_client(config: &Config) -> Result<Client> {
    Ok(build_http_client(
        &config.user_agent,
        Duration::from_secs(config.crawler.timeout_secs),
    )?)
}

/// Treats a missing optional artifact as empty
fn optional<T>(loaded: Result<Vec<T>>) -> Result<Vec<T>> {
    match loaded {
        Err(HarvestError::MissingInput(path)) => {
            tracing::debug!("Optional input not found: {}", path.display());
            Ok(Vec::new())
        }
        other => other,
    }
}

fn require_url<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ConfigError::Validation(format!("scraper.{} is not set", key)).into())
}

/// Crawls the site and writes the site map
pub async fn crawl_site(config: &Config) -> Result<Vec<PageRecord>> {
    tracing::info!("Starting crawl at {}", config.crawler.start_url);
    let pages = run_crawl(config).await?;

    data_dir(config).save_site_map(&pages)?;
    print_crawl_statistics(&CrawlStatistics::from_pages(&pages));
    Ok(pages)
}

/// Scrapes the faculty directory and every listed profile
pub async fn scrape_faculty(config: &Config) -> Result<Vec<PersonRecord>> {
    let list_url = require_url(&config.scraper.faculty_list_url, "faculty-list-url")?;

    let scraper = FacultyScraper::new(config)?;
    let people = scraper.scrape_all(list_url).await;

    data_dir(config).save_people(FACULTY_SCRAPED, &people)?;
    print_people_statistics(&PeopleStatistics::from_people(&people));
    Ok(people)
}

/// Scrapes the all-people directory, enriched from profile pages
pub async fn scrape_people(config: &Config) -> Result<Vec<PersonRecord>> {
    let people_url = require_url(&config.scraper.people_url, "people-url")?;

    let scraper = PeopleScraper::new(config)?;
    let people = scraper.scrape_all(people_url).await;

    data_dir(config).save_people(ALL_PEOPLE_SCRAPED, &people)?;
    print_people_statistics(&PeopleStatistics::from_people(&people));
    print_category_summary(&category_summary(&people));
    Ok(people)
}

/// Downloads media referenced by the site map and faculty photos
pub async fn download_media(config: &Config) -> Result<()> {
    let data = data_dir(config);
    let pages = data.load_site_map()?;
    let faculty = optional(data.load_people(FACULTY_SCRAPED))?;

    let client = harvest_client(config)?;
    let delay = Duration::from_millis(config.crawler.request_delay_ms);
    let mut targets = harvest_media(&client, &pages, delay).await;
    targets.extend(photo_targets(&faculty));
    tracing::info!("Found {} media URLs", targets.len());

    let mut downloader = MediaDownloader::new(config)?;
    let stats = downloader.download_all(&targets).await;

    data.save_media_catalogs(downloader.images(), downloader.documents())?;
    print_download_statistics(&stats, downloader.images(), downloader.documents());
    Ok(())
}

/// Validates every link found on the site map's pages
pub async fn validate_links(config: &Config) -> Result<ValidationReport> {
    let data = data_dir(config);
    let pages = data.load_site_map()?;

    let client = harvest_client(config)?;
    let delay = Duration::from_millis(config.crawler.request_delay_ms);
    let targets = harvest_links(&client, &pages, delay).await;
    tracing::info!("Found {} unique links to validate", targets.len());

    let validator = LinkValidator::new(config)?;
    let records = validator.validate(targets).await;

    data.save_link_validation(&records)?;
    let report = ValidationReport::build(&records, config.validator.slow_threshold_ms);
    print_validation_report(&report, config.validator.slow_threshold_ms);
    Ok(report)
}

/// Inserts scraped faculty into the datastore
pub fn import_faculty(config: &Config) -> Result<ImportSummary> {
    let people = data_dir(config).load_people(FACULTY_SCRAPED)?;
    let transform = FacultyTransform::new(&config.import)?;

    let mut store = open_store(Path::new(&config.import.database_path))?;
    let summary = import_people(&mut store, &transform, &people)?;

    print_import_summary(&summary);
    Ok(summary)
}

/// Writes the SQL statements file for offline loading
///
/// Contact updates come from the all-people catalog when it exists.
pub fn export_sql(config: &Config) -> Result<usize> {
    let data = data_dir(config);
    let faculty = data.load_people(FACULTY_SCRAPED)?;
    let directory = optional(data.load_people(ALL_PEOPLE_SCRAPED))?;

    let transform = FacultyTransform::new(&config.import)?;
    let rows = transform_all(&transform, &faculty);

    let path = Path::new(&config.import.sql_path);
    let statements = sql::write_script(path, &rows, &directory)?;
    println!("Generated {} SQL statements in {}", statements, path.display());
    Ok(statements)
}

/// Applies the sample roster corrections to the datastore
pub fn apply_sample_roster(config: &Config) -> Result<RosterOutcome> {
    let mut store = open_store(Path::new(&config.import.database_path))?;
    let outcome = apply_roster(&mut store, SAMPLE_ROSTER)?;

    println!("Updated {} rows from roster", outcome.updated);
    if !outcome.missing.is_empty() {
        println!("Not found in datastore:");
        for name in &outcome.missing {
            println!("  - {}", name);
        }
    }
    Ok(outcome)
}

/// Outcome of one orchestrated task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Skipped(String),
    Failed(String),
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "ok"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Failed(error) => write!(f, "FAILED ({})", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: &'static str,
    pub status: TaskStatus,
    pub elapsed: Duration,
}

/// Results of a `run-all` invocation, in execution order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub tasks: Vec<TaskReport>,
}

impl RunSummary {
    fn record<T>(&mut self, name: &'static str, started: Instant, result: Result<T>) {
        let status = match result {
            Ok(_) => TaskStatus::Succeeded,
            Err(e) => {
                tracing::error!("Task {} failed: {}", name, e);
                TaskStatus::Failed(e.to_string())
            }
        };
        self.tasks.push(TaskReport {
            name,
            status,
            elapsed: started.elapsed(),
        });
    }

    fn skip(&mut self, name: &'static str, reason: &str) {
        tracing::info!("Skipping {}: {}", name, reason);
        self.tasks.push(TaskReport {
            name,
            status: TaskStatus::Skipped(reason.to_string()),
            elapsed: Duration::ZERO,
        });
    }

    pub fn has_failures(&self) -> bool {
        self.tasks
            .iter()
            .any(|t| matches!(t.status, TaskStatus::Failed(_)))
    }
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("\n=== Task Summary ===\n");
    for task in &summary.tasks {
        println!(
            "  {:<16} {} [{:.1}s]",
            task.name,
            task.status,
            task.elapsed.as_secs_f64()
        );
    }

    let failed = summary
        .tasks
        .iter()
        .filter(|t| matches!(t.status, TaskStatus::Failed(_)))
        .count();
    if failed == 0 {
        println!("\nAll tasks completed");
    } else {
        println!("\n{} task(s) failed", failed);
    }
}

/// Creates the data and asset directories if they are missing
pub fn prepare_directories(config: &Config) -> Result<()> {
    for dir in [&config.output.data_dir, &config.downloader.assets_dir] {
        std::fs::create_dir_all(dir)?;
        tracing::debug!("Output directory ready: {}", dir);
    }
    Ok(())
}

/// Runs crawl, faculty scrape, download and validation in order
///
/// A failed task is recorded and the next one still runs. Only a failure to
/// prepare the output directories aborts the run.
pub async fn run_all(config: &Config) -> Result<RunSummary> {
    prepare_directories(config)?;
    let mut summary = RunSummary::default();

    let started = Instant::now();
    summary.record("crawl", started, crawl_site(config).await);

    if config.scraper.faculty_list_url.is_some() {
        let started = Instant::now();
        summary.record("scrape-faculty", started, scrape_faculty(config).await);
    } else {
        summary.skip("scrape-faculty", "no faculty-list-url configured");
    }

    let started = Instant::now();
    summary.record("download", started, download_media(config).await);

    let started = Instant::now();
    summary.record("validate", started, validate_links(config).await);

    print_run_summary(&summary);
    Ok(summary)
}

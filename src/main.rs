//! Site-Harvester main entry point
//!
//! This is the command-line interface for the site migration batch jobs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use site_harvester::config::{load_config_with_hash, Config};
use site_harvester::pipeline;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Site-Harvester: batch jobs for migrating a department website
///
/// Crawls the site into a site map, downloads its media, validates its
/// links, scrapes personnel directories and imports faculty into the new
/// backend's datastore.
#[derive(Parser, Debug)]
#[command(name = "site-harvester")]
#[command(version = "1.0.0")]
#[command(about = "Batch jobs for migrating a department website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the site and write the site map
    Crawl,
    /// Scrape the faculty directory and profiles
    ScrapeFaculty,
    /// Scrape the all-people directory
    ScrapePeople,
    /// Download images and documents referenced by the site map
    Download,
    /// Check every link found on the site map's pages
    Validate,
    /// Insert scraped faculty into the datastore
    Import,
    /// Write INSERT/UPDATE statements instead of importing directly
    ExportSql,
    /// Apply the sample roster corrections to the datastore
    ApplyRoster,
    /// Run crawl, faculty scrape, download and validation in order
    RunAll,
    /// Validate the configuration and print it without doing any work
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Crawl => {
            pipeline::crawl_site(&config).await.context("Crawl failed")?;
        }
        Command::ScrapeFaculty => {
            pipeline::scrape_faculty(&config)
                .await
                .context("Faculty scrape failed")?;
        }
        Command::ScrapePeople => {
            pipeline::scrape_people(&config)
                .await
                .context("People scrape failed")?;
        }
        Command::Download => {
            pipeline::download_media(&config)
                .await
                .context("Media download failed")?;
        }
        Command::Validate => {
            pipeline::validate_links(&config)
                .await
                .context("Link validation failed")?;
        }
        Command::Import => {
            pipeline::import_faculty(&config).context("Import failed")?;
        }
        Command::ExportSql => {
            pipeline::export_sql(&config).context("SQL export failed")?;
        }
        Command::ApplyRoster => {
            pipeline::apply_sample_roster(&config).context("Roster update failed")?;
        }
        Command::RunAll => {
            let summary = pipeline::run_all(&config)
                .await
                .context("Could not prepare output directories")?;
            if summary.has_failures() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::CheckConfig => print_config(&config),
    }

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvester=info,warn"),
            1 => EnvFilter::new("site_harvester=debug,info"),
            2 => EnvFilter::new("site_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn or_unset(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(not set)")
}

/// Prints the effective configuration
fn print_config(config: &Config) {
    println!("=== Site-Harvester Configuration ===\n");

    println!("Crawler:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Timeout: {}s", config.crawler.timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nValidator:");
    println!("  Workers: {}", config.validator.workers);
    println!("  Timeout: {}s", config.validator.timeout_secs);
    println!("  Slow threshold: {}ms", config.validator.slow_threshold_ms);

    println!("\nDownloader:");
    println!("  Assets directory: {}", config.downloader.assets_dir);
    println!("  Request delay: {}ms", config.downloader.request_delay_ms);
    println!("  Timeout: {}s", config.downloader.timeout_secs);

    println!("\nScraper:");
    println!("  Faculty list: {}", or_unset(&config.scraper.faculty_list_url));
    println!("  People directory: {}", or_unset(&config.scraper.people_url));
    println!("  Request delay: {}ms", config.scraper.request_delay_ms);

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);

    println!("\nImport:");
    println!("  Database: {}", config.import.database_path);
    println!("  SQL file: {}", config.import.sql_path);
    println!("  Department: {}", config.import.department);
    println!("  Email domain: {}", config.import.email_domain);

    println!("\n✓ Configuration is valid");
}

use serde::Deserialize;

/// Main configuration structure for Site-Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub downloader: DownloaderConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from; its host defines the site boundary
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of pages visited in one run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Delay between consecutive fetches (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_crawl_delay")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_page_timeout")]
    pub timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the JSON/CSV artifacts
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

/// Link validator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorConfig {
    /// Number of concurrent link checks
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(rename = "timeout-secs", default = "default_page_timeout")]
    pub timeout_secs: u64,

    /// Responses slower than this are reported as slow links
    #[serde(rename = "slow-threshold-ms", default = "default_slow_threshold")]
    pub slow_threshold_ms: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            timeout_secs: default_page_timeout(),
            slow_threshold_ms: default_slow_threshold(),
        }
    }
}

/// Media downloader configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DownloaderConfig {
    /// Root of the type-partitioned asset tree
    #[serde(rename = "assets-dir", default = "default_assets_dir")]
    pub assets_dir: String,

    #[serde(rename = "request-delay-ms", default = "default_download_delay")]
    pub request_delay_ms: u64,

    #[serde(rename = "timeout-secs", default = "default_download_timeout")]
    pub timeout_secs: u64,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            request_delay_ms: default_download_delay(),
            timeout_secs: default_download_timeout(),
        }
    }
}

/// Person scraper configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScraperConfig {
    /// Faculty directory listing page
    #[serde(rename = "faculty-list-url", default)]
    pub faculty_list_url: Option<String>,

    /// All-people directory listing page
    #[serde(rename = "people-url", default)]
    pub people_url: Option<String>,

    #[serde(rename = "request-delay-ms", default = "default_crawl_delay")]
    pub request_delay_ms: u64,
}

/// Import target configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// SQLite database holding the `faculties` table
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Where generated SQL statements are written
    #[serde(rename = "sql-path", default = "default_sql_path")]
    pub sql_path: String,

    /// Department code stamped on imported rows
    #[serde(default = "default_department")]
    pub department: String,

    /// Domain accepted when extracting institutional email addresses
    #[serde(rename = "email-domain", default = "default_email_domain")]
    pub email_domain: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            sql_path: default_sql_path(),
            department: default_department(),
            email_domain: default_email_domain(),
        }
    }
}

fn default_crawl_delay() -> u64 {
    1000
}

fn default_page_timeout() -> u64 {
    10
}

fn default_workers() -> usize {
    5
}

fn default_slow_threshold() -> u64 {
    3000
}

fn default_assets_dir() -> String {
    "./assets".to_string()
}

fn default_download_delay() -> u64 {
    500
}

fn default_download_timeout() -> u64 {
    30
}

fn default_database_path() -> String {
    "./data.db".to_string()
}

fn default_sql_path() -> String {
    "./faculty-import.sql".to_string()
}

fn default_department() -> String {
    "EEMB".to_string()
}

fn default_email_domain() -> String {
    "ucsb.edu".to_string()
}

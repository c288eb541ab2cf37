use crate::config::types::{
    Config, CrawlerConfig, DownloaderConfig, ImportConfig, OutputConfig, ScraperConfig,
    UserAgentConfig, ValidatorConfig,
};
use crate::ConfigError;
use url::Url;

const MAX_PAGES_CEILING: usize = 100_000;
const MAX_WORKERS: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_validator_config(&config.validator)?;
    validate_downloader_config(&config.downloader)?;
    validate_scraper_config(&config.scraper)?;
    validate_import_config(&config.import)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_http_url("start_url", &config.start_url)?;

    if config.max_pages < 1 || config.max_pages > MAX_PAGES_CEILING {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and {}, got {}",
            MAX_PAGES_CEILING, config.max_pages
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "crawler timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation("data_dir cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_validator_config(config: &ValidatorConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "validator workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "validator timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_downloader_config(config: &DownloaderConfig) -> Result<(), ConfigError> {
    if config.assets_dir.is_empty() {
        return Err(ConfigError::Validation(
            "assets_dir cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "downloader timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.faculty_list_url {
        validate_http_url("faculty_list_url", url)?;
    }
    if let Some(url) = &config.people_url {
        validate_http_url("people_url", url)?;
    }
    Ok(())
}

fn validate_import_config(config: &ImportConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.sql_path.is_empty() {
        return Err(ConfigError::Validation("sql_path cannot be empty".to_string()));
    }

    if !config.email_domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "email_domain must contain at least one dot, got '{}'",
            config.email_domain
        )));
    }

    Ok(())
}

/// Checks that a URL parses and uses an HTTP(S) scheme
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

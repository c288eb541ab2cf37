//! Bounded-concurrency link checking
//!
//! A fixed number of permits caps how many HEAD probes are in flight. Each
//! check is an independent task; the only shared state is the results vector
//! the tasks are drained into. No retries are attempted.

use crate::config::Config;
use crate::http::{build_http_client, probe_url, FailureKind, ProbeResult};
use crate::records::{LinkCheckRecord, StatusBucket};
use crate::validator::harvest::LinkTarget;
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Checks links with a bounded worker pool
#[derive(Debug, Clone)]
pub struct LinkValidator {
    client: Client,
    workers: usize,
    timeout: Duration,
}

impl LinkValidator {
    /// Builds a validator from the `[validator]` and `[user-agent]` sections
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.validator.timeout_secs);
        let client = build_http_client(&config.user_agent, timeout)?;
        Ok(Self::with_client(client, config.validator.workers, timeout))
    }

    /// `timeout` must match the one the client was built with; it is what
    /// timed-out records report as their response time.
    pub fn with_client(client: Client, workers: usize, timeout: Duration) -> Self {
        Self {
            client,
            workers: workers.max(1),
            timeout,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Checks every target and returns one record per target
    ///
    /// Records come back in completion order, not input order.
    pub async fn validate(&self, targets: Vec<LinkTarget>) -> Vec<LinkCheckRecord> {
        tracing::info!(
            "Validating {} links with {} workers",
            targets.len(),
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        let total = targets.len();

        for target in targets {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.timeout;

            tasks.spawn(async move {
                // The semaphore is never closed, so acquire only fails on a bug
                let _permit = semaphore.acquire_owned().await.ok();
                check_link(&client, &target, timeout).await
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(record) => {
                    tracing::debug!("{} -> {}", record.url, record.status_bucket);
                    results.push(record);
                }
                Err(e) => tracing::error!("Link check task failed: {}", e),
            }
        }

        tracing::info!("Link validation complete: {} checked", results.len());
        results
    }
}

/// Probes one link and classifies the outcome
pub async fn check_link(client: &Client, target: &LinkTarget, timeout: Duration) -> LinkCheckRecord {
    let probe = probe_url(client, &target.url).await;
    record_from_probe(target, probe, timeout)
}

fn record_from_probe(target: &LinkTarget, probe: ProbeResult, timeout: Duration) -> LinkCheckRecord {
    match probe {
        ProbeResult::Response {
            status_code,
            final_url,
            content_type,
            elapsed,
        } => LinkCheckRecord {
            url: target.url.clone(),
            source_page: target.source_page.clone(),
            status_code: Some(status_code),
            status_bucket: StatusBucket::from_status(status_code),
            response_time_ms: round_ms(elapsed),
            is_redirect: final_url != target.url,
            final_url: Some(final_url),
            content_type,
            error: None,
            checked_at: Utc::now(),
        },
        ProbeResult::NetworkError {
            kind,
            error,
            elapsed,
        } => {
            let (bucket, response_time_ms, message) = match kind {
                FailureKind::Timeout => (
                    StatusBucket::Timeout,
                    timeout.as_millis() as f64,
                    "Request timeout".to_string(),
                ),
                FailureKind::Connection => (
                    StatusBucket::Error,
                    round_ms(elapsed),
                    "Connection failed".to_string(),
                ),
                FailureKind::Other => (StatusBucket::Error, round_ms(elapsed), error),
            };

            LinkCheckRecord {
                url: target.url.clone(),
                source_page: target.source_page.clone(),
                status_code: None,
                status_bucket: bucket,
                response_time_ms,
                final_url: None,
                is_redirect: false,
                content_type: String::new(),
                error: Some(message),
                checked_at: Utc::now(),
            }
        }
    }
}

/// Milliseconds rounded to two decimals
fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

//! HTTP fetch wrapper shared by every harvesting stage
//!
//! This module handles:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests returning status, headers, final URL and body
//! - HEAD probes for link validation
//! - Classifying network failures (timeout vs connection vs other)

mod fetcher;

pub use fetcher::{
    build_http_client, fetch_url, probe_url, user_agent_string, FailureKind, FetchResult,
    FetchedResponse, ProbeResult,
};

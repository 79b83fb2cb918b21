//! Client module for the upstream reference-data API
//!
//! This module contains the paginated ingestion core:
//! - Wire types for the page envelope and ticker records
//! - Single-page fetching with response classification
//! - Fixed-delay pacing between requests
//! - The pagination walk that accumulates the full catalog

mod envelope;
mod fetcher;
mod pacer;
mod walker;

pub use envelope::{PageEnvelope, TickerRecord};
pub use fetcher::{display_url, fetch_page, FetchedPage};
pub use pacer::Pacer;
pub use walker::{fetch_all, seed_url, with_api_key, SweepOutcome};

use crate::config::PacingConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for every page fetch
///
/// The per-request timeout comes from configuration (default 30 s);
/// the connect timeout is fixed.
pub fn build_http_client(pacing: &PacingConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("tickersweep/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(pacing.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let pacing = PacingConfig::default();
        let client = build_http_client(&pacing);
        assert!(client.is_ok());
    }
}

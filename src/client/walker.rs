//! Pagination walker
//!
//! Drives the fetch loop over the cursor-paginated catalog endpoint:
//! starting from a seed URL built out of structured query parameters, it
//! repeatedly fetches pages, accumulates records, and follows the
//! continuation cursor until upstream stops supplying one. The walk is
//! strictly sequential and all-or-nothing: any fetch failure aborts the
//! whole sweep with no partial result.

use crate::client::fetcher::fetch_page;
use crate::client::pacer::Pacer;
use crate::client::TickerRecord;
use crate::config::ApiConfig;
use crate::Result;
use reqwest::Client;
use url::Url;

/// Result of a complete pagination walk
#[derive(Debug)]
pub struct SweepOutcome {
    /// Every record from every page, in upstream order
    pub records: Vec<TickerRecord>,

    /// Number of pages consumed
    pub pages: u32,
}

/// Builds the seed URL for the first page
///
/// Query parameters are attached structurally, never by string splicing,
/// so the credential survives any URL shape upstream chooses.
pub fn seed_url(api: &ApiConfig) -> Result<Url> {
    let mut url = Url::parse(&api.base_url)?;
    url.query_pairs_mut()
        .append_pair("market", &api.market)
        .append_pair("active", if api.active_only { "true" } else { "false" })
        .append_pair("order", &api.order)
        .append_pair("limit", &api.page_limit.to_string())
        .append_pair("sort", &api.sort)
        .append_pair("apiKey", &api.key);
    Ok(url)
}

/// Re-attaches the API credential to an upstream continuation cursor
///
/// The cursor URL supplied by upstream does not carry the credential.
pub fn with_api_key(cursor: &str, key: &str) -> Result<Url> {
    let mut url = Url::parse(cursor)?;
    url.query_pairs_mut().append_pair("apiKey", key);
    Ok(url)
}

/// Walks every page of the catalog and accumulates all records
///
/// Loop invariant: continues while the previous page carried a
/// continuation cursor. An empty page with a cursor does not terminate
/// the walk; only cursor absence does. The pacer delay is applied between
/// consecutive fetches, never after the last one.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `api` - Endpoint, filters, and credential
/// * `pacer` - Inter-page delay enforcement
///
/// # Returns
///
/// * `Ok(SweepOutcome)` - All records plus the page count
/// * `Err(SweepError)` - The first fetch-level failure; accumulation so far
///   is discarded
pub async fn fetch_all(client: &Client, api: &ApiConfig, pacer: &Pacer) -> Result<SweepOutcome> {
    let mut url = seed_url(api)?;
    let mut records: Vec<TickerRecord> = Vec::new();
    let mut pages: u32 = 0;
    let mut more_data = true;

    while more_data {
        pages += 1;
        tracing::info!("Fetching page {}", pages);

        let page = fetch_page(client, &url).await?;
        let page_records = page.records.len();
        records.extend(page.records);

        tracing::info!(
            "Page {}: retrieved {} tickers (total: {})",
            pages,
            page_records,
            records.len()
        );

        match page.next {
            Some(cursor) => {
                url = with_api_key(&cursor, &api.key)?;
                tracing::debug!(
                    "Waiting {:?} before next request (rate limiting)",
                    pacer.delay()
                );
                pacer.wait().await;
            }
            None => {
                more_data = false;
                tracing::info!("No more pages available");
            }
        }
    }

    Ok(SweepOutcome { records, pages })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api_config() -> ApiConfig {
        ApiConfig {
            key: "test-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_url_carries_all_parameters() {
        let url = seed_url(&test_api_config()).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("market".to_string(), "stocks".to_string())));
        assert!(pairs.contains(&("active".to_string(), "true".to_string())));
        assert!(pairs.contains(&("order".to_string(), "asc".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "1000".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "ticker".to_string())));
        assert!(pairs.contains(&("apiKey".to_string(), "test-key".to_string())));
    }

    #[test]
    fn test_with_api_key_preserves_cursor_params() {
        let url = with_api_key(
            "https://api.example.com/v3/reference/tickers?cursor=abc123",
            "test-key",
        )
        .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("cursor".to_string(), "abc123".to_string())));
        assert!(pairs.contains(&("apiKey".to_string(), "test-key".to_string())));
    }

    #[test]
    fn test_with_api_key_rejects_malformed_cursor() {
        let result = with_api_key("not a url at all", "test-key");
        assert!(result.is_err());
    }
}

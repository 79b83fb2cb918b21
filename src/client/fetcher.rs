//! Page fetcher for the paginated catalog endpoint
//!
//! Issues a single GET against one page URL, parses the JSON envelope, and
//! classifies the response:
//! - Transport failures and timeouts become network errors
//! - Non-2xx statuses become network errors carrying the status code
//! - An envelope status other than "OK" becomes an API error
//! - A missing `results` field is a soft end-of-data signal, not an error

use crate::client::envelope::{PageEnvelope, TickerRecord};
use crate::{Result, SweepError};
use reqwest::Client;
use url::Url;

/// A fetched, classified page
#[derive(Debug)]
pub struct FetchedPage {
    /// Records carried by this page, possibly empty
    pub records: Vec<TickerRecord>,

    /// Continuation cursor, exactly as supplied upstream (no credential)
    pub next: Option<String>,
}

/// Fetches and classifies a single catalog page
///
/// # Arguments
///
/// * `client` - The HTTP client to use (carries the request timeout)
/// * `url` - The fully credentialed page URL
///
/// # Returns
///
/// * `Ok(FetchedPage)` - Parsed page, or an empty terminal page if the
///   response had no `results` field
/// * `Err(SweepError)` - Transport, HTTP status, or API-level failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SweepError::HttpStatus {
            url: display_url(url),
            status: status.as_u16(),
        });
    }

    let envelope: PageEnvelope = response
        .json()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    if let Some(api_status) = &envelope.status {
        if api_status != "OK" {
            return Err(SweepError::Api {
                status: api_status.clone(),
                message: envelope.message,
            });
        }
    }

    match envelope.results {
        Some(records) => {
            tracing::debug!(
                "Page carried {} records (upstream count: {:?})",
                records.len(),
                envelope.count
            );
            Ok(FetchedPage {
                records,
                next: envelope.next_url,
            })
        }
        None => {
            // Malformed but terminal: upstream sometimes omits the results
            // field entirely on the last page
            tracing::warn!("No 'results' field in API response, treating as end of data");
            Ok(FetchedPage {
                records: Vec::new(),
                next: None,
            })
        }
    }
}

/// Maps a reqwest error to the sweep error taxonomy
fn classify_transport_error(url: &Url, error: reqwest::Error) -> SweepError {
    if error.is_timeout() {
        SweepError::Timeout {
            url: display_url(url),
        }
    } else {
        SweepError::Http {
            url: display_url(url),
            source: error,
        }
    }
}

/// Renders a URL with its query stripped
///
/// The query string carries the API credential, so it must never reach
/// error messages or logs.
pub fn display_url(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_url_strips_credential() {
        let url =
            Url::parse("https://api.example.com/v3/reference/tickers?cursor=abc&apiKey=secret")
                .unwrap();
        let shown = display_url(&url);
        assert_eq!(shown, "https://api.example.com/v3/reference/tickers");
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_display_url_without_query() {
        let url = Url::parse("https://api.example.com/v3/reference/tickers").unwrap();
        assert_eq!(
            display_url(&url),
            "https://api.example.com/v3/reference/tickers"
        );
    }
}

//! Pipeline orchestration
//!
//! One sweep is one run: walk every page of the catalog, write the CSV
//! snapshot, then replicate into the warehouse under the configured sink
//! policy. The snapshot is the primary output; a best-effort sink failure
//! does not un-succeed a run whose snapshot landed.

use crate::client::{build_http_client, fetch_all, Pacer, TickerRecord};
use crate::config::Config;
use crate::snapshot::write_snapshot;
use crate::warehouse::{insert_batch, SinkOutcome, SinkPolicy};
use crate::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;

/// Statistics for one completed run
#[derive(Debug, Clone)]
pub struct SweepStats {
    /// Identifier tagging everything this run produced
    pub batch_id: String,

    /// Records accumulated across all pages
    pub records: usize,

    /// Pages consumed
    pub pages: u32,

    /// Byte size of the written snapshot
    pub snapshot_bytes: u64,

    /// What happened to the warehouse sink
    pub sink: SinkOutcome,
}

/// Derives the batch identifier from the run's start time
///
/// Second-level precision only; two runs started within the same second
/// share an identifier. The scheduler triggers runs minutes apart, so
/// this is acceptable.
pub fn make_batch_id(started_at: DateTime<Utc>) -> String {
    started_at.format("%Y%m%d_%H%M%S").to_string()
}

/// Runs one complete sweep: fetch everything, snapshot, replicate
///
/// Fails before any network call if the API credential is missing. Any
/// fetch or snapshot failure aborts the run with nothing written; only
/// the warehouse sink may fail softly, governed by its policy.
pub async fn run_sweep(config: &Config) -> Result<SweepStats> {
    config.api.require_key()?;

    let batch_id = make_batch_id(Utc::now());
    tracing::info!("Starting ticker sweep (batch {})", batch_id);
    tracing::info!(
        "Configuration: page_limit={}, inter_page_delay={}s",
        config.api.page_limit,
        config.pacing.inter_page_delay_secs
    );

    let client = build_http_client(&config.pacing)?;
    let pacer = Pacer::new(Duration::from_secs(config.pacing.inter_page_delay_secs));

    let outcome = fetch_all(&client, &config.api, &pacer).await?;
    tracing::info!(
        "Sweep complete: {} tickers across {} pages",
        outcome.records.len(),
        outcome.pages
    );

    let csv_path = Path::new(&config.output.csv_path);
    let snapshot_bytes = write_snapshot(&outcome.records, csv_path)?;
    tracing::info!(
        "Wrote {} rows to {} ({} bytes)",
        outcome.records.len(),
        csv_path.display(),
        snapshot_bytes
    );

    let sink = run_sink(config, &outcome.records, &batch_id)?;

    Ok(SweepStats {
        batch_id,
        records: outcome.records.len(),
        pages: outcome.pages,
        snapshot_bytes,
        sink,
    })
}

/// Drives the warehouse sink under the configured policy
fn run_sink(
    config: &Config,
    records: &[TickerRecord],
    batch_id: &str,
) -> Result<SinkOutcome> {
    let Some(warehouse) = &config.warehouse else {
        tracing::warn!("Warehouse not configured, skipping replication");
        return Ok(SinkOutcome::Disabled);
    };

    match insert_batch(Path::new(&warehouse.database_path), records, batch_id) {
        Ok(inserted) => {
            tracing::info!(
                "Replicated {} rows into warehouse (batch {})",
                inserted,
                batch_id
            );
            Ok(SinkOutcome::Inserted(inserted))
        }
        Err(e) => match warehouse.policy {
            SinkPolicy::Fatal => Err(e.into()),
            SinkPolicy::BestEffort => {
                tracing::warn!("Warehouse insert failed, continuing: {}", e);
                Ok(SinkOutcome::Failed(e.to_string()))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_batch_id_format() {
        let started = Utc.with_ymd_and_hms(2026, 8, 5, 9, 30, 7).unwrap();
        assert_eq!(make_batch_id(started), "20260805_093007");
    }

    #[test]
    fn test_batch_ids_distinct_across_seconds() {
        let a = Utc.with_ymd_and_hms(2026, 8, 5, 9, 30, 7).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 8, 5, 9, 30, 8).unwrap();
        assert_ne!(make_batch_id(a), make_batch_id(b));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_fetch() {
        // Unroutable base_url: if the credential guard did not fire first,
        // this test would hang or fail on DNS instead of a config error
        let mut config = Config::default();
        config.api.base_url = "https://tickersweep-test.invalid/v3/reference/tickers".to_string();
        config.api.key = String::new();

        let result = run_sweep(&config).await;
        assert!(matches!(
            result.unwrap_err(),
            crate::SweepError::Config(crate::ConfigError::MissingCredential(_))
        ));
    }
}

//! SQLite warehouse sink
//!
//! Batches the accumulated record set into the warehouse table, tagging
//! every row with the run's batch identifier and a load timestamp. All
//! inserts for one run happen inside a single transaction committed once
//! at the end.

use crate::client::TickerRecord;
use crate::warehouse::schema::initialize_schema;
use crate::warehouse::WarehouseResult;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// Rows per logged insert chunk
pub const CHUNK_SIZE: usize = 1000;

/// SQLite warehouse backend
pub struct WarehouseSink {
    conn: Connection,
}

/// Aggregate figures for the stats mode
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseSummary {
    pub batches: u64,
    pub rows: u64,
    pub last_loaded_at: Option<String>,
}

impl WarehouseSink {
    /// Opens (or creates) the warehouse database and ensures the schema
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn open(path: &Path) -> WarehouseResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory warehouse (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> WarehouseResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Inserts the full record set under one batch identifier
    ///
    /// Rows are written in fixed-size chunks inside a single transaction
    /// that commits once at the end, so a failed run leaves no rows behind.
    ///
    /// # Arguments
    ///
    /// * `records` - The complete record set for this run
    /// * `batch_id` - The run's batch identifier
    ///
    /// # Returns
    ///
    /// The number of rows inserted
    pub fn insert(&mut self, records: &[TickerRecord], batch_id: &str) -> WarehouseResult<usize> {
        let loaded_at = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO tickers (
                    ticker, name, market, locale, primary_exchange, type, active,
                    currency_name, cik, composite_figi, share_class_figi,
                    last_updated_utc, loaded_at, batch_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;

            for (chunk_index, chunk) in records.chunks(CHUNK_SIZE).enumerate() {
                for record in chunk {
                    stmt.execute(params![
                        record.ticker,
                        record.name,
                        record.market,
                        record.locale,
                        record.primary_exchange,
                        record.kind,
                        record.active.unwrap_or(false),
                        record.currency_name,
                        record.cik,
                        record.composite_figi,
                        record.share_class_figi,
                        record.last_updated_utc,
                        loaded_at,
                        batch_id,
                    ])?;
                }
                tracing::debug!(
                    "Batch {}: chunk {} staged ({} rows)",
                    batch_id,
                    chunk_index + 1,
                    chunk.len()
                );
            }
        }

        tx.commit()?;
        Ok(records.len())
    }

    /// Counts rows tagged with the given batch identifier
    pub fn batch_row_count(&self, batch_id: &str) -> WarehouseResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM tickers WHERE batch_id = ?1",
            params![batch_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Aggregate batch and row counts for the stats mode
    pub fn summary(&self) -> WarehouseResult<WarehouseSummary> {
        let (batches, rows, last_loaded_at) = self.conn.query_row(
            "SELECT COUNT(DISTINCT batch_id), COUNT(*), MAX(loaded_at) FROM tickers",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )?;

        Ok(WarehouseSummary {
            batches: batches as u64,
            rows: rows as u64,
            last_loaded_at,
        })
    }
}

/// One-shot convenience: open the warehouse at `path` and insert a batch
pub fn insert_batch(
    path: &Path,
    records: &[TickerRecord],
    batch_id: &str,
) -> WarehouseResult<usize> {
    let mut sink = WarehouseSink::open(path)?;
    sink.insert(records, batch_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ticker: &str) -> TickerRecord {
        TickerRecord {
            ticker: Some(ticker.to_string()),
            active: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_reports_row_count() {
        let mut sink = WarehouseSink::open_in_memory().unwrap();
        let records: Vec<TickerRecord> = (0..10).map(|i| record(&format!("T{}", i))).collect();

        let inserted = sink.insert(&records, "20260805_120000").unwrap();
        assert_eq!(inserted, 10);
        assert_eq!(sink.batch_row_count("20260805_120000").unwrap(), 10);
    }

    #[test]
    fn test_insert_spanning_multiple_chunks() {
        let mut sink = WarehouseSink::open_in_memory().unwrap();
        let records: Vec<TickerRecord> =
            (0..2500).map(|i| record(&format!("T{}", i))).collect();

        let inserted = sink.insert(&records, "batch-a").unwrap();
        assert_eq!(inserted, 2500);
        assert_eq!(sink.batch_row_count("batch-a").unwrap(), 2500);
    }

    #[test]
    fn test_duplicate_loads_accumulate_by_batch() {
        let mut sink = WarehouseSink::open_in_memory().unwrap();
        let records = vec![record("AAA"), record("BBB")];

        sink.insert(&records, "batch-1").unwrap();
        sink.insert(&records, "batch-2").unwrap();

        let summary = sink.summary().unwrap();
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.rows, 4);
        assert!(summary.last_loaded_at.is_some());
    }

    #[test]
    fn test_absent_fields_stored_as_defaults() {
        let mut sink = WarehouseSink::open_in_memory().unwrap();
        let sparse = TickerRecord {
            ticker: Some("AAA".to_string()),
            ..Default::default()
        };

        sink.insert(&[sparse], "batch-1").unwrap();

        let (name, active): (Option<String>, bool) = sink
            .conn
            .query_row(
                "SELECT name, active FROM tickers WHERE ticker = 'AAA'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(name, None);
        assert!(!active);
    }

    #[test]
    fn test_empty_summary() {
        let sink = WarehouseSink::open_in_memory().unwrap();
        let summary = sink.summary().unwrap();
        assert_eq!(
            summary,
            WarehouseSummary {
                batches: 0,
                rows: 0,
                last_loaded_at: None,
            }
        );
    }
}

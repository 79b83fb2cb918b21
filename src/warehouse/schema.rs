//! Warehouse schema definition
//!
//! One table mirrors the ticker record fields plus load metadata. There is
//! deliberately no primary key: duplicate historical loads accumulate as
//! additional rows distinguished by `batch_id`.

/// SQL schema for the warehouse database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS tickers (
    ticker TEXT,
    name TEXT,
    market TEXT,
    locale TEXT,
    primary_exchange TEXT,
    type TEXT,
    active INTEGER NOT NULL DEFAULT 0,
    currency_name TEXT,
    cik TEXT,
    composite_figi TEXT,
    share_class_figi TEXT,
    last_updated_utc TEXT,
    loaded_at TEXT NOT NULL,
    batch_id TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickers_batch ON tickers(batch_id);
CREATE INDEX IF NOT EXISTS idx_tickers_ticker ON tickers(ticker);
"#;

/// Initializes the warehouse schema
///
/// Safe to invoke on every run; `CREATE TABLE IF NOT EXISTS` makes the
/// operation idempotent.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

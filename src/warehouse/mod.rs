//! Warehouse sink module
//!
//! Optional replication of each run's record set into a local SQLite
//! table for durable storage and analytics, including:
//! - Idempotent schema creation
//! - Chunked inserts inside a single per-run transaction
//! - Batch tagging so historical loads stay distinguishable
//! - An explicit per-sink failure policy

mod schema;
mod sink;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sink::{insert_batch, WarehouseSink, WarehouseSummary, CHUNK_SIZE};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during warehouse operations
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for warehouse operations
pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// Failure policy for the warehouse sink
///
/// Under `BestEffort` a sink failure is logged and downgraded to a
/// zero-row outcome; under `Fatal` it aborts the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkPolicy {
    #[default]
    BestEffort,
    Fatal,
}

/// What actually happened to the sink during one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Rows landed in the warehouse
    Inserted(usize),

    /// No warehouse configured; nothing attempted
    Disabled,

    /// The insert failed and the policy downgraded it
    Failed(String),
}

impl SinkOutcome {
    /// Rows inserted, zero for disabled or failed sinks
    pub fn inserted_rows(&self) -> usize {
        match self {
            Self::Inserted(n) => *n,
            Self::Disabled | Self::Failed(_) => 0,
        }
    }
}

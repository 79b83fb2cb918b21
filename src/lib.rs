//! Tickersweep: a paginated reference-data ingestion pipeline
//!
//! This crate fetches the full catalog of tradable ticker symbols from a
//! cursor-paginated reference-data API, writes the result as a CSV snapshot,
//! and optionally replicates it into a local warehouse table.

pub mod client;
pub mod config;
pub mod pipeline;
pub mod scheduler;
pub mod snapshot;
pub mod warehouse;

use thiserror::Error;

/// Main error type for tickersweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("API returned status '{status}': {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: String,
        message: Option<String>,
    },

    #[error("Warehouse error: {0}")]
    Warehouse(#[from] warehouse::WarehouseError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required credential: {0} is not set")]
    MissingCredential(String),
}

/// Result type alias for tickersweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{fetch_all, fetch_page, Pacer, SweepOutcome, TickerRecord};
pub use config::Config;
pub use pipeline::{run_sweep, SweepStats};
pub use warehouse::{SinkOutcome, SinkPolicy};

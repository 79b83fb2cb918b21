use crate::warehouse::SinkPolicy;
use serde::Deserialize;

/// Main configuration structure for tickersweep
///
/// Every section has documented defaults; a TOML file only needs to name the
/// knobs it changes. The API credential is never read from the file, only
/// from the `POLYGON_API_KEY` environment variable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Absent section disables the warehouse sink entirely.
    #[serde(default)]
    pub warehouse: Option<WarehouseConfig>,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Upstream reference-data API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API credential, filled from the environment after parsing.
    #[serde(skip)]
    pub key: String,

    /// Endpoint for the ticker catalog
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Market filter passed upstream
    pub market: String,

    /// Restrict results to actively traded instruments
    #[serde(rename = "active-only")]
    pub active_only: bool,

    /// Sort direction
    pub order: String,

    /// Sort field
    pub sort: String,

    /// Records requested per page
    #[serde(rename = "page-limit")]
    pub page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: "https://api.polygon.io/v3/reference/tickers".to_string(),
            market: "stocks".to_string(),
            active_only: true,
            order: "asc".to_string(),
            sort: "ticker".to_string(),
            page_limit: 1000,
        }
    }
}

impl ApiConfig {
    /// Fails with a `ConfigError` if no credential has been provided.
    ///
    /// Called at the top of the pipeline so the run aborts before any
    /// network request is attempted.
    pub fn require_key(&self) -> Result<(), crate::ConfigError> {
        if self.key.is_empty() {
            return Err(crate::ConfigError::MissingCredential(
                "POLYGON_API_KEY".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay between successive page fetches (seconds)
    #[serde(rename = "inter-page-delay-secs")]
    pub inter_page_delay_secs: u64,

    /// Per-request network timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_page_delay_secs: 20,
            request_timeout_secs: 30,
        }
    }
}

/// Snapshot output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV snapshot, overwritten on each run
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "./output/tickers.csv".to_string(),
        }
    }
}

/// Warehouse sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Path to the SQLite warehouse database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Whether a sink failure aborts the run or is logged and swallowed
    #[serde(default)]
    pub policy: SinkPolicy,
}

/// Scheduler configuration for the long-running mode
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Local wall-clock time of the daily sweep, "HH:MM"
    #[serde(rename = "daily-at")]
    pub daily_at: String,

    /// Liveness heartbeat interval (seconds)
    #[serde(rename = "heartbeat-secs")]
    pub heartbeat_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: "08:57".to_string(),
            heartbeat_secs: 60,
        }
    }
}

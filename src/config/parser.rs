use crate::config::types::{Config, WarehouseConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::env;
use std::path::Path;

/// Environment variable holding the required API credential
pub const API_KEY_VAR: &str = "POLYGON_API_KEY";

/// Loads the configuration, overlaying environment variables
///
/// With no file, every knob starts from its documented default. The API
/// credential always comes from `POLYGON_API_KEY`; its absence is fatal.
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use tickersweep::config::load_config;
///
/// let config = load_config(None).unwrap();
/// println!("Page limit: {}", config.api.page_limit);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => load_config_file(p)?,
        None => Config::default(),
    };

    apply_env(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Parses a TOML configuration file without touching the environment
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Overlays environment variables onto a parsed configuration
///
/// `POLYGON_API_KEY` is required. `TICKERSWEEP_CSV_PATH`,
/// `TICKERSWEEP_WAREHOUSE`, `TICKERSWEEP_PAGE_LIMIT`, and
/// `TICKERSWEEP_DELAY_SECS` override their file counterparts when set.
pub fn apply_env(config: &mut Config) -> Result<(), ConfigError> {
    match env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => config.api.key = key,
        _ => return Err(ConfigError::MissingCredential(API_KEY_VAR.to_string())),
    }

    if let Ok(path) = env::var("TICKERSWEEP_CSV_PATH") {
        config.output.csv_path = path;
    }

    if let Ok(path) = env::var("TICKERSWEEP_WAREHOUSE") {
        match config.warehouse.as_mut() {
            Some(warehouse) => warehouse.database_path = path,
            None => {
                config.warehouse = Some(WarehouseConfig {
                    database_path: path,
                    policy: Default::default(),
                });
            }
        }
    }

    if let Ok(limit) = env::var("TICKERSWEEP_PAGE_LIMIT") {
        config.api.page_limit = limit.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "TICKERSWEEP_PAGE_LIMIT must be a positive integer, got '{}'",
                limit
            ))
        })?;
    }

    if let Ok(secs) = env::var("TICKERSWEEP_DELAY_SECS") {
        config.pacing.inter_page_delay_secs = secs.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "TICKERSWEEP_DELAY_SECS must be a positive integer, got '{}'",
                secs
            ))
        })?;
    }

    Ok(())
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is used to detect if the configuration has changed between runs.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns it with the file hash, if a file was given
pub fn load_config_with_hash(
    path: Option<&Path>,
) -> Result<(Config, Option<String>), ConfigError> {
    let config = load_config(path)?;
    let hash = match path {
        Some(p) => Some(compute_config_hash(p)?),
        None => None,
    };
    Ok((config, hash))
}

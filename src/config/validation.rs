use crate::config::types::{ApiConfig, Config, PacingConfig, ScheduleConfig};
use crate::ConfigError;
use chrono::NaiveTime;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_pacing_config(&config.pacing)?;
    validate_output_config(&config.output)?;
    validate_schedule_config(&config.schedule)?;
    if let Some(warehouse) = &config.warehouse {
        if warehouse.database_path.is_empty() {
            return Err(ConfigError::Validation(
                "warehouse database_path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates the upstream API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use an http(s) scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.page_limit < 1 || config.page_limit > 1000 {
        return Err(ConfigError::Validation(format!(
            "page_limit must be between 1 and 1000, got {}",
            config.page_limit
        )));
    }

    if config.order != "asc" && config.order != "desc" {
        return Err(ConfigError::Validation(format!(
            "order must be 'asc' or 'desc', got '{}'",
            config.order
        )));
    }

    Ok(())
}

/// Validates request pacing
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    // inter_page_delay_secs of 0 is allowed so tests can run without sleeping

    Ok(())
}

/// Validates snapshot output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the scheduler configuration
fn validate_schedule_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    NaiveTime::parse_from_str(&config.daily_at, "%H:%M").map_err(|_| {
        ConfigError::Validation(format!(
            "daily_at must be a wall-clock time in HH:MM form, got '{}'",
            config.daily_at
        ))
    })?;

    if config.heartbeat_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "heartbeat_secs must be >= 1, got {}",
            config.heartbeat_secs
        )));
    }

    Ok(())
}

//! Configuration module for tickersweep
//!
//! This module handles loading, parsing, and validating configuration. Every
//! knob starts from a documented default; an optional TOML file overrides
//! them, and a handful of environment variables override the file. The API
//! credential is environment-only.
//!
//! # Example
//!
//! ```no_run
//! use tickersweep::config::load_config;
//!
//! let config = load_config(None).unwrap();
//! println!("Sweeping up to {} records per page", config.api.page_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, OutputConfig, PacingConfig, ScheduleConfig, WarehouseConfig,
};

// Re-export parser functions
pub use parser::{
    apply_env, compute_config_hash, load_config, load_config_file, load_config_with_hash,
    API_KEY_VAR,
};

//! Configuration module for Link-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and merging command-line overrides on top of them.
//!
//! # Example
//!
//! ```no_run
//! use link_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Request timeout: {}s", config.scraper.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigOverrides, OutputConfig, ProxyConfig, ScraperConfig, DEFAULT_CONCURRENCY,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, resolve_config};
pub use validation::validate_concurrency;

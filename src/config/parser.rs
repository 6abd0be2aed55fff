use crate::config::types::{Config, ConfigOverrides, ProxyConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Workers: {}", config.scraper.concurrency);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is printed in the run report so a report can be traced back to
/// the exact settings that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the effective configuration for a run
///
/// Starts from the file at `path` (or the defaults when there is none),
/// layers the command-line overrides on top and validates the result.
/// The file is only validated after the overrides are merged, so a flag
/// can correct a bad value in the file. The config hash is only present
/// when a file was loaded.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (mut config, hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            (config, Some(hash_content(&content)))
        }
        None => (Config::default(), None),
    };

    config.apply_overrides(overrides);
    validate(&config)?;

    Ok((config, hash))
}

impl Config {
    /// Replaces every field the overrides set
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(concurrency) = overrides.concurrency {
            self.scraper.concurrency = concurrency;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.scraper.timeout_secs = timeout_secs;
        }
        if let Some(proxy) = &overrides.proxy {
            self.proxy = ProxyConfig::uniform(proxy.clone());
        }
        if let Some(path) = &overrides.text_path {
            self.output.text_path = Some(path.clone());
        }
        if let Some(path) = &overrides.csv_path {
            self.output.csv_path = Some(path.clone());
        }
        if let Some(path) = &overrides.json_path {
            self.output.json_path = Some(path.clone());
        }
        if overrides.report {
            self.output.report = true;
        }
    }
}

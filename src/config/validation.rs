use crate::config::types::{Config, OutputConfig, ProxyConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_proxy_config(&config.proxy)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Rejects a worker pool that could never make progress
pub fn validate_concurrency(concurrency: usize) -> Result<(), ConfigError> {
    if concurrency < 1 {
        return Err(ConfigError::InvalidConcurrency(concurrency));
    }
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_concurrency(config.concurrency)?;

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates every configured proxy endpoint
fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    for (scheme, endpoint) in config.entries() {
        validate_proxy_endpoint(scheme, endpoint)?;
    }
    Ok(())
}

fn validate_proxy_endpoint(scheme: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| {
        ConfigError::InvalidProxy(format!("{} proxy '{}': {}", scheme, endpoint, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidProxy(format!(
            "{} proxy '{}' has unsupported scheme '{}'",
            scheme,
            endpoint,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidProxy(format!(
            "{} proxy '{}' has no host",
            scheme, endpoint
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("text_path", &config.text_path),
        ("csv_path", &config.csv_path),
        ("json_path", &config.json_path),
        ("report_dir", &config.report_dir),
    ] {
        if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

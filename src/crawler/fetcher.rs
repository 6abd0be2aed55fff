//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with the configured user agent, timeout and proxy
//! - GET requests to fetch page content
//! - Error classification into `FetchError`
//!
//! No retries are performed here.

use crate::config::{ProxyConfig, ScraperConfig};
use crate::{FetchError, HarvestError};
use async_trait::async_trait;
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Raw page content as fetched
pub type PageContent = String;

/// Fetches the content of a single URL
///
/// Implementations must not mutate shared state; the dispatcher calls
/// `fetch` from many workers at once.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs one request for `url`
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The scraper configuration (user agent, timeout)
/// * `proxy` - Proxy endpoints applied to every request of the run
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - A proxy endpoint was rejected or the client failed to build
///
/// # Example
///
/// ```no_run
/// use link_harvest::config::{ProxyConfig, ScraperConfig};
/// use link_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&ScraperConfig::default(), &ProxyConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ScraperConfig, proxy: &ProxyConfig) -> Result<Client, HarvestError> {
    build_client(
        &config.user_agent,
        Duration::from_secs(config.timeout_secs),
        proxy,
    )
}

fn build_client(user_agent: &str, timeout: Duration, proxy: &ProxyConfig) -> Result<Client, HarvestError> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true);

    for (scheme, endpoint) in proxy.entries() {
        let route = match scheme {
            "http" => Proxy::http(endpoint),
            _ => Proxy::https(endpoint),
        }
        .map_err(|e| {
            crate::ConfigError::InvalidProxy(format!("{} proxy '{}': {}", scheme, endpoint, e))
        })?;
        builder = builder.proxy(route);
    }

    Ok(builder.build()?)
}

/// Production fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the run configuration
    pub fn new(config: &ScraperConfig, proxy: &ProxyConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(config, proxy)?,
        })
    }

    /// Creates a fetcher with an explicit timeout and no proxy
    pub fn with_timeout(timeout: Duration) -> Result<Self, HarvestError> {
        let config = ScraperConfig::default();
        Ok(Self {
            client: build_client(&config.user_agent, timeout, &ProxyConfig::default())?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies any failure
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx or 3xx status | page body |
/// | Any other status | `HttpStatus(code)` |
/// | Request or body read exceeded the timeout | `Timeout` |
/// | DNS, connect, TLS or malformed URL | `Network(detail)` |
pub async fn fetch_url(client: &Client, url: &str) -> Result<PageContent, FetchError> {
    let response = client.get(url).send().await.map_err(classify_error)?;

    let status = response.status();
    if !(status.is_success() || status.is_redirection()) {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    response.text().await.map_err(classify_error)
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = error.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::Network(error_chain(&error))
    }
}

/// Joins an error with its sources ("outer: inner: root")
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}

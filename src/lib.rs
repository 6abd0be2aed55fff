//! Link-Harvest: a concurrent hyperlink harvester
//!
//! This crate fetches a set of web pages through a bounded worker pool,
//! extracts the anchor targets of every page, and aggregates the results
//! per source URL so they can be rendered as text, CSV, JSON or a report.

pub mod config;
pub mod crawler;
pub mod input;
pub mod output;
pub mod results;

use thiserror::Error;

/// Main error type for Link-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors
///
/// These are the only errors that abort a run, and they are always raised
/// before any task is dispatched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Concurrency limit must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("No URLs to scan")]
    EmptyUrlSet,

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),
}

/// Per-URL fetch failures
///
/// A `FetchError` never crosses the task boundary; the dispatcher turns it
/// into a failed outcome for the URL that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Task aborted: {0}")]
    Aborted(String),
}

/// URL list errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read URL list {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for Link-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Dispatcher, HtmlLinkExtractor, HttpFetcher, LinkExtractor, PageFetcher};
pub use input::{load_urls, UrlSet};
pub use results::{FetchOutcome, LinkSet, ResultAggregator, ResultTable, RunSummary};

use serde::Deserialize;
use std::path::PathBuf;

/// Default number of concurrent workers
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Link-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch and worker pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScraperConfig {
    /// Number of workers fetching pages at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Proxy endpoints keyed by the scheme of the requested URL
///
/// Applied uniformly to every fetch of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// Proxy used for `http://` URLs
    pub http: Option<String>,

    /// Proxy used for `https://` URLs
    pub https: Option<String>,
}

impl ProxyConfig {
    /// Routes both schemes through the same endpoint
    pub fn uniform(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            http: Some(endpoint.clone()),
            https: Some(endpoint),
        }
    }

    /// Returns true if no proxy is configured
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }

    /// Iterates over the configured `(scheme, endpoint)` pairs
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("http", self.http.as_deref()), ("https", self.https.as_deref())]
            .into_iter()
            .filter_map(|(scheme, endpoint)| endpoint.map(|e| (scheme, e)))
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Plain text output file
    #[serde(rename = "text-path")]
    pub text_path: Option<PathBuf>,

    /// CSV output file
    #[serde(rename = "csv-path")]
    pub csv_path: Option<PathBuf>,

    /// JSON output file
    #[serde(rename = "json-path")]
    pub json_path: Option<PathBuf>,

    /// Whether to write a report after the run
    #[serde(default)]
    pub report: bool,

    /// Directory the report file is written to
    #[serde(rename = "report-dir")]
    pub report_dir: Option<PathBuf>,
}

/// Values supplied on the command line
///
/// Every field that is set replaces the value from the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub proxy: Option<String>,
    pub text_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub report: bool,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("link-harvest/{}", env!("CARGO_PKG_VERSION"))
}

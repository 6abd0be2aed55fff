//! Crawler module for fetching pages and harvesting their links
//!
//! This module contains the concurrent core, including:
//! - HTTP fetching with a fixed timeout and optional proxy
//! - HTML parsing and anchor extraction
//! - The bounded worker pool that drives a run

mod dispatcher;
mod fetcher;
mod parser;

pub use dispatcher::{process_url, Dispatcher};
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageContent, PageFetcher};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};

use crate::config::Config;
use crate::input::UrlSet;
use crate::results::{ProgressObserver, ResultTable, RunSummary};
use crate::HarvestError;
use std::sync::Arc;

/// Runs a complete harvest with the production fetcher and extractor
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client from the scraper and proxy configuration
/// 2. Validate the concurrency limit
/// 3. Fetch every URL through the worker pool
/// 4. Return the finalized table and summary
///
/// # Example
///
/// ```no_run
/// use link_harvest::config::Config;
/// use link_harvest::crawler::harvest;
/// use link_harvest::input::UrlSet;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls: UrlSet = ["https://example.com".to_string()].into_iter().collect();
/// let (table, summary) = harvest(&Config::default(), &urls, None).await?;
/// println!("{} links from {} pages", summary.total_links, table.len());
/// # Ok(())
/// # }
/// ```
pub async fn harvest(
    config: &Config,
    urls: &UrlSet,
    observer: Option<ProgressObserver>,
) -> Result<(ResultTable, RunSummary), HarvestError> {
    let fetcher = HttpFetcher::new(&config.scraper, &config.proxy)?;
    let mut dispatcher = Dispatcher::new(
        Arc::new(fetcher),
        Arc::new(HtmlLinkExtractor),
        config.scraper.concurrency,
    )?;
    if let Some(observer) = observer {
        dispatcher = dispatcher.with_observer(observer);
    }
    dispatcher.run(urls).await
}

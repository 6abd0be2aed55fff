//! URL list input
//!
//! Builds the set of URLs for a run from a list file (one URL per line)
//! and/or a single URL given on the command line.

use crate::InputError;
use std::collections::BTreeSet;
use std::path::Path;

/// Distinct URLs submitted to a run, compared by exact string equality
pub type UrlSet = BTreeSet<String>;

/// Collects the URLs to scan
///
/// Lines are trimmed and blank lines are skipped. Duplicates collapse, so
/// the same URL listed twice is fetched once. An empty result is not an
/// error here; the dispatcher rejects it before scheduling anything.
///
/// # Arguments
///
/// * `file` - Optional path to a file with one URL per line
/// * `single` - Optional single URL
///
/// # Returns
///
/// * `Ok(UrlSet)` - The distinct URLs found
/// * `Err(InputError)` - The list file could not be read
pub fn load_urls(file: Option<&Path>, single: Option<&str>) -> Result<UrlSet, InputError> {
    let mut urls = UrlSet::new();

    if let Some(path) = file {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.display().to_string(),
            source,
        })?;
        urls.extend(parse_url_list(&content));
        tracing::debug!("Read {} URLs from {}", urls.len(), path.display());
    }

    if let Some(url) = single.map(str::trim).filter(|u| !u.is_empty()) {
        urls.insert(url.to_string());
    }

    Ok(urls)
}

/// Parses newline-separated URLs, skipping blank lines
pub fn parse_url_list(content: &str) -> UrlSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

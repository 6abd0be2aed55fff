//! Finalized run results
//!
//! A `ResultTable` only exists once every task of a run has reached a
//! terminal outcome; it is handed to the output writers read-only.

use crate::results::outcome::{FetchOutcome, LinkSet};
use crate::FetchError;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::time::Duration;

/// Mapping from each submitted URL to its outcome
///
/// Entries iterate in lexicographic URL order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    entries: BTreeMap<String, FetchOutcome>,
}

impl ResultTable {
    pub(crate) fn from_entries(entries: BTreeMap<String, FetchOutcome>) -> Self {
        Self { entries }
    }

    /// Returns the outcome recorded for `url`
    pub fn get(&self, url: &str) -> Option<&FetchOutcome> {
        self.entries.get(url)
    }

    /// Returns true if `url` has an outcome
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Number of URLs in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all `(url, outcome)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FetchOutcome)> {
        self.entries.iter().map(|(url, outcome)| (url.as_str(), outcome))
    }

    /// Iterates over the URLs that were fetched successfully
    pub fn successes(&self) -> impl Iterator<Item = (&str, &LinkSet)> {
        self.iter()
            .filter_map(|(url, outcome)| outcome.links().map(|links| (url, links)))
    }

    /// Iterates over the URLs that failed, with their reason
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.iter()
            .filter_map(|(url, outcome)| outcome.error().map(|error| (url, error)))
    }

    /// Number of failed URLs
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Sum of link-set sizes over all successful URLs
    pub fn total_links(&self) -> usize {
        self.successes().map(|(_, links)| links.len()).sum()
    }
}

/// Counters derived from a finalized table
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of distinct URLs submitted
    pub total: usize,

    /// URLs whose outcome is a failure
    pub failed: usize,

    /// URLs fetched and parsed successfully
    pub succeeded: usize,

    /// Links found across all successful URLs
    pub total_links: usize,

    /// Wall-clock time the run was dispatched
    pub started_at: DateTime<Local>,

    /// Wall-clock time the run was finalized
    pub finished_at: DateTime<Local>,

    /// Time between dispatch and finalization
    pub elapsed: Duration,
}

impl RunSummary {
    /// Builds the summary for `table`
    pub fn from_table(
        table: &ResultTable,
        total: usize,
        started_at: DateTime<Local>,
        elapsed: Duration,
    ) -> Self {
        let failed = table.failure_count();
        Self {
            total,
            failed,
            succeeded: table.len() - failed,
            total_links: table.total_links(),
            started_at,
            finished_at: Local::now(),
            elapsed,
        }
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.total as f64) * 100.0
    }
}

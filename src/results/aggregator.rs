//! Thread-safe accumulation of task outcomes
//!
//! Workers report each outcome through [`ResultAggregator::record`] as soon
//! as their task finishes. The table is only readable after
//! [`ResultAggregator::finalize`], which consumes the aggregator, so no
//! `record` call can race with it.

use crate::results::outcome::FetchOutcome;
use crate::results::table::{ResultTable, RunSummary};
use chrono::{DateTime, Local};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// Callback invoked for every recorded outcome
pub type ProgressObserver = Arc<dyn Fn(&str, &FetchOutcome) + Send + Sync>;

/// Collects outcomes keyed by URL
pub struct ResultAggregator {
    /// Number of URLs submitted to the run
    submitted: usize,

    /// Outcomes recorded so far
    entries: Mutex<BTreeMap<String, FetchOutcome>>,

    /// Optional progress callback
    observer: Option<ProgressObserver>,

    started_at: DateTime<Local>,
    started: Instant,
}

impl ResultAggregator {
    /// Creates an empty aggregator for a run of `submitted` URLs
    pub fn new(submitted: usize) -> Self {
        Self {
            submitted,
            entries: Mutex::new(BTreeMap::new()),
            observer: None,
            started_at: Local::now(),
            started: Instant::now(),
        }
    }

    /// Attaches a progress observer
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Records the outcome for `url`
    ///
    /// Safe to call from any number of tasks at once. Each call inserts or
    /// overwrites exactly one key. The entry is stored before the observer
    /// runs, and the observer runs outside the lock, so a panicking
    /// observer cannot lose the outcome.
    pub fn record(&self, url: impl Into<String>, outcome: FetchOutcome) {
        let url = url.into();
        let observed = self.observer.as_ref().map(|_| outcome.clone());

        {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            match entries.entry(url.clone()) {
                Entry::Occupied(mut slot) => {
                    tracing::warn!("Outcome for {} recorded twice, keeping the latest", slot.key());
                    slot.insert(outcome);
                }
                Entry::Vacant(slot) => {
                    slot.insert(outcome);
                }
            }
        }

        if let (Some(observer), Some(outcome)) = (&self.observer, observed) {
            observer(&url, &outcome);
        }
    }

    /// Returns true if `url` already has an outcome
    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url)
    }

    /// Number of outcomes recorded so far
    pub fn recorded(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Freezes the table and derives the run summary
    pub fn finalize(self) -> (ResultTable, RunSummary) {
        let entries = self
            .entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let table = ResultTable::from_entries(entries);
        let summary = RunSummary::from_table(
            &table,
            self.submitted,
            self.started_at,
            self.started.elapsed(),
        );
        (table, summary)
    }
}

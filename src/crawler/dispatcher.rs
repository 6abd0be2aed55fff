//! Bounded worker pool that runs one fetch+extract task per URL
//!
//! This module contains the run loop:
//! - Validating the run (concurrency limit, non-empty URL set)
//! - Spawning a fixed number of workers that pull URLs from a shared queue
//! - Recording every outcome into the aggregator as it completes
//! - Waiting for all workers, then finalizing the result table

use crate::config::validate_concurrency;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::LinkExtractor;
use crate::input::UrlSet;
use crate::results::{FetchOutcome, ProgressObserver, ResultAggregator, ResultTable, RunSummary};
use crate::{ConfigError, FetchError, HarvestError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Queue of URLs waiting for a free worker
type TaskQueue = Arc<Mutex<VecDeque<String>>>;

/// Runs a batch of URLs through a bounded pool of workers
///
/// Each worker handles one URL at a time, so at most `concurrency` fetches
/// are in flight. A failing URL only affects its own outcome.
pub struct Dispatcher {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    concurrency: usize,
    observer: Option<ProgressObserver>,
}

impl Dispatcher {
    /// Creates a dispatcher
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Performs the network request for each URL
    /// * `extractor` - Turns page content into a link set
    /// * `concurrency` - Number of workers; must be at least 1
    ///
    /// # Returns
    ///
    /// * `Ok(Dispatcher)` - Ready to run
    /// * `Err(ConfigError::InvalidConcurrency)` - `concurrency` was 0
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        concurrency: usize,
    ) -> Result<Self, ConfigError> {
        validate_concurrency(concurrency)?;
        Ok(Self {
            fetcher,
            extractor,
            concurrency,
            observer: None,
        })
    }

    /// Attaches a callback invoked for each outcome as it is recorded
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Fetches every URL and returns the finalized results
    ///
    /// Blocks until every URL has a terminal outcome. The returned table
    /// has exactly one entry per URL in `urls`.
    ///
    /// # Returns
    ///
    /// * `Ok((ResultTable, RunSummary))` - The run completed; individual
    ///   URLs may still have failed
    /// * `Err(HarvestError::Config)` - `urls` was empty; nothing was fetched
    pub async fn run(&self, urls: &UrlSet) -> Result<(ResultTable, RunSummary), HarvestError> {
        if urls.is_empty() {
            return Err(ConfigError::EmptyUrlSet.into());
        }

        let worker_count = self.concurrency.min(urls.len());
        tracing::info!(
            "Dispatching {} URLs across {} workers",
            urls.len(),
            worker_count
        );

        let queue: TaskQueue = Arc::new(Mutex::new(urls.iter().cloned().collect()));
        let mut aggregator = ResultAggregator::new(urls.len());
        if let Some(observer) = &self.observer {
            aggregator = aggregator.with_observer(Arc::clone(observer));
        }
        let aggregator = Arc::new(aggregator);

        let handles: Vec<_> = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&queue),
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.extractor),
                    Arc::clone(&aggregator),
                ))
            })
            .collect();

        let mut lost_workers = Vec::new();
        for (worker_id, result) in futures::future::join_all(handles)
            .await
            .into_iter()
            .enumerate()
        {
            if let Err(e) = result {
                tracing::error!("Worker {} terminated abnormally: {}", worker_id, e);
                lost_workers.push(worker_id);
            }
        }

        // Task panics are contained inside the worker, so a lost worker is a bug
        if !lost_workers.is_empty() {
            return Err(HarvestError::Internal(format!(
                "workers {:?} terminated before draining the queue",
                lost_workers
            )));
        }

        // Every worker has exited, so nothing else touches the aggregator
        let aggregator = Arc::try_unwrap(aggregator).map_err(|_| {
            HarvestError::Internal("result aggregator still shared after run".to_string())
        })?;
        debug_assert_eq!(aggregator.recorded(), urls.len());

        let (table, summary) = aggregator.finalize();
        tracing::info!(
            "Run complete: {} URLs, {} failed, {} links in {:?}",
            summary.total,
            summary.failed,
            summary.total_links,
            summary.elapsed
        );

        Ok((table, summary))
    }
}

/// Worker loop: pull a URL, process it, record the outcome, repeat
///
/// Each task runs as its own tokio task so a panic only costs the URL it
/// was handling. The worker records `Aborted` for that URL and carries on.
async fn run_worker(
    worker_id: usize,
    queue: TaskQueue,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    aggregator: Arc<ResultAggregator>,
) {
    tracing::debug!("Worker {} started", worker_id);

    loop {
        let next = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some(url) = next else {
            break;
        };

        let task = tokio::spawn(run_task(
            url.clone(),
            Arc::clone(&fetcher),
            Arc::clone(&extractor),
            Arc::clone(&aggregator),
        ));

        if let Err(e) = task.await {
            tracing::error!("Task for {} failed: {}", url, e);
            // The observer runs after the entry is stored, so an outcome may
            // already be there
            if !aggregator.contains(&url) {
                let aggregator = Arc::clone(&aggregator);
                let outcome = FetchOutcome::Failure(FetchError::Aborted(e.to_string()));
                let _ = tokio::spawn(async move { aggregator.record(url, outcome) }).await;
            }
        }
    }

    tracing::debug!("Worker {} finished", worker_id);
}

/// One task: process the URL and record its outcome
async fn run_task(
    url: String,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    aggregator: Arc<ResultAggregator>,
) {
    let outcome = process_url(fetcher.as_ref(), extractor.as_ref(), &url).await;
    aggregator.record(url, outcome);
}

/// Runs one task: fetch, then extract on success
///
/// Fetch failures short-circuit to a failed outcome without calling the
/// extractor.
pub async fn process_url(
    fetcher: &dyn PageFetcher,
    extractor: &dyn LinkExtractor,
    url: &str,
) -> FetchOutcome {
    tracing::debug!("Fetching {}", url);

    match fetcher.fetch(url).await {
        Ok(content) => {
            let links = extractor.extract(&content);
            tracing::debug!("Found {} links on {}", links.len(), url);
            FetchOutcome::Success(links)
        }
        Err(e) => {
            tracing::warn!("Error while retrieving {}: {}", url, e);
            FetchOutcome::Failure(e)
        }
    }
}

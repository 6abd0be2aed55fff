//! Worker pool behaviour against deterministic mock fetchers

use async_trait::async_trait;
use link_harvest::crawler::{
    Dispatcher, HtmlLinkExtractor, LinkExtractor, PageContent, PageFetcher,
};
use link_harvest::input::UrlSet;
use link_harvest::results::{FetchOutcome, LinkSet, ProgressObserver};
use link_harvest::{ConfigError, FetchError, HarvestError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock fetcher that tracks how many fetches run at once
///
/// URLs containing `timeout`, `status-500` or `refused` fail with the
/// matching error; every other URL returns a small page whose links are
/// derived from the URL.
struct InstrumentedFetcher {
    delay: Duration,
    slow_delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl InstrumentedFetcher {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            slow_delay: delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    fn with_slow_delay(mut self, slow_delay: Duration) -> Self {
        self.slow_delay = slow_delay;
        self
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for InstrumentedFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = if url.contains("slow") {
            self.slow_delay
        } else {
            self.delay
        };
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if url.contains("timeout") {
            Err(FetchError::Timeout)
        } else if url.contains("status-500") {
            Err(FetchError::HttpStatus(500))
        } else if url.contains("refused") {
            Err(FetchError::Network("connection refused".to_string()))
        } else {
            Ok(format!(
                r#"<html><body>
                <a href="{url}/child">child</a>
                <a href="/shared">shared</a>
                <a href="/shared">shared again</a>
                </body></html>"#
            ))
        }
    }
}

/// Extractor that panics on pages mentioning `explode`
struct FragileExtractor;

impl LinkExtractor for FragileExtractor {
    fn extract(&self, content: &str) -> LinkSet {
        if content.contains("explode") {
            panic!("cannot parse page");
        }
        HtmlLinkExtractor.extract(content)
    }
}

fn url_set(count: usize) -> UrlSet {
    (0..count)
        .map(|i| format!("https://site{:03}.example", i))
        .collect()
}

fn dispatcher(fetcher: &Arc<InstrumentedFetcher>, concurrency: usize) -> Dispatcher {
    Dispatcher::new(
        Arc::clone(fetcher) as Arc<dyn PageFetcher>,
        Arc::new(HtmlLinkExtractor),
        concurrency,
    )
    .expect("valid concurrency")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_url_has_exactly_one_entry() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(5)));
    let urls = url_set(50);

    let (table, summary) = dispatcher(&fetcher, 4).run(&urls).await.unwrap();

    assert_eq!(table.len(), 50);
    assert_eq!(fetcher.calls(), 50);
    for url in &urls {
        let outcome = table.get(url).expect("missing entry");
        let links = outcome.links().expect("expected success");
        assert_eq!(links.len(), 2);
        assert!(links.contains(&format!("{}/child", url)));
        assert!(links.contains("/shared"));
    }
    assert_eq!(summary.total, 50);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total_links, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit_is_never_exceeded() {
    for limit in [1, 2, 3, 8] {
        let fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(15)));
        let urls = url_set(24);

        let (table, _) = dispatcher(&fetcher, limit).run(&urls).await.unwrap();

        assert_eq!(table.len(), 24);
        assert!(
            fetcher.peak() <= limit,
            "limit {} exceeded: peak {}",
            limit,
            fetcher.peak()
        );
        assert!(fetcher.peak() >= 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_limit_larger_than_url_set() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(5)));
    let urls = url_set(3);

    let (table, _) = dispatcher(&fetcher, 64).run(&urls).await.unwrap();

    assert_eq!(table.len(), 3);
    assert!(fetcher.peak() <= 3);
}

#[tokio::test]
async fn test_zero_concurrency_rejected_before_any_fetch() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::ZERO));
    let result = Dispatcher::new(
        Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
        Arc::new(HtmlLinkExtractor),
        0,
    );

    assert!(matches!(result, Err(ConfigError::InvalidConcurrency(0))));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_empty_url_set_rejected_before_any_fetch() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::ZERO));

    let result = dispatcher(&fetcher, 2).run(&UrlSet::new()).await;

    assert!(matches!(
        result,
        Err(HarvestError::Config(ConfigError::EmptyUrlSet))
    ));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failures_are_isolated() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(5)));
    let mut urls = url_set(6);
    urls.insert("https://timeout.example".to_string());
    urls.insert("https://status-500.example".to_string());
    urls.insert("https://refused.example".to_string());

    let (table, summary) = dispatcher(&fetcher, 3).run(&urls).await.unwrap();

    assert_eq!(table.len(), 9);
    assert_eq!(
        table.get("https://timeout.example"),
        Some(&FetchOutcome::Failure(FetchError::Timeout))
    );
    assert_eq!(
        table.get("https://status-500.example"),
        Some(&FetchOutcome::Failure(FetchError::HttpStatus(500)))
    );
    assert!(matches!(
        table.get("https://refused.example"),
        Some(FetchOutcome::Failure(FetchError::Network(_)))
    ));
    for url in url_set(6) {
        assert_eq!(table.get(&url).map(FetchOutcome::link_count), Some(2));
    }
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.succeeded, 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_url_does_not_stall_others() {
    let fetcher = Arc::new(
        InstrumentedFetcher::new(Duration::from_millis(10))
            .with_slow_delay(Duration::from_millis(800)),
    );
    // Sorts first, so a worker picks it up immediately
    let mut urls = UrlSet::new();
    urls.insert("https://a-slow-timeout.example".to_string());
    urls.extend(url_set(10));

    let order = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&order);
    let observer: ProgressObserver = Arc::new(move |url: &str, _: &FetchOutcome| {
        sink.lock().unwrap().push(url.to_string());
    });

    let (table, _) = dispatcher(&fetcher, 2)
        .with_observer(observer)
        .run(&urls)
        .await
        .unwrap();

    let order = order.lock().unwrap();
    assert_eq!(order.len(), 11);
    assert_eq!(order.last().map(String::as_str), Some("https://a-slow-timeout.example"));
    assert_eq!(
        table.get("https://a-slow-timeout.example"),
        Some(&FetchOutcome::Failure(FetchError::Timeout))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_duplicate_urls_are_fetched_once() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(1)));
    let urls: UrlSet = [
        "https://dup.example",
        "https://dup.example",
        "https://other.example",
        "https://dup.example",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let (table, summary) = dispatcher(&fetcher, 4).run(&urls).await.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(summary.total, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_runs_are_identical() {
    let mut urls = url_set(30);
    urls.insert("https://timeout.example".to_string());
    urls.insert("https://status-500.example".to_string());

    let first_fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(2)));
    let (first, _) = dispatcher(&first_fetcher, 5).run(&urls).await.unwrap();

    let second_fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(2)));
    let (second, _) = dispatcher(&second_fetcher, 7).run(&urls).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_observer_called_once_per_url() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::ZERO));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let observer: ProgressObserver = Arc::new(move |_: &str, _: &FetchOutcome| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let urls = url_set(12);
    dispatcher(&fetcher, 3)
        .with_observer(observer)
        .run(&urls)
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 12);
}

#[tokio::test]
async fn test_panic_does_not_skip_queued_urls() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::ZERO));
    let urls: UrlSet = [
        "https://a-explode.example",
        "https://b.example",
        "https://c.example",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let dispatcher = Dispatcher::new(
        Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
        Arc::new(FragileExtractor),
        1,
    )
    .unwrap();
    let (table, summary) = dispatcher.run(&urls).await.unwrap();

    assert_eq!(fetcher.calls(), 3);
    assert!(matches!(
        table.get("https://a-explode.example"),
        Some(FetchOutcome::Failure(FetchError::Aborted(_)))
    ));
    assert_eq!(table.get("https://b.example").map(FetchOutcome::link_count), Some(2));
    assert_eq!(table.get("https://c.example").map(FetchOutcome::link_count), Some(2));
    assert_eq!(summary.failed, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_keeps_its_width_after_a_panic() {
    let fetcher = Arc::new(InstrumentedFetcher::new(Duration::from_millis(20)));
    let mut urls = url_set(12);
    urls.insert("https://a-explode.example".to_string());

    let dispatcher = Dispatcher::new(
        Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
        Arc::new(FragileExtractor),
        2,
    )
    .unwrap();
    let (table, summary) = dispatcher.run(&urls).await.unwrap();

    assert_eq!(fetcher.calls(), 13);
    assert_eq!(table.len(), 13);
    assert_eq!(summary.failed, 1);
    assert!(fetcher.peak() <= 2);
}

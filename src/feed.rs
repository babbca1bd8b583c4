//! Market feed: fetch orchestration and auto-refresh
//!
//! [`MarketFeed`] ties a [`MarketDataSource`] to a [`MarketStore`] and
//! keeps the store current: an immediate fetch on start, then a fixed
//! interval for as long as the view is alive. Ticks are not serialized
//! against manual refreshes; instead every fetch takes a ticket before
//! it is issued and the store rejects results older than the last
//! applied one, so the last-issued request wins regardless of which
//! response lands last.

use crate::{
    client::ApiClient,
    constants::{MARKETS_PAGE_SIZE, REFRESH_INTERVAL_SECS},
    error::ApiError,
    metrics::{MetricsCollector, RefreshMetrics},
    repos::markets::MarketsRepository,
    source::MarketDataSource,
    store::MarketStore,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Keeps the asset list fresh
pub struct MarketFeed {
    source: Arc<dyn MarketDataSource>,
    store: Arc<MarketStore>,
    metrics: Arc<MetricsCollector>,
    tickets: Arc<AtomicU64>,
    refresher: Mutex<Option<JoinHandle<()>>>,
}

impl MarketFeed {
    /// Creates a feed backed by the live markets repository.
    pub fn new(client: ApiClient) -> Self {
        Self::with_source(Arc::new(MarketsRepository::new(client)))
    }

    /// Creates a feed over a custom source. Primarily for tests.
    pub fn with_source(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            store: Arc::new(MarketStore::new()),
            metrics: Arc::new(MetricsCollector::new()),
            tickets: Arc::new(AtomicU64::new(0)),
            refresher: Mutex::new(None),
        }
    }

    /// The store backing this feed.
    pub fn store(&self) -> Arc<MarketStore> {
        self.store.clone()
    }

    /// Fetches page one now and applies it if still the freshest result.
    pub async fn refresh_now(&self) -> Result<(), ApiError> {
        Self::refresh(&self.source, &self.store, &self.metrics, &self.tickets).await
    }

    async fn refresh(
        source: &Arc<dyn MarketDataSource>,
        store: &Arc<MarketStore>,
        metrics: &Arc<MetricsCollector>,
        tickets: &Arc<AtomicU64>,
    ) -> Result<(), ApiError> {
        // Ticket taken before the request goes out: competing refreshes
        // are ordered by issue time, and a late response loses.
        let ticket = tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();

        match source.fetch_page(1, MARKETS_PAGE_SIZE).await {
            Ok(assets) => {
                let applied = store.replace(ticket, assets).await;
                metrics.record(start.elapsed(), true).await;
                tracing::debug!(
                    ticket,
                    applied,
                    source = source.source_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "market refresh complete"
                );
                Ok(())
            }
            Err(e) => {
                metrics.record(start.elapsed(), false).await;
                Err(e)
            }
        }
    }

    /// Starts the auto-refresh loop at the default interval.
    pub async fn start(&self) {
        self.start_with_interval(Duration::from_secs(REFRESH_INTERVAL_SECS))
            .await
    }

    /// Starts the loop with a custom interval, replacing a running loop.
    ///
    /// The first fetch happens immediately. A failed tick is logged and
    /// the loop waits for the next interval; nothing else stops it.
    pub async fn start_with_interval(&self, interval: Duration) {
        let source = self.source.clone();
        let store = self.store.clone();
        let metrics = self.metrics.clone();
        let tickets = self.tickets.clone();

        let handle = tokio::spawn(async move {
            tracing::info!(
                interval_secs = interval.as_secs(),
                "starting market auto-refresh"
            );
            loop {
                if let Err(e) = Self::refresh(&source, &store, &metrics, &tickets).await {
                    tracing::warn!(error = %e, "scheduled market refresh failed");
                }
                sleep(interval).await;
            }
        });

        let mut slot = self.refresher.lock().await;
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    /// Stops the auto-refresh loop. Idempotent.
    pub async fn stop(&self) {
        if let Some(handle) = self.refresher.lock().await.take() {
            handle.abort();
        }
    }

    /// Current refresh metrics snapshot.
    pub async fn metrics(&self) -> RefreshMetrics {
        self.metrics.snapshot().await
    }
}

impl Drop for MarketFeed {
    fn drop(&mut self) {
        // Teardown must not leave the interval running
        if let Some(handle) = self.refresher.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::MockSource;
    use crate::types::fixtures::asset;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn refresh_now_populates_the_store() {
        let source = Arc::new(MockSource::new());
        source.push_ok(vec![asset("bitcoin"), asset("ethereum")]);
        let feed = MarketFeed::with_source(source.clone());

        feed.refresh_now().await.unwrap();

        assert_eq!(feed.store().len().await, 2);
        assert_eq!(source.calls(), 1);

        let metrics = feed.metrics().await;
        assert_eq!(metrics.total_refreshes, 1);
        assert_eq!(metrics.failed_refreshes, 0);
    }

    #[tokio::test]
    async fn a_slow_early_refresh_loses_to_a_newer_one() {
        let source = Arc::new(MockSource::new());
        source.push_ok_after(vec![asset("old")], Duration::from_millis(100));
        source.push_ok(vec![asset("new")]);
        let feed = Arc::new(MarketFeed::with_source(source));

        let slow = tokio::spawn({
            let feed = feed.clone();
            async move { feed.refresh_now().await }
        });
        // Let the slow refresh take its ticket and get stuck in flight
        sleep(Duration::from_millis(20)).await;

        feed.refresh_now().await.unwrap();
        slow.await.unwrap().unwrap();

        let assets = feed.store().assets().await;
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, "new");
    }

    #[tokio::test]
    async fn a_failed_tick_does_not_stop_the_loop() {
        let source = Arc::new(MockSource::new());
        source.push_err(ApiError::HttpStatus(StatusCode::TOO_MANY_REQUESTS));
        source.push_ok(vec![asset("bitcoin")]);
        let feed = MarketFeed::with_source(source.clone());

        feed.start_with_interval(Duration::from_millis(50)).await;
        sleep(Duration::from_millis(130)).await;
        feed.stop().await;

        assert!(source.calls() >= 2);
        let assets = feed.store().assets().await;
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, "bitcoin");

        let metrics = feed.metrics().await;
        assert!(metrics.failed_refreshes >= 1);
    }

    #[tokio::test]
    async fn stop_halts_the_loop() {
        let source = Arc::new(MockSource::new());
        source.push_ok(vec![asset("bitcoin")]);
        let feed = MarketFeed::with_source(source.clone());

        feed.start_with_interval(Duration::from_millis(30)).await;
        sleep(Duration::from_millis(10)).await;
        feed.stop().await;

        let calls_at_stop = source.calls();
        sleep(Duration::from_millis(100)).await;

        assert_eq!(source.calls(), calls_at_stop);
    }
}

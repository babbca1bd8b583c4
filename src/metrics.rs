//! Feed refresh metrics
//!
//! Rolling window of refresh latencies and success rate for the market
//! feed.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum number of samples kept for percentile calculation
const MAX_SAMPLES: usize = 100;

/// Snapshot of refresh health
#[derive(Debug, Clone)]
pub struct RefreshMetrics {
    /// 50th percentile latency in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Total refreshes tracked (lifetime)
    pub total_refreshes: u64,
    /// Failed refreshes (lifetime)
    pub failed_refreshes: u64,
}

impl RefreshMetrics {
    fn empty() -> Self {
        Self {
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_refreshes: 0,
            failed_refreshes: 0,
        }
    }
}

#[derive(Debug)]
struct Sample {
    duration_ms: f64,
    success: bool,
}

#[derive(Debug, Default)]
struct MetricsState {
    samples: VecDeque<Sample>,
    total: u64,
    failed: u64,
}

/// Collects refresh samples and computes the snapshot
pub struct MetricsCollector {
    state: RwLock<MetricsState>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MetricsState::default()),
        }
    }

    /// Records one refresh with its duration and outcome.
    pub async fn record(&self, duration: Duration, success: bool) {
        let mut state = self.state.write().await;
        state.total += 1;
        if !success {
            state.failed += 1;
        }

        if state.samples.len() >= MAX_SAMPLES {
            state.samples.pop_front();
        }
        state.samples.push_back(Sample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes the current snapshot from collected samples.
    pub async fn snapshot(&self) -> RefreshMetrics {
        let state = self.state.read().await;
        if state.samples.is_empty() {
            return RefreshMetrics::empty();
        }

        let mut latencies: Vec<f64> = state
            .samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let success_rate = if state.total > 0 {
            (state.total - state.failed) as f64 / state.total as f64
        } else {
            1.0
        };

        RefreshMetrics {
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_refreshes: state.total,
            failed_refreshes: state.failed,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collector_tracks_totals_and_success_rate() {
        let collector = MetricsCollector::new();

        collector.record(Duration::from_millis(100), true).await;
        collector.record(Duration::from_millis(200), true).await;
        collector.record(Duration::from_millis(150), false).await;

        let metrics = collector.snapshot().await;

        assert_eq!(metrics.total_refreshes, 3);
        assert_eq!(metrics.failed_refreshes, 1);
        assert!(metrics.success_rate > 0.6 && metrics.success_rate < 0.7);
    }

    #[tokio::test]
    async fn empty_collector_reports_clean_defaults() {
        let metrics = MetricsCollector::new().snapshot().await;
        assert_eq!(metrics.total_refreshes, 0);
        assert_eq!(metrics.success_rate, 1.0);
    }

    #[test]
    fn percentile_of_sorted_values() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&values, 50.0), 5.0);
        assert_eq!(percentile(&values, 99.0), 10.0);
    }
}

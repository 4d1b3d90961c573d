//! Dispatcher metrics for observability
//!
//! Sink failures never reach the caller of `log`, so these counters are the
//! way to notice a broken destination.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what the dispatcher has delivered.
///
/// # Example
///
/// ```
/// use clog::ClogMetrics;
///
/// let metrics = ClogMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_delivery();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.records_logged(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct ClogMetrics {
    /// Number of `log` calls rendered
    records_logged: AtomicU64,

    /// Number of successful sink writes
    deliveries: AtomicU64,

    /// Number of sink writes that returned an error
    write_failures: AtomicU64,

    /// Number of sink writes that panicked
    sink_panics: AtomicU64,
}

impl ClogMetrics {
    pub const fn new() -> Self {
        Self {
            records_logged: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            sink_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_logged(&self) -> u64 {
        self.records_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_panics(&self) -> u64 {
        self.sink_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.records_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery(&self) -> u64 {
        self.deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// A panic also counts as a write failure.
    #[inline]
    pub fn record_sink_panic(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
        self.sink_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of sink writes that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.deliveries() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.records_logged.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.sink_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for ClogMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ClogMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            records_logged: AtomicU64::new(self.records_logged()),
            deliveries: AtomicU64::new(self.deliveries()),
            write_failures: AtomicU64::new(self.write_failures()),
            sink_panics: AtomicU64::new(self.sink_panics()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = ClogMetrics::new();
        assert_eq!(metrics.records_logged(), 0);
        assert_eq!(metrics.deliveries(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.sink_panics(), 0);
    }

    #[test]
    fn test_panic_counts_as_failure() {
        let metrics = ClogMetrics::new();
        assert_eq!(metrics.record_sink_panic(), 0); // Returns previous value
        assert_eq!(metrics.sink_panics(), 1);
        assert_eq!(metrics.write_failures(), 1);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = ClogMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivery();
        }
        for _ in 0..10 {
            metrics.record_write_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = ClogMetrics::new();
        metrics.record_logged();
        metrics.record_delivery();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.records_logged(), 0);
        assert_eq!(snapshot.records_logged(), 1);
        assert_eq!(snapshot.deliveries(), 1);
    }
}

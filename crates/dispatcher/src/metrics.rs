//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Total events passed to `log`
    event_count: AtomicU64,
    /// Total successful provider deliveries
    delivery_count: AtomicU64,
    /// Total providers skipped because the event declined to name itself
    skip_count: AtomicU64,
    /// Total contained delivery failures
    failure_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total event count
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::Relaxed)
    }

    /// Increment event count
    pub fn inc_event_count(&self) {
        self.event_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total delivery count
    pub fn delivery_count(&self) -> u64 {
        self.delivery_count.load(Ordering::Relaxed)
    }

    /// Increment delivery count
    pub fn inc_delivery_count(&self) {
        self.delivery_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get skip count
    pub fn skip_count(&self) -> u64 {
        self.skip_count.load(Ordering::Relaxed)
    }

    /// Increment skip count
    pub fn inc_skip_count(&self) {
        self.skip_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            event_count: self.event_count(),
            delivery_count: self.delivery_count(),
            skip_count: self.skip_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub event_count: u64,
    pub delivery_count: u64,
    pub skip_count: u64,
    pub failure_count: u64,
}

//! Delivery metric recording
//!
//! Prometheus-facing counters for dispatch outcomes, plus an in-memory
//! aggregator for end-of-run summaries.

use std::collections::HashMap;

use metrics::{counter, gauge};

/// Record one event handed to the dispatcher
pub fn record_event_logged() {
    counter!("analytics_events_total").increment(1);
}

/// Record one provider delivery attempt
///
/// Intended for provider implementations, which are the only place the
/// per-backend outcome is known.
pub fn record_delivery(provider_id: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "analytics_deliveries_total",
        "provider" => provider_id.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Export a dispatcher metrics snapshot as gauges
///
/// Call periodically (or at shutdown) with the dispatcher's counter values.
pub fn record_dispatch_totals(events: u64, deliveries: u64, skips: u64, failures: u64) {
    gauge!("analytics_dispatch_events").set(events as f64);
    gauge!("analytics_dispatch_deliveries").set(deliveries as f64);
    gauge!("analytics_dispatch_skips").set(skips as f64);
    gauge!("analytics_dispatch_failures").set(failures as f64);
}

/// Per-provider delivery outcome counts
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderStats {
    pub delivered: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Delivery statistics aggregator
///
/// Aggregates dispatch outcomes in memory for summary output, independent of
/// the Prometheus exporter.
#[derive(Debug, Clone, Default)]
pub struct DeliveryStatsAggregator {
    /// Total events logged
    total_events: u64,
    /// Outcome counts per provider id
    provider_stats: HashMap<String, ProviderStats>,
}

impl DeliveryStatsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one logged event
    pub fn event_logged(&mut self) {
        self.total_events += 1;
    }

    /// Record a delivery outcome for a provider
    pub fn delivery(&mut self, provider_id: &str, success: bool) {
        let stats = self.provider_stats.entry(provider_id.to_string()).or_default();
        if success {
            stats.delivered += 1;
        } else {
            stats.failed += 1;
        }
    }

    /// Record a skip for a provider
    pub fn skipped(&mut self, provider_id: &str) {
        self.provider_stats
            .entry(provider_id.to_string())
            .or_default()
            .skipped += 1;
    }

    /// Generate a summary report
    pub fn summary(&self) -> DeliverySummary {
        let total_delivered: u64 = self.provider_stats.values().map(|s| s.delivered).sum();
        let total_failed: u64 = self.provider_stats.values().map(|s| s.failed).sum();

        DeliverySummary {
            total_events: self.total_events,
            total_delivered,
            total_failed,
            failure_rate: if total_delivered + total_failed > 0 {
                total_failed as f64 / (total_delivered + total_failed) as f64 * 100.0
            } else {
                0.0
            },
            provider_stats: self.provider_stats.clone(),
        }
    }

    /// Reset all counts
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Delivery summary
#[derive(Debug, Clone, Default)]
pub struct DeliverySummary {
    pub total_events: u64,
    pub total_delivered: u64,
    pub total_failed: u64,
    pub failure_rate: f64,
    pub provider_stats: HashMap<String, ProviderStats>,
}

impl std::fmt::Display for DeliverySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Delivery Summary ===")?;
        writeln!(f, "Events logged: {}", self.total_events)?;
        writeln!(f, "Deliveries: {}", self.total_delivered)?;
        writeln!(
            f,
            "Failures: {} ({:.2}%)",
            self.total_failed, self.failure_rate
        )?;

        if !self.provider_stats.is_empty() {
            writeln!(f, "Per provider:")?;
            let mut ids: Vec<_> = self.provider_stats.keys().collect();
            ids.sort();
            for id in ids {
                let stats = &self.provider_stats[id];
                writeln!(
                    f,
                    "  {}: delivered={}, skipped={}, failed={}",
                    id, stats.delivered, stats.skipped, stats.failed
                )?;
            }
        }

        Ok(())
    }
}

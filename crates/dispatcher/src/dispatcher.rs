//! Analytics dispatcher - per-event fan-out to registered providers

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{error, instrument, trace};

use contracts::{
    AnalyticsEvent, AnalyticsProvider, ProviderConfig, ProviderKind, validate_provider_configs,
};

use crate::error::DispatcherError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::providers::{JsonFileProvider, LogProvider, MemoryProvider};

/// Shared provider handle as stored in the registry
pub type ProviderHandle = Arc<dyn AnalyticsProvider>;

/// Create a provider from configuration
#[instrument(
    name = "dispatcher_create_provider",
    skip(config),
    fields(provider = %config.id, kind = ?config.kind)
)]
pub fn create_provider(config: &ProviderConfig) -> Result<ProviderHandle, DispatcherError> {
    match config.kind {
        ProviderKind::Log => Ok(Arc::new(
            LogProvider::new(&config.id).with_manual_only(config.manual_only),
        )),
        ProviderKind::Memory => Ok(Arc::new(
            MemoryProvider::new(&config.id).with_manual_only(config.manual_only),
        )),
        ProviderKind::JsonFile => {
            let provider = JsonFileProvider::from_params(&config.id, &config.params)
                .map_err(|e| DispatcherError::provider_creation(&config.id, e.to_string()))?;
            Ok(Arc::new(provider.with_manual_only(config.manual_only)))
        }
    }
}

/// The Analytics dispatcher that fans events out to providers
///
/// Bound to one event type per instance. Holds an ordered, append-only
/// registry of providers; delivery follows registration order. `register`
/// and `log` are plain synchronous calls with no internal locking, so a
/// concurrent host must wrap the dispatcher itself.
pub struct Analytics<E: AnalyticsEvent> {
    providers: Vec<ProviderHandle>,
    metrics: Arc<DispatchMetrics>,
    _event: PhantomData<fn(&E)>,
}

impl<E: AnalyticsEvent> Default for Analytics<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: AnalyticsEvent> Analytics<E> {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            metrics: Arc::new(DispatchMetrics::new()),
            _event: PhantomData,
        }
    }

    /// Create a dispatcher with built-in providers from configuration
    pub fn from_configs(configs: &[ProviderConfig]) -> Result<Self, DispatcherError> {
        validate_provider_configs(configs)?;

        let mut analytics = Self::new();
        for config in configs {
            analytics.register(create_provider(config)?);
        }
        Ok(analytics)
    }

    /// Append a provider to the registry
    ///
    /// No validation and no dedup: registering the same provider (or another
    /// provider with the same id) twice yields two delivery targets.
    pub fn register(&mut self, provider: ProviderHandle) {
        trace!(provider = provider.id(), "Provider registered");
        self.providers.push(provider);
    }

    /// Registered providers, in registration order
    pub fn providers(&self) -> &[ProviderHandle] {
        &self.providers
    }

    /// Get current metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Log an event
    ///
    /// Computes the eligible provider subset, then delivers. Never fails:
    /// routing no-ops (absent name, empty manual list) are valid data, and
    /// provider delivery errors are contained per provider.
    #[instrument(
        name = "analytics_log",
        skip(self, event),
        fields(registered = self.providers.len())
    )]
    pub fn log(&self, event: &E) {
        self.metrics.inc_event_count();
        let targets = self.route(event);
        self.log_to(event, &targets);
    }

    /// Deliver an event to an explicit provider list
    ///
    /// Runs the per-provider rendering loop with no candidate filtering;
    /// `log` is built on top of this. Public so callers can target a
    /// provider subset they assembled themselves.
    pub fn log_to(&self, event: &E, providers: &[ProviderHandle]) {
        for provider in providers {
            let Some(event_name) = event.name(provider.as_ref()) else {
                // The event opted out of reporting to this provider.
                self.metrics.inc_skip_count();
                trace!(provider = provider.id(), "Event declined to report");
                continue;
            };

            let parameters = event.parameters(provider.as_ref());
            match provider.log(&event_name, parameters.as_ref()) {
                Ok(()) => self.metrics.inc_delivery_count(),
                Err(e) => {
                    self.metrics.inc_failure_count();
                    error!(
                        provider = provider.id(),
                        event = %event_name,
                        error = %e,
                        "Delivery failed"
                    );
                    // Continue with remaining providers - delivery is
                    // fire-and-forget per provider.
                }
            }
        }
    }

    /// Candidate provider set for an event
    ///
    /// A present manual list replaces default routing entirely, bypassing
    /// both exclusion and manual-only filtering. Manual ids resolve against
    /// the registry by string equality, first match per id; unresolved ids
    /// drop out silently. An empty manual list therefore routes to nobody.
    fn route(&self, event: &E) -> Vec<ProviderHandle> {
        if let Some(manual) = event.manual_providers() {
            return manual
                .iter()
                .filter_map(|id| self.find_provider(id.as_str()))
                .collect();
        }

        self.providers
            .iter()
            .filter(|provider| {
                let excluded = event
                    .excluded_providers()
                    .iter()
                    .any(|id| id.as_str() == provider.id());
                !excluded && !provider.manual_only()
            })
            .cloned()
            .collect()
    }

    fn find_provider(&self, id: &str) -> Option<ProviderHandle> {
        self.providers.iter().find(|p| p.id() == id).cloned()
    }
}

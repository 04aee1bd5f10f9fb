//! Analytics Dispatch Demo
//!
//! Wires built-in providers plus a custom backend through the Analytics
//! dispatcher and exercises every routing path: default broadcast,
//! per-provider renaming, exclusion, opt-out by name, and manual targeting.
//!
//! Run with: cargo run -p demo_pipeline

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use anyhow::Result;
use contracts::{
    AnalyticsEvent, AnalyticsProvider, ContractError, EventParams, ProviderConfig, ProviderId,
    ProviderKind,
};
use dispatcher::{Analytics, MemoryProvider};
use observability::{LogFormat, ObservabilityConfig, record_delivery, record_event_logged};
use serde_json::json;

/// Targets for audit checkpoints; the audit provider is manual-only.
static AUDIT_TARGETS: LazyLock<Vec<ProviderId>> =
    LazyLock::new(|| vec![ProviderId::from("audit")]);

/// Screen views stay out of the on-disk archive.
static SCREEN_VIEW_EXCLUDED: LazyLock<Vec<ProviderId>> =
    LazyLock::new(|| vec![ProviderId::from("archive")]);

/// Demo app events
enum AppEvent {
    Purchase { amount_usd: f64 },
    ScreenView { screen: &'static str },
    AuditCheckpoint { note: &'static str },
}

impl AnalyticsEvent for AppEvent {
    fn name(&self, provider: &dyn AnalyticsProvider) -> Option<String> {
        match self {
            AppEvent::Purchase { .. } => match provider.id() {
                // The console backend uses its own naming scheme.
                "console" => Some("app.purchase".to_string()),
                _ => Some("purchase".to_string()),
            },
            AppEvent::ScreenView { .. } => Some("screen_view".to_string()),
            AppEvent::AuditCheckpoint { .. } => Some("audit_checkpoint".to_string()),
        }
    }

    fn parameters(&self, _provider: &dyn AnalyticsProvider) -> Option<EventParams> {
        let mut params = HashMap::new();
        match self {
            AppEvent::Purchase { amount_usd } => {
                params.insert("amount_usd".to_string(), json!(amount_usd));
            }
            AppEvent::ScreenView { screen } => {
                params.insert("screen".to_string(), json!(screen));
            }
            AppEvent::AuditCheckpoint { note } => {
                params.insert("note".to_string(), json!(note));
            }
        }
        Some(params)
    }

    fn excluded_providers(&self) -> &[ProviderId] {
        match self {
            AppEvent::ScreenView { .. } => &SCREEN_VIEW_EXCLUDED,
            _ => &[],
        }
    }

    fn manual_providers(&self) -> Option<&[ProviderId]> {
        match self {
            AppEvent::AuditCheckpoint { .. } => Some(&AUDIT_TARGETS),
            _ => None,
        }
    }
}

/// Custom backend: a stand-in for a real transport, recording its own
/// delivery outcome metrics the way an external provider would.
struct StdoutProvider {
    id: String,
}

impl AnalyticsProvider for StdoutProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn log(&self, event_name: &str, parameters: Option<&EventParams>) -> Result<(), ContractError> {
        println!(
            "[{}] {} {}",
            self.id,
            event_name,
            parameters
                .map(|p| serde_json::to_string(p).unwrap_or_default())
                .unwrap_or_default()
        );
        record_delivery(&self.id, true);
        Ok(())
    }
}

fn main() -> Result<()> {
    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Pretty,
        metrics_port: None,
        default_log_level: "info".to_string(),
    })?;

    tracing::info!("Starting analytics dispatch demo");

    // ==== Stage 1: Build providers ====
    let mut file_params = HashMap::new();
    file_params.insert("path".to_string(), "./demo-output/events.jsonl".to_string());

    let configs = vec![
        ProviderConfig {
            id: "console".to_string(),
            kind: ProviderKind::Log,
            manual_only: false,
            params: HashMap::new(),
        },
        ProviderConfig {
            id: "archive".to_string(),
            kind: ProviderKind::JsonFile,
            manual_only: false,
            params: file_params,
        },
    ];

    let mut analytics = Analytics::<AppEvent>::from_configs(&configs)?;

    let audit = Arc::new(MemoryProvider::new("audit").with_manual_only(true));
    analytics.register(audit.clone());
    analytics.register(Arc::new(StdoutProvider {
        id: "stdout".to_string(),
    }));

    tracing::info!(providers = analytics.providers().len(), "Registry ready");

    // ==== Stage 2: Log events through every routing path ====
    let events = [
        AppEvent::Purchase { amount_usd: 9.99 },
        AppEvent::ScreenView { screen: "home" },
        AppEvent::Purchase { amount_usd: 129.0 },
        AppEvent::AuditCheckpoint {
            note: "daily reconciliation",
        },
    ];

    for event in &events {
        analytics.log(event);
        record_event_logged();
    }

    // ==== Stage 3: Report ====
    let snapshot = analytics.metrics();
    observability::record_dispatch_totals(
        snapshot.event_count,
        snapshot.delivery_count,
        snapshot.skip_count,
        snapshot.failure_count,
    );

    tracing::info!(
        events = snapshot.event_count,
        deliveries = snapshot.delivery_count,
        skips = snapshot.skip_count,
        failures = snapshot.failure_count,
        "Dispatch complete"
    );

    let audit_events = audit.take_events();
    tracing::info!(
        recorded = audit_events.len(),
        "Audit provider received manual-targeted events only"
    );
    for event in &audit_events {
        tracing::info!(event = %event.name, "Audit record");
    }

    Ok(())
}

//! # Integration Tests
//!
//! Cross-crate scenarios for the analytics dispatch pipeline:
//! - contract surface checks
//! - end-to-end routing through real providers
//! - delivery summaries from recorded outcomes

#[cfg(test)]
mod contract_tests {
    use contracts::{ContractError, ProviderId};

    #[test]
    fn test_contracts_surface() {
        let id: ProviderId = "fb".into();
        assert_eq!(id, "fb");

        let err = ContractError::delivery("fb", "backend unavailable");
        assert!(err.to_string().contains("fb"));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use contracts::{
        AnalyticsEvent, AnalyticsProvider, ContractError, EventParams, ProviderConfig,
        ProviderId, ProviderKind,
    };
    use dispatcher::{Analytics, MemoryProvider};
    use serde_json::json;

    /// Checkout funnel event rendered differently per backend
    struct CheckoutEvent {
        step: &'static str,
        amount_usd: f64,
        excluded: Vec<ProviderId>,
        manual: Option<Vec<ProviderId>>,
    }

    impl CheckoutEvent {
        fn new(step: &'static str, amount_usd: f64) -> Self {
            Self {
                step,
                amount_usd,
                excluded: Vec::new(),
                manual: None,
            }
        }

        fn excluding(mut self, ids: &[&str]) -> Self {
            self.excluded = ids.iter().map(|id| ProviderId::from(*id)).collect();
            self
        }

        fn targeting(mut self, ids: &[&str]) -> Self {
            self.manual = Some(ids.iter().map(|id| ProviderId::from(*id)).collect());
            self
        }
    }

    impl AnalyticsEvent for CheckoutEvent {
        fn name(&self, provider: &dyn AnalyticsProvider) -> Option<String> {
            match provider.id() {
                // Facebook wants its own event naming scheme.
                "fb" => Some(format!("fb_mobile_checkout_{}", self.step)),
                // The crash reporter gets no checkout events at all.
                "crash" => None,
                _ => Some(format!("checkout_{}", self.step)),
            }
        }

        fn parameters(&self, provider: &dyn AnalyticsProvider) -> Option<EventParams> {
            let mut params = HashMap::new();
            match provider.id() {
                "fb" => {
                    params.insert("_valueToSum".to_string(), json!(self.amount_usd));
                    params.insert("fb_currency".to_string(), json!("USD"));
                }
                _ => {
                    params.insert("amount_usd".to_string(), json!(self.amount_usd));
                }
            }
            Some(params)
        }

        fn excluded_providers(&self) -> &[ProviderId] {
            &self.excluded
        }

        fn manual_providers(&self) -> Option<&[ProviderId]> {
            self.manual.as_deref()
        }
    }

    fn build_analytics() -> (
        Analytics<CheckoutEvent>,
        Arc<MemoryProvider>,
        Arc<MemoryProvider>,
        Arc<MemoryProvider>,
    ) {
        let fb = Arc::new(MemoryProvider::new("fb"));
        let crash = Arc::new(MemoryProvider::new("crash"));
        let audit = Arc::new(MemoryProvider::new("audit").with_manual_only(true));

        let mut analytics = Analytics::new();
        analytics.register(fb.clone());
        analytics.register(crash.clone());
        analytics.register(audit.clone());

        (analytics, fb, crash, audit)
    }

    #[test]
    fn test_e2e_default_routing_with_per_provider_rendering() {
        let (analytics, fb, crash, audit) = build_analytics();

        analytics.log(&CheckoutEvent::new("complete", 9.99));

        // fb gets its renamed event with the backend-specific parameter shape.
        let fb_events = fb.take_events();
        assert_eq!(fb_events.len(), 1);
        assert_eq!(fb_events[0].name, "fb_mobile_checkout_complete");
        assert_eq!(
            fb_events[0].parameters.as_ref().unwrap().get("_valueToSum"),
            Some(&json!(9.99))
        );

        // crash declined via absent name; audit is manual-only.
        assert_eq!(crash.recorded_count(), 0);
        assert_eq!(audit.recorded_count(), 0);

        let snapshot = analytics.metrics();
        assert_eq!(snapshot.event_count, 1);
        assert_eq!(snapshot.delivery_count, 1);
        assert_eq!(snapshot.skip_count, 1);
    }

    #[test]
    fn test_e2e_exclusion_leaves_other_providers_eligible() {
        let (analytics, fb, crash, _audit) = build_analytics();

        analytics.log(&CheckoutEvent::new("start", 0.0).excluding(&["fb"]));

        assert_eq!(fb.recorded_count(), 0);
        // crash was eligible but still declines by name.
        assert_eq!(crash.recorded_count(), 0);
    }

    #[test]
    fn test_e2e_manual_targeting_reaches_audit_only() {
        let (analytics, fb, crash, audit) = build_analytics();

        analytics.log(&CheckoutEvent::new("complete", 129.0).targeting(&["audit"]));

        assert_eq!(fb.recorded_count(), 0);
        assert_eq!(crash.recorded_count(), 0);
        let audit_events = audit.take_events();
        assert_eq!(audit_events.len(), 1);
        assert_eq!(audit_events[0].name, "checkout_complete");
    }

    #[test]
    fn test_e2e_empty_manual_list_is_a_no_op() {
        let (analytics, fb, crash, audit) = build_analytics();

        analytics.log(&CheckoutEvent::new("complete", 1.0).targeting(&[]));

        assert_eq!(fb.recorded_count(), 0);
        assert_eq!(crash.recorded_count(), 0);
        assert_eq!(audit.recorded_count(), 0);
        assert_eq!(analytics.metrics().delivery_count, 0);
    }

    #[test]
    fn test_e2e_factory_pipeline_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut params = HashMap::new();
        params.insert("path".to_string(), path.display().to_string());

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
                params,
            },
        ];

        let analytics = Analytics::<CheckoutEvent>::from_configs(&configs).unwrap();
        analytics.log(&CheckoutEvent::new("complete", 42.0));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);

        let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record["event"], "checkout_complete");
        assert_eq!(record["parameters"]["amount_usd"], json!(42.0));

        assert_eq!(analytics.metrics().delivery_count, 2);
    }

    /// Provider that fails every delivery, for containment checks
    struct OutageProvider;

    impl AnalyticsProvider for OutageProvider {
        fn id(&self) -> &str {
            "outage"
        }

        fn log(
            &self,
            _event_name: &str,
            _parameters: Option<&EventParams>,
        ) -> Result<(), ContractError> {
            Err(ContractError::delivery("outage", "connection refused"))
        }
    }

    #[test]
    fn test_e2e_failing_backend_does_not_block_the_rest() {
        let fb = Arc::new(MemoryProvider::new("fb"));

        let mut analytics = Analytics::<CheckoutEvent>::new();
        analytics.register(Arc::new(OutageProvider));
        analytics.register(fb.clone());

        for _ in 0..3 {
            analytics.log(&CheckoutEvent::new("complete", 5.0));
        }

        assert_eq!(fb.recorded_count(), 3);
        let snapshot = analytics.metrics();
        assert_eq!(snapshot.failure_count, 3);
        assert_eq!(snapshot.delivery_count, 3);
    }
}

#[cfg(test)]
mod summary_tests {
    use std::sync::Arc;

    use contracts::{AnalyticsEvent, AnalyticsProvider};
    use dispatcher::{Analytics, MemoryProvider};
    use observability::DeliveryStatsAggregator;

    struct Heartbeat;

    impl AnalyticsEvent for Heartbeat {
        fn name(&self, _provider: &dyn AnalyticsProvider) -> Option<String> {
            Some("heartbeat".to_string())
        }
    }

    #[test]
    fn test_summary_from_recorded_outcomes() {
        let fb = Arc::new(MemoryProvider::new("fb"));
        let amp = Arc::new(MemoryProvider::new("amp"));

        let mut analytics = Analytics::<Heartbeat>::new();
        analytics.register(fb.clone());
        analytics.register(amp.clone());

        for _ in 0..5 {
            analytics.log(&Heartbeat);
        }

        let mut aggregator = DeliveryStatsAggregator::new();
        for _ in 0..analytics.metrics().event_count {
            aggregator.event_logged();
        }
        for provider in [&fb, &amp] {
            for _ in 0..provider.recorded_count() {
                aggregator.delivery(provider.id(), true);
            }
        }

        let summary = aggregator.summary();
        assert_eq!(summary.total_events, 5);
        assert_eq!(summary.total_delivered, 10);
        assert_eq!(summary.total_failed, 0);

        let rendered = format!("{summary}");
        assert!(rendered.contains("fb: delivered=5"));
        assert!(rendered.contains("amp: delivered=5"));
    }
}

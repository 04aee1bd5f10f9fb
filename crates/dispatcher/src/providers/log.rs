//! LogProvider - emits accepted events via tracing

use contracts::{AnalyticsProvider, ContractError, EventParams};
use tracing::info;

/// Provider that logs accepted events for debugging
pub struct LogProvider {
    id: String,
    manual_only: bool,
}

impl LogProvider {
    /// Create a new LogProvider with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            manual_only: false,
        }
    }

    /// Make this provider reachable only via explicit targeting
    pub fn with_manual_only(mut self, manual_only: bool) -> Self {
        self.manual_only = manual_only;
        self
    }
}

impl AnalyticsProvider for LogProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn manual_only(&self) -> bool {
        self.manual_only
    }

    fn log(&self, event_name: &str, parameters: Option<&EventParams>) -> Result<(), ContractError> {
        info!(
            provider = %self.id,
            event = event_name,
            params = parameters.map_or(0, |p| p.len()),
            "Event received"
        );
        Ok(())
    }
}

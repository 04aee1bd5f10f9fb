//! MemoryProvider - records accepted events for inspection
//!
//! Primary test double; also handy as a debugging tap on a live dispatcher.

use std::sync::Mutex;

use contracts::{AnalyticsProvider, ContractError, EventParams};
use serde::Serialize;

/// One accepted (name, parameters) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedEvent {
    pub name: String,
    pub parameters: Option<EventParams>,
}

/// Provider that accumulates accepted events in memory
pub struct MemoryProvider {
    id: String,
    manual_only: bool,
    events: Mutex<Vec<RecordedEvent>>,
}

impl MemoryProvider {
    /// Create a new MemoryProvider with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            manual_only: false,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Make this provider reachable only via explicit targeting
    pub fn with_manual_only(mut self, manual_only: bool) -> Self {
        self.manual_only = manual_only;
        self
    }

    /// Take all accumulated events, leaving the internal buffer empty
    pub fn take_events(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.lock_events())
    }

    /// Number of currently recorded events
    pub fn recorded_count(&self) -> usize {
        self.lock_events().len()
    }

    /// Names of recorded events, in acceptance order
    pub fn recorded_names(&self) -> Vec<String> {
        self.lock_events().iter().map(|e| e.name.clone()).collect()
    }

    fn lock_events(&self) -> std::sync::MutexGuard<'_, Vec<RecordedEvent>> {
        // A poisoned lock still holds valid recording state.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AnalyticsProvider for MemoryProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn manual_only(&self) -> bool {
        self.manual_only
    }

    fn log(&self, event_name: &str, parameters: Option<&EventParams>) -> Result<(), ContractError> {
        self.lock_events().push(RecordedEvent {
            name: event_name.to_string(),
            parameters: parameters.cloned(),
        });
        Ok(())
    }
}

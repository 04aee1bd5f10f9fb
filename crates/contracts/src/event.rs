//! AnalyticsEvent trait - Per-provider event rendering
//!
//! An event renders itself differently for every provider it reaches: the
//! name, the parameter bag, and even whether it reports at all are decided
//! per provider.

use std::collections::HashMap;

use serde_json::Value;

use crate::{AnalyticsProvider, ProviderId};

/// Parameter bag attached to a rendered event.
///
/// Values are open-ended JSON so concrete events can carry whatever shape a
/// backend expects.
pub type EventParams = HashMap<String, Value>;

/// Loggable event trait
///
/// One instance per logged occurrence; events are constructed, handed to the
/// dispatcher, and discarded. The routing-hint methods come with defaults so
/// a plain broadcast event only has to implement [`AnalyticsEvent::name`].
pub trait AnalyticsEvent {
    /// Report name for the given provider
    ///
    /// `None` means this event does not report to this provider at all, even
    /// when the provider is otherwise eligible. Not an error.
    fn name(&self, provider: &dyn AnalyticsProvider) -> Option<String>;

    /// Parameters for the given provider
    ///
    /// Only meaningful alongside a non-absent name.
    fn parameters(&self, _provider: &dyn AnalyticsProvider) -> Option<EventParams> {
        None
    }

    /// Providers that default routing must never deliver this event to
    fn excluded_providers(&self) -> &[ProviderId] {
        &[]
    }

    /// Explicit target list that replaces default routing when present
    ///
    /// `Some(&[])` means "deliver to nobody" and is distinct from `None`
    /// ("no override, use default routing").
    fn manual_providers(&self) -> Option<&[ProviderId]> {
        None
    }
}

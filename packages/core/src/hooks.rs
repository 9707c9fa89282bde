// ABOUTME: In-process event bus standing in for the host's filter system
// ABOUTME: Named events carry a JSON value through every subscribed filter in order

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A callback subscribed to a named event.
///
/// Filters receive the current value and return the (possibly modified) value
/// handed to the next subscriber. They cannot fail; a filter that is unable to
/// do its work returns its input unchanged.
#[async_trait]
pub trait Filter: Send + Sync {
    async fn apply(&self, value: Value) -> Value;
}

/// Registry of filters keyed by event name
#[derive(Clone, Default)]
pub struct EventBus {
    filters: Arc<RwLock<HashMap<String, Vec<Arc<dyn Filter>>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a filter to an event. Filters run in subscription order.
    pub fn subscribe(&self, event: &str, filter: Arc<dyn Filter>) {
        let mut filters = match self.filters.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        filters.entry(event.to_string()).or_default().push(filter);
        debug!(event = %event, "Filter subscribed");
    }

    /// Run `value` through every filter subscribed to `event`.
    ///
    /// Events without subscribers return the value untouched.
    pub async fn publish(&self, event: &str, value: Value) -> Value {
        // Snapshot so no lock is held across an await
        let chain: Vec<Arc<dyn Filter>> = {
            let filters = match self.filters.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            filters.get(event).cloned().unwrap_or_default()
        };

        let mut value = value;
        for filter in chain {
            value = filter.apply(value).await;
        }
        value
    }

    /// Whether at least one filter is subscribed to `event`
    pub fn has_subscribers(&self, event: &str) -> bool {
        self.subscriber_count(event) > 0
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        let filters = match self.filters.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        filters.get(event).map(Vec::len).unwrap_or(0)
    }
}

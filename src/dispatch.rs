//! Broadcast dispatcher
//!
//! Bridges the ingestion path and the subscriber registry: builds the
//! canonical record for an incoming reading, encodes it once, and fans it
//! out to every registered subscriber.

use std::sync::Arc;

use crate::record::{CanonicalRecord, Reading, RecordBuilder, RecordError};
use crate::registry::{RecordFrame, SubscriberRegistry};

/// Receives readings and pushes them to all current subscribers
///
/// Delivery is synchronous best-effort: no queueing, no retries, and a
/// reading that arrives while no subscribers are registered is simply not
/// streamed (it is still persisted by the caller).
pub struct Dispatcher {
    registry: Arc<SubscriberRegistry>,
    builder: RecordBuilder,
}

impl Dispatcher {
    /// Create a dispatcher over the given registry
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self {
            registry,
            builder: RecordBuilder::new(),
        }
    }

    /// Build the canonical record for a reading and broadcast it
    ///
    /// Returns the record so the caller can hand it to the durable log.
    /// Per-subscriber delivery failures are contained inside the registry
    /// and never surface here.
    pub fn dispatch(&self, reading: &Reading) -> Result<CanonicalRecord, RecordError> {
        let record = self.builder.build(reading)?;
        let frame = RecordFrame::encode(&record)?;

        let delivered = self.registry.broadcast(frame);

        tracing::debug!(
            record_id = record.id,
            sensor = %record.sensor,
            delivered = delivered,
            "Record dispatched"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reading(value: serde_json::Value) -> Reading {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_delivers_canonical_record() {
        let registry = Arc::new(SubscriberRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));
        let (_guard, mut rx) = registry.register();

        let record = dispatcher
            .dispatch(&reading(json!({"sensor": "temp1", "value": 22.5})))
            .unwrap();

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame.record_id, record.id);

        let pushed: CanonicalRecord = serde_json::from_slice(&frame.payload).unwrap();
        assert_eq!(pushed.sensor, "temp1");
        assert_eq!(pushed.value, json!(22.5));
        assert_eq!(pushed.id, record.id);
        assert_eq!(pushed.timestamp, record.timestamp);
    }

    #[tokio::test]
    async fn test_dispatch_without_subscribers_succeeds() {
        let registry = Arc::new(SubscriberRegistry::new());
        let dispatcher = Dispatcher::new(registry);

        let record = dispatcher
            .dispatch(&reading(json!({"humidity": 55})))
            .unwrap();

        assert_eq!(record.sensor, "humidity");
    }

    #[tokio::test]
    async fn test_dispatch_empty_reading_fails() {
        let registry = Arc::new(SubscriberRegistry::new());
        let dispatcher = Dispatcher::new(registry);

        let result = dispatcher.dispatch(&Reading::new());
        assert!(matches!(result, Err(RecordError::EmptyReading)));
    }

    #[tokio::test]
    async fn test_sequential_dispatch_preserves_order() {
        let registry = Arc::new(SubscriberRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));
        let (_guard, mut rx) = registry.register();

        let r1 = dispatcher
            .dispatch(&reading(json!({"sensor": "a", "value": 1})))
            .unwrap();
        let r2 = dispatcher
            .dispatch(&reading(json!({"sensor": "b", "value": 2})))
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().record_id, r1.id);
        assert_eq!(rx.recv().await.unwrap().record_id, r2.id);
    }
}

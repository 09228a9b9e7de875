//! Subscriber registry implementation
//!
//! The central registry that owns all active subscriber entries and fans
//! incoming records out to them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;

use super::entry::{SubscriberEntry, SubscriberId};
use super::frame::RecordFrame;

/// Central registry for all active subscribers
///
/// Guarded by a `std::sync::RwLock`: every operation is synchronous (sends
/// on unbounded channels never block), so broadcasting to one subscriber
/// never waits on another connection's registration or teardown.
pub struct SubscriberRegistry {
    /// Map of subscriber id to entry
    subscribers: RwLock<HashMap<SubscriberId, SubscriberEntry>>,

    /// Next subscriber id to hand out
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new subscriber
    ///
    /// Returns a guard that deregisters the subscriber when dropped, and
    /// the receiver half of its delivery channel. A reconnecting client is
    /// simply a second independent entry.
    pub fn register(
        self: &Arc<Self>,
    ) -> (SubscriberGuard, mpsc::UnboundedReceiver<RecordFrame>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let mut subscribers = self.write_lock();
        subscribers.insert(id, SubscriberEntry::new(tx));

        tracing::info!(
            subscriber_id = id,
            subscribers = subscribers.len(),
            "Subscriber registered"
        );

        (
            SubscriberGuard {
                id,
                registry: Arc::clone(self),
            },
            rx,
        )
    }

    /// Deregister a subscriber
    ///
    /// Idempotent: removing an already-removed or never-registered id is a
    /// no-op. Once removal completes the entry can no longer be invoked.
    pub fn deregister(&self, id: SubscriberId) {
        let mut subscribers = self.write_lock();

        if subscribers.remove(&id).is_some() {
            tracing::info!(
                subscriber_id = id,
                subscribers = subscribers.len(),
                "Subscriber deregistered"
            );
        }
    }

    /// Broadcast a frame to every registered subscriber
    ///
    /// Delivery is best-effort: a failed send (connection already closed)
    /// is isolated from the remaining subscribers, and the dead entry is
    /// pruned in the same sweep. Returns the number of subscribers the
    /// frame was delivered to.
    pub fn broadcast(&self, frame: RecordFrame) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        {
            let subscribers = self.read_lock();
            for (id, entry) in subscribers.iter() {
                if entry.send(frame.clone()) {
                    delivered += 1;
                } else {
                    dead.push(*id);
                }
            }
        }

        if !dead.is_empty() {
            let mut subscribers = self.write_lock();
            for id in &dead {
                subscribers.remove(id);
            }
            tracing::debug!(
                pruned = dead.len(),
                subscribers = subscribers.len(),
                "Pruned closed subscribers during broadcast"
            );
        }

        delivered
    }

    /// Get the number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.read_lock().len()
    }

    /// Check whether any subscribers are registered
    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    // Lock poisoning only happens if a holder panicked; the map itself is
    // always left consistent, so recover by taking the inner value.
    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, HashMap<SubscriberId, SubscriberEntry>> {
        self.subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lock(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<SubscriberId, SubscriberEntry>> {
        self.subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregisters its subscriber when dropped
///
/// Held by the connection task for the lifetime of the subscription, so
/// client disconnects and transport errors both collapse into the same
/// teardown path.
pub struct SubscriberGuard {
    id: SubscriberId,
    registry: Arc<SubscriberRegistry>,
}

impl SubscriberGuard {
    /// Get the subscriber id
    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.registry.deregister(self.id);
    }
}

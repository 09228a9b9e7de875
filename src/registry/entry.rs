//! Subscriber entry types
//!
//! This module defines the per-subscriber state stored in the registry.

use std::time::Instant;

use tokio::sync::mpsc;

use super::frame::RecordFrame;

/// Opaque identity of one registered subscriber connection
pub type SubscriberId = u64;

/// Entry for a single subscriber in the registry
///
/// Owned exclusively by the registry while the connection is open. The
/// receiver half lives with the connection task that drains frames to the
/// transport.
pub struct SubscriberEntry {
    /// Sender half of the subscriber's delivery channel
    pub(super) tx: mpsc::UnboundedSender<RecordFrame>,

    /// When the subscriber connected
    pub connected_at: Instant,
}

impl SubscriberEntry {
    /// Create a new entry around the sender half of a delivery channel
    pub(super) fn new(tx: mpsc::UnboundedSender<RecordFrame>) -> Self {
        Self {
            tx,
            connected_at: Instant::now(),
        }
    }

    /// Send a frame to this subscriber
    ///
    /// Returns `false` if the receiver half is gone, meaning the connection
    /// closed and the entry should be pruned.
    pub(super) fn send(&self, frame: RecordFrame) -> bool {
        self.tx.send(frame).is_ok()
    }
}

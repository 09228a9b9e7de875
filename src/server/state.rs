//! Application state
//!
//! Shared state for HTTP handlers: the subscriber registry, the dispatcher
//! that feeds it, and the durable storage collaborators. No hidden
//! process-wide singletons; everything is scoped to this state value.

use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::Dispatcher;
use crate::registry::SubscriberRegistry;
use crate::storage::{CsvLog, SnapshotStore};

use super::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registry of open push connections
    pub registry: Arc<SubscriberRegistry>,
    /// Broadcast dispatcher over the registry
    pub dispatcher: Arc<Dispatcher>,
    /// Append-only record log
    pub csv_log: Arc<CsvLog>,
    /// Latest-reading snapshot
    pub snapshot: Arc<SnapshotStore>,
    /// SSE keep-alive interval
    pub sse_keep_alive: Duration,
}

impl AppState {
    /// Create application state from a server configuration
    pub fn new(config: &ServerConfig) -> Self {
        let registry = Arc::new(SubscriberRegistry::new());

        Self {
            dispatcher: Arc::new(Dispatcher::new(Arc::clone(&registry))),
            registry,
            csv_log: Arc::new(CsvLog::new(config.csv_path())),
            snapshot: Arc::new(SnapshotStore::new(config.snapshot_path())),
            sse_keep_alive: config.sse_keep_alive,
        }
    }
}

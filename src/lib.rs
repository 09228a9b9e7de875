//! Real-time sensor reading relay
//!
//! Ingests discrete sensor readings over HTTP and fans them out live to any
//! number of Server-Sent Events subscribers, while appending each reading
//! to a durable CSV log.
//!
//! # Quick start
//!
//! ```no_run
//! use sensor_relay::server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let server = Server::new(ServerConfig::default());
//!     server.run().await
//! }
//! ```
//!
//! Readings are arbitrary JSON objects posted to `POST /api/data`; each one
//! is stamped with a server-assigned id and timestamp, pushed to every open
//! `GET /api/events` stream, and appended to the log. Delivery is
//! best-effort with automatic cleanup of disconnected subscribers.

pub mod dispatch;
pub mod record;
pub mod registry;
pub mod server;
pub mod storage;

pub use dispatch::Dispatcher;
pub use record::{CanonicalRecord, Reading, RecordBuilder};
pub use registry::SubscriberRegistry;
pub use server::{Server, ServerConfig};

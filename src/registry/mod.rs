//! Subscriber registry for live fan-out
//!
//! The registry tracks every open push connection and routes each incoming
//! record to all of them. Each subscriber gets its own unbounded mpsc
//! channel: the dispatcher sends into the channel, and the connection task
//! drains it to the transport.
//!
//! # Architecture
//!
//! ```text
//!                      Arc<SubscriberRegistry>
//!                 ┌──────────────────────────────┐
//!                 │ subscribers: HashMap<Id,     │
//!                 │   SubscriberEntry {          │
//!                 │     tx: mpsc::Sender,        │
//!                 │   }                          │
//!                 │ >                            │
//!                 └──────────────┬───────────────┘
//!                                │
//!        ┌───────────────────────┼───────────────────────┐
//!        │                       │                       │
//!        ▼                       ▼                       ▼
//!   [Dispatcher]           [Subscriber]            [Subscriber]
//!   broadcast()            rx.recv()               rx.recv()
//!        │                       │                       │
//!        └──► entry.send() ──► SSE frame ──────────► HTTP
//! ```
//!
//! A failed send means the receiver half is gone (the connection closed),
//! so the entry is pruned during the same broadcast sweep. Because the
//! channel is the only delivery path, "send or fail" is atomic: there is no
//! liveness check racing against the write.
//!
//! # Zero-Copy Design
//!
//! Each record is serialized once; `bytes::Bytes` reference counting lets
//! every subscriber share the same payload allocation.

pub mod entry;
pub mod frame;
pub mod store;

pub use entry::{SubscriberEntry, SubscriberId};
pub use frame::RecordFrame;
pub use store::{SubscriberGuard, SubscriberRegistry};

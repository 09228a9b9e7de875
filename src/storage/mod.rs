//! Durable storage collaborators
//!
//! The broadcast core treats persistence as an external concern: the CSV
//! log appends every canonical record, and the snapshot store keeps the
//! most recent raw reading. Failures here surface to the ingestion caller
//! but never touch already-delivered broadcasts.

pub mod csv;
pub mod error;
pub mod snapshot;

pub use csv::CsvLog;
pub use error::StorageError;
pub use snapshot::SnapshotStore;

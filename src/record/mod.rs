//! Reading normalization
//!
//! Incoming readings are schema-less JSON objects. This module turns them
//! into canonical records with a server-assigned id and timestamp before
//! they are broadcast or persisted.
//!
//! The `sensor` and `value` fields fall back to the first key/value of the
//! reading when no explicit fields are present. That fallback is only
//! well-defined because `Reading` preserves the insertion order of the
//! incoming JSON document (`serde_json` with `preserve_order`).

pub mod builder;
pub mod error;

pub use builder::{CanonicalRecord, Reading, RecordBuilder};
pub use error::RecordError;

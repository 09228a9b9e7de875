//! Canonical record construction
//!
//! The builder stamps each reading with a unique, monotonically increasing
//! id and an ISO-8601 timestamp. Both are server-assigned; clients cannot
//! supply them.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RecordError;

/// A raw sensor reading: an ordered mapping of field names to values
///
/// No schema is enforced at the boundary. Insertion order matters for the
/// first-key/first-value fallback in [`RecordBuilder::build`].
pub type Reading = serde_json::Map<String, Value>;

/// Normalized, server-stamped representation of a reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalRecord {
    /// Server-assigned unique id, monotonically increasing per process
    pub id: i64,
    /// Sensor name, from the explicit `sensor` field or the first key
    pub sensor: String,
    /// Reading value, from the explicit `value` field or the first value
    pub value: Value,
    /// ISO-8601 UTC timestamp, assigned at construction time
    pub timestamp: String,
}

/// Builds canonical records from raw readings
///
/// Ids are seeded from the wall clock in milliseconds and incremented per
/// record, so they stay unique across short process restarts as well.
pub struct RecordBuilder {
    next_id: AtomicI64,
}

impl RecordBuilder {
    /// Create a new builder with a timestamp-seeded id counter
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    /// Build a canonical record from a reading
    ///
    /// The input is not mutated. Returns an error for an empty reading,
    /// since there is nothing to derive a sensor name from.
    pub fn build(&self, reading: &Reading) -> Result<CanonicalRecord, RecordError> {
        let (first_key, first_value) = reading.iter().next().ok_or(RecordError::EmptyReading)?;

        let sensor = match reading.get("sensor") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => first_key.clone(),
        };

        let value = reading
            .get("value")
            .cloned()
            .unwrap_or_else(|| first_value.clone());

        Ok(CanonicalRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            sensor,
            value,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reading(value: Value) -> Reading {
        value.as_object().cloned().expect("test reading is an object")
    }

    #[test]
    fn test_explicit_fields() {
        let builder = RecordBuilder::new();
        let input = reading(json!({"sensor": "temp1", "value": 22.5}));

        let record = builder.build(&input).unwrap();

        assert_eq!(record.sensor, "temp1");
        assert_eq!(record.value, json!(22.5));
    }

    #[test]
    fn test_first_key_fallback() {
        let builder = RecordBuilder::new();
        let input = reading(json!({"humidity": 55}));

        let record = builder.build(&input).unwrap();

        assert_eq!(record.sensor, "humidity");
        assert_eq!(record.value, json!(55));
    }

    #[test]
    fn test_fallback_uses_insertion_order() {
        let builder = RecordBuilder::new();
        // "zeta" is first in document order even though it sorts last
        let input = reading(json!({"zeta": 1, "alpha": 2}));

        let record = builder.build(&input).unwrap();

        assert_eq!(record.sensor, "zeta");
        assert_eq!(record.value, json!(1));
    }

    #[test]
    fn test_non_string_sensor_field() {
        let builder = RecordBuilder::new();
        let input = reading(json!({"sensor": 7, "value": 1}));

        let record = builder.build(&input).unwrap();

        assert_eq!(record.sensor, "7");
    }

    #[test]
    fn test_ids_monotonic_and_unique() {
        let builder = RecordBuilder::new();
        let input = reading(json!({"sensor": "t", "value": 0}));

        let a = builder.build(&input).unwrap();
        let b = builder.build(&input).unwrap();
        let c = builder.build(&input).unwrap();

        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn test_input_not_mutated() {
        let builder = RecordBuilder::new();
        let input = reading(json!({"humidity": 55}));
        let before = input.clone();

        builder.build(&input).unwrap();

        assert_eq!(input, before);
    }

    #[test]
    fn test_empty_reading_rejected() {
        let builder = RecordBuilder::new();
        let input = Reading::new();

        let result = builder.build(&input);

        assert!(matches!(result, Err(RecordError::EmptyReading)));
    }

    #[test]
    fn test_timestamp_is_iso8601_utc() {
        let builder = RecordBuilder::new();
        let input = reading(json!({"sensor": "t", "value": 0}));

        let record = builder.build(&input).unwrap();

        assert!(record.timestamp.contains('T'));
        assert!(record.timestamp.ends_with('Z'));
    }
}

//! Broadcast frame type
//!
//! The unit of delivery from the dispatcher to each subscriber.

use bytes::Bytes;

use crate::record::{CanonicalRecord, RecordError};

/// A record ready for fan-out
///
/// The JSON payload is encoded once at dispatch time; cloning the frame for
/// each subscriber only bumps the `Bytes` reference count.
#[derive(Debug, Clone)]
pub struct RecordFrame {
    /// Id of the canonical record this frame carries
    pub record_id: i64,
    /// JSON-encoded canonical record
    pub payload: Bytes,
}

impl RecordFrame {
    /// Encode a canonical record into a broadcast frame
    pub fn encode(record: &CanonicalRecord) -> Result<Self, RecordError> {
        let payload = serde_json::to_vec(record).map_err(RecordError::Encode)?;

        Ok(Self {
            record_id: record.id,
            payload: Bytes::from(payload),
        })
    }

    /// View the payload as a string slice
    ///
    /// The payload is always valid UTF-8 since it is produced by the JSON
    /// encoder.
    pub fn payload_str(&self) -> &str {
        std::str::from_utf8(&self.payload).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_carries_record_fields() {
        let record = CanonicalRecord {
            id: 42,
            sensor: "temp1".into(),
            value: json!(22.5),
            timestamp: "2026-08-29T12:00:00.000Z".into(),
        };

        let frame = RecordFrame::encode(&record).unwrap();

        assert_eq!(frame.record_id, 42);
        let decoded: CanonicalRecord = serde_json::from_slice(&frame.payload).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_clone_shares_payload() {
        let record = CanonicalRecord {
            id: 1,
            sensor: "t".into(),
            value: json!(0),
            timestamp: "2026-08-29T12:00:00.000Z".into(),
        };

        let frame = RecordFrame::encode(&record).unwrap();
        let copy = frame.clone();

        // Same backing allocation, not a deep copy
        assert_eq!(frame.payload.as_ptr(), copy.payload.as_ptr());
    }
}

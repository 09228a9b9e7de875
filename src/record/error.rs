//! Record builder error types

/// Error type for record construction
#[derive(Debug)]
pub enum RecordError {
    /// The reading contained no fields at all
    EmptyReading,
    /// The canonical record could not be encoded to JSON
    Encode(serde_json::Error),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::EmptyReading => write!(f, "Reading has no fields"),
            RecordError::Encode(e) => write!(f, "Failed to encode record: {}", e),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

//! Append-only CSV log
//!
//! One row per canonical record, columns `ID,Sensor,Value,Timestamp`.
//! The header is written when the file is created. Appends are serialized
//! through a mutex so concurrent ingestion requests cannot interleave
//! partial lines.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::record::CanonicalRecord;

use super::error::StorageError;

const CSV_HEADER: &str = "ID,Sensor,Value,Timestamp\n";

/// Appends canonical records to a CSV file
pub struct CsvLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLog {
    /// Create a log writer for the given file path
    ///
    /// The file and its parent directory are created lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the log
    pub async fn append(&self, record: &CanonicalRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let is_new = fs::metadata(&self.path).await.is_err();

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;

        let mut line = String::new();
        if is_new {
            line.push_str(CSV_HEADER);
        }
        line.push_str(&format_row(record));

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(record_id = record.id, path = %self.path.display(), "Record appended");

        Ok(())
    }
}

fn format_row(record: &CanonicalRecord) -> String {
    format!(
        "{},{},{},{}\n",
        record.id,
        escape_field(&record.sensor),
        escape_field(&render_value(&record.value)),
        escape_field(&record.timestamp),
    )
}

/// Render a JSON value the way it should appear in a CSV cell
///
/// Strings lose their JSON quoting; everything else keeps its JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

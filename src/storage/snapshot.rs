//! Latest-reading snapshot
//!
//! Holds the most recent raw reading as pretty-printed JSON, overwritten on
//! every ingestion.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::record::Reading;

use super::error::StorageError;

/// Overwrites a JSON file with the most recent raw reading
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot with the given reading
    pub async fn save(&self, reading: &Reading) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(reading)?;
        fs::write(&self.path, json).await?;

        Ok(())
    }
}

//! Data source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Record;

/// Metadata about a loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Display name (file name, or sample dataset name).
    pub name: String,
    /// Full path to the file, if loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the raw input.
    pub hash: String,
    /// Input size in bytes.
    pub size_bytes: u64,
    /// Property the records were taken from, when nested in an object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_property: Option<String>,
    /// Number of records after normalization.
    pub record_count: usize,
    /// Number of fields in the first record.
    pub field_count: usize,
    /// When the dataset was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a freshly normalized dataset.
    pub fn new(name: impl Into<String>, hash: String, size_bytes: u64, records: &[Record]) -> Self {
        Self {
            name: name.into(),
            path: None,
            hash,
            size_bytes,
            root_property: None,
            record_count: records.len(),
            field_count: records.first().map(|r| r.len()).unwrap_or(0),
            loaded_at: Utc::now(),
        }
    }

    /// Attach the on-disk path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Attach the property the records were taken from.
    pub fn with_root_property(mut self, property: Option<String>) -> Self {
        self.root_property = property;
        self
    }
}

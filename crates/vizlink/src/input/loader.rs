//! JSON loading: raw text or file contents to canonical records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Result, VizlinkError};
use crate::value::Record;

use super::normalize::{normalize_with, NormalizeConfig, RecordOrigin};
use super::source::SourceMetadata;

/// A normalized dataset and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub records: Vec<Record>,
    pub source: SourceMetadata,
}

/// Loads JSON datasets.
pub struct DataLoader {
    config: NormalizeConfig,
}

impl DataLoader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: NormalizeConfig::default(),
        }
    }

    /// Create a loader with custom normalization settings.
    pub fn with_config(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Load a JSON file from disk.
    ///
    /// The whole file is read before parsing; there is no partial-read handling.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedData> {
        let path = path.as_ref();

        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json {
            return Err(VizlinkError::Format(format!(
                "please supply a JSON file (got '{}')",
                path.display()
            )));
        }

        let mut file = File::open(path).map_err(|e| VizlinkError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| VizlinkError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut loaded = self.load_str_named(&contents, name)?;
        loaded.source = loaded.source.with_path(path.to_path_buf());
        Ok(loaded)
    }

    /// Load a dataset from JSON text.
    pub fn load_str(&self, text: &str) -> Result<LoadedData> {
        self.load_str_named(text, "inline")
    }

    /// Load a dataset from JSON text under a display name.
    pub fn load_str_named(&self, text: &str, name: impl Into<String>) -> Result<LoadedData> {
        let value: Value = serde_json::from_str(text).map_err(|e| VizlinkError::Parse {
            message: e.to_string(),
        })?;

        let hash = content_hash(text.as_bytes());
        self.load_value_with_hash(&value, name, hash, text.len() as u64)
    }

    /// Load a dataset from an already parsed JSON value.
    pub fn load_value(&self, value: &Value, name: impl Into<String>) -> Result<LoadedData> {
        let bytes = serde_json::to_vec(value)?;
        let hash = content_hash(&bytes);
        self.load_value_with_hash(value, name, hash, bytes.len() as u64)
    }

    fn load_value_with_hash(
        &self,
        value: &Value,
        name: impl Into<String>,
        hash: String,
        size_bytes: u64,
    ) -> Result<LoadedData> {
        let normalized = normalize_with(value, &self.config)?;
        let root_property = match normalized.origin {
            RecordOrigin::Property(ref p) => Some(p.clone()),
            _ => None,
        };

        let source = SourceMetadata::new(name, hash, size_bytes, &normalized.records)
            .with_root_property(root_property);

        debug!(hash = source.hash.as_str(), bytes = size_bytes, "hashed input");
        info!(
            name = source.name.as_str(),
            records = source.record_count,
            fields = source.field_count,
            "dataset loaded"
        );

        Ok(LoadedData {
            records: normalized.records,
            source,
        })
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_str() {
        let loaded = DataLoader::new()
            .load_str(r#"{"rows": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]}"#)
            .unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.source.record_count, 2);
        assert_eq!(loaded.source.field_count, 2);
        assert_eq!(loaded.source.root_property.as_deref(), Some("rows"));
        assert!(loaded.source.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = DataLoader::new().load_str("{not json").unwrap_err();
        assert!(matches!(err, VizlinkError::Parse { .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"name": "A"}]"#).unwrap();

        let loaded = DataLoader::new().load_file(file.path()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.source.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_non_json_extension_rejected() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"a,b\n1,2\n").unwrap();

        let err = DataLoader::new().load_file(file.path()).unwrap_err();
        assert!(matches!(err, VizlinkError::Format(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DataLoader::new()
            .load_file("/nonexistent/vizlink/data.json")
            .unwrap_err();
        assert!(matches!(err, VizlinkError::Io { .. }));
    }
}

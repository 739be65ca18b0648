//! Error types for the vizlink library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vizlink operations.
#[derive(Debug, Error)]
pub enum VizlinkError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The supplied text was not valid JSON.
    #[error("Invalid JSON format: {message}")]
    Parse { message: String },

    /// No usable array of objects could be derived from the input.
    #[error("Format error: {0}")]
    Format(String),

    /// Classification was invoked on unusable data (e.g. an empty array).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A field was assigned to a slot that requires a different field type.
    #[error("Field '{field}' cannot fill slot '{slot}': expected {expected}, found {actual}")]
    FieldMismatch {
        slot: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// A slot or predicate names a field the dataset does not have.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A built-in sample dataset name was not recognized.
    #[error("Unknown sample dataset: {0}")]
    UnknownSample(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VizlinkError {
    /// Build the canonical format error for inputs with no array of objects.
    pub fn no_array_of_objects() -> Self {
        VizlinkError::Format("no valid array of objects found".to_string())
    }
}

/// Result type alias for vizlink operations.
pub type Result<T> = std::result::Result<T, VizlinkError>;

//! Field classification and statistics.

use serde::{Deserialize, Serialize};

use super::types::FieldType;

/// Statistics computed over the whole dataset for one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    /// Total number of records.
    pub total_count: usize,
    /// Records where the field is null or absent.
    pub null_count: usize,
    /// Number of distinct non-null values.
    pub unique_count: usize,
    /// First few distinct values, for display.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_values: Vec<String>,
    /// Numeric summary (numerical fields only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
}

/// Range and mean of a numerical field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Classification of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldClassification {
    /// Field name.
    pub name: String,
    /// Zero-based position in the first record.
    pub position: usize,
    /// Primary semantic type.
    pub primary_type: FieldType,
    /// Whether the field holds sequences.
    pub is_array: bool,
    /// Whether the field holds date-like strings.
    pub is_date: bool,
    /// Cardinality facts.
    pub statistics: FieldStatistics,
    /// Unique/total ratio at or above which a field looks like an identifier.
    #[serde(skip, default = "default_identifier_ratio")]
    identifier_ratio: f64,
    /// Minimum distinct values for a field to look like an identifier.
    #[serde(skip, default = "default_identifier_min_unique")]
    identifier_min_unique: usize,
}

fn default_identifier_ratio() -> f64 {
    0.5
}

fn default_identifier_min_unique() -> usize {
    20
}

impl FieldClassification {
    /// Create a classification with the given type and no statistics.
    pub fn new(name: impl Into<String>, position: usize, primary_type: FieldType) -> Self {
        Self {
            name: name.into(),
            position,
            primary_type,
            is_array: primary_type == FieldType::Array,
            is_date: primary_type == FieldType::Date,
            statistics: FieldStatistics::default(),
            identifier_ratio: default_identifier_ratio(),
            identifier_min_unique: default_identifier_min_unique(),
        }
    }

    /// Set the statistics.
    pub fn with_statistics(mut self, statistics: FieldStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set the identifier heuristic thresholds.
    pub fn with_identifier_thresholds(mut self, ratio: f64, min_unique: usize) -> Self {
        self.identifier_ratio = ratio;
        self.identifier_min_unique = min_unique;
        self
    }

    /// Number of distinct non-null values.
    pub fn unique_count(&self) -> usize {
        self.statistics.unique_count
    }

    /// Number of records.
    pub fn total_count(&self) -> usize {
        self.statistics.total_count
    }

    /// Distinct values divided by records.
    pub fn unique_ratio(&self) -> f64 {
        if self.statistics.total_count == 0 {
            0.0
        } else {
            self.statistics.unique_count as f64 / self.statistics.total_count as f64
        }
    }

    /// High-cardinality string fields are probably identifiers or free text.
    ///
    /// This is a hint only: such fields keep their categorical type.
    pub fn is_identifier_like(&self) -> bool {
        self.primary_type == FieldType::Categorical
            && self.unique_ratio() >= self.identifier_ratio
            && self.statistics.unique_count >= self.identifier_min_unique
    }
}

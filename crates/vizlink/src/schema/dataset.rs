//! Dataset-level schema: the ordered classification map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::FieldClassification;
use super::types::{FieldType, SlotKind};

/// Classifications for every field, in first-record key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub fields: IndexMap<String, FieldClassification>,
}

impl DatasetSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema from classifications, keeping their order.
    pub fn with_fields(fields: Vec<FieldClassification>) -> Self {
        Self {
            fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
        }
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldClassification> {
        self.fields.get(name)
    }

    /// Primary type of a field.
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).map(|f| f.primary_type)
    }

    /// All field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|k| k.as_str()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields whose primary type is exactly `field_type`, in order.
    pub fn fields_of(&self, field_type: FieldType) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| f.primary_type == field_type)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Fields usable in a categorical slot: categorical, boolean and date.
    pub fn categorical_options(&self) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| f.primary_type.is_categorical_compatible())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Option list for a slot of the given kind.
    pub fn options_for(&self, kind: SlotKind) -> Vec<&str> {
        match kind {
            SlotKind::Categorical => self.categorical_options(),
            SlotKind::Numerical => self.fields_of(FieldType::Numerical),
            SlotKind::Array => self.fields_of(FieldType::Array),
        }
    }

    /// Fields flagged as identifier-like.
    pub fn identifier_fields(&self) -> impl Iterator<Item = &FieldClassification> {
        self.fields.values().filter(|f| f.is_identifier_like())
    }
}

//! Core type definitions for field classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Discrete labels (including mixed-type fields).
    Categorical,
    /// Numbers.
    Numerical,
    /// Sequences of entity names (relation fields).
    Array,
    /// Nested objects that survived flattening.
    Object,
    /// true/false values.
    Boolean,
    /// Date-like strings.
    Date,
}

impl FieldType {
    /// Whether fields of this type can drive a categorical slot or filter.
    pub fn is_categorical_compatible(&self) -> bool {
        matches!(
            self,
            FieldType::Categorical | FieldType::Boolean | FieldType::Date
        )
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Categorical => "categorical",
            FieldType::Numerical => "numerical",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of field a chart slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Entity, category or group slots.
    Categorical,
    /// Value slots.
    Numerical,
    /// Relation slots.
    Array,
}

impl SlotKind {
    /// Whether a field of the given type may be assigned to this slot.
    pub fn accepts(&self, field_type: FieldType) -> bool {
        match self {
            SlotKind::Categorical => field_type.is_categorical_compatible(),
            SlotKind::Numerical => field_type == FieldType::Numerical,
            SlotKind::Array => field_type == FieldType::Array,
        }
    }

    /// The primary type a recommendation must pick for this slot.
    pub fn primary_type(&self) -> FieldType {
        match self {
            SlotKind::Categorical => FieldType::Categorical,
            SlotKind::Numerical => FieldType::Numerical,
            SlotKind::Array => FieldType::Array,
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primary_type().as_str())
    }
}

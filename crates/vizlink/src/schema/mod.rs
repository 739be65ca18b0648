//! Schema types for representing inferred field semantics.

mod dataset;
mod field;
mod types;

pub use dataset::DatasetSchema;
pub use field::{FieldClassification, FieldStatistics, NumericSummary};
pub use types::{FieldType, SlotKind};

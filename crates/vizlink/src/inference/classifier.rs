//! Field-type classification over a record array.

use indexmap::IndexSet;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, VizlinkError};
use crate::schema::{DatasetSchema, FieldClassification, FieldStatistics, FieldType, NumericSummary};
use crate::value::{entity_key, is_missing, Record, ValueKind};

use super::dates::is_date_string;

/// Number of distinct values kept as display samples.
const SAMPLE_VALUE_LIMIT: usize = 5;

/// Inference configuration.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Leading records inspected for type consistency.
    pub sample_size: usize,
    /// Unique/total ratio at or above which a categorical field is identifier-like.
    pub identifier_ratio: f64,
    /// Minimum distinct values for a field to be identifier-like.
    pub identifier_min_unique: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            identifier_ratio: 0.5,
            identifier_min_unique: 20,
        }
    }
}

impl InferenceConfig {
    /// Set the sample size.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the identifier heuristic thresholds.
    pub fn with_identifier_thresholds(mut self, ratio: f64, min_unique: usize) -> Self {
        self.identifier_ratio = ratio;
        self.identifier_min_unique = min_unique;
        self
    }
}

/// Classifies every field of a dataset into one primary type.
pub struct TypeInferrer {
    config: InferenceConfig,
}

impl TypeInferrer {
    /// Create an inferrer with default settings.
    pub fn new() -> Self {
        Self {
            config: InferenceConfig::default(),
        }
    }

    /// Create an inferrer with custom settings.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Classify every field named by the first record.
    pub fn classify(&self, records: &[Record]) -> Result<DatasetSchema> {
        let Some(first) = records.first() else {
            return Err(VizlinkError::InvalidData(
                "data must be a non-empty array of records".to_string(),
            ));
        };

        let sample_size = self.config.sample_size.max(1).min(records.len());
        let samples = &records[..sample_size];

        let fields = first
            .keys()
            .enumerate()
            .map(|(position, name)| {
                let primary_type = self.infer_type(records, samples, name);
                let statistics = self.compute_statistics(records, name, primary_type);
                debug!(
                    field = name.as_str(),
                    primary_type = primary_type.as_str(),
                    unique = statistics.unique_count,
                    "classified field"
                );
                FieldClassification::new(name.clone(), position, primary_type)
                    .with_statistics(statistics)
                    .with_identifier_thresholds(
                        self.config.identifier_ratio,
                        self.config.identifier_min_unique,
                    )
            })
            .collect();

        Ok(DatasetSchema::with_fields(fields))
    }

    /// Decide the primary type of one field.
    fn infer_type(&self, records: &[Record], samples: &[Record], field: &str) -> FieldType {
        // Base value: first non-null value, scanning forward past the sample if needed
        let Some(base) = records
            .iter()
            .filter_map(|r| r.get(field))
            .find(|v| !v.is_null())
        else {
            return FieldType::Categorical;
        };
        let base_kind = ValueKind::of(base);

        let mut present = samples
            .iter()
            .filter_map(|r| r.get(field))
            .filter(|v| !v.is_null());

        // Mixed types are never trusted as anything but categorical
        if !present.all(|v| ValueKind::of(v) == base_kind) {
            return FieldType::Categorical;
        }

        match base {
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
            Value::Number(_) => FieldType::Numerical,
            Value::Bool(_) => FieldType::Boolean,
            Value::String(s) if is_date_string(s) => FieldType::Date,
            _ => FieldType::Categorical,
        }
    }

    /// Cardinality and numeric facts over the whole dataset.
    fn compute_statistics(&self, records: &[Record], field: &str, field_type: FieldType) -> FieldStatistics {
        let mut distinct: IndexSet<String> = IndexSet::new();
        let mut null_count = 0;

        for record in records {
            let value = record.get(field);
            if is_missing(value) {
                null_count += 1;
                continue;
            }
            if let Some(v) = value {
                distinct.insert(entity_key(v));
            }
        }

        let numeric = if field_type == FieldType::Numerical {
            numeric_summary(records.iter().filter_map(|r| r.get(field)?.as_f64()))
        } else {
            None
        };

        FieldStatistics {
            total_count: records.len(),
            null_count,
            unique_count: distinct.len(),
            sample_values: distinct.into_iter().take(SAMPLE_VALUE_LIMIT).collect(),
            numeric,
        }
    }
}

impl Default for TypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_summary(values: impl Iterator<Item = f64>) -> Option<NumericSummary> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        None
    } else {
        Some(NumericSummary {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Classify records with the default configuration.
pub fn classify(records: &[Record]) -> Result<DatasetSchema> {
    TypeInferrer::new().classify(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_basic_types() {
        let data = records(json!([
            {"name": "A", "score": 1.5, "tags": ["x"], "active": true, "when": "2024-01-02", "meta": {"k": 1}},
            {"name": "B", "score": 2, "tags": [], "active": false, "when": "2024-01-03", "meta": {"k": 2}}
        ]));
        let schema = classify(&data).unwrap();

        assert_eq!(schema.field_type("name"), Some(FieldType::Categorical));
        assert_eq!(schema.field_type("score"), Some(FieldType::Numerical));
        assert_eq!(schema.field_type("tags"), Some(FieldType::Array));
        assert_eq!(schema.field_type("active"), Some(FieldType::Boolean));
        assert_eq!(schema.field_type("when"), Some(FieldType::Date));
        assert_eq!(schema.field_type("meta"), Some(FieldType::Object));
        assert!(schema.get("tags").unwrap().is_array);
        assert!(schema.get("when").unwrap().is_date);
    }

    #[test]
    fn test_mixed_types_are_categorical() {
        let data = records(json!([{"v": 1}, {"v": "two"}, {"v": 3}]));
        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_type("v"), Some(FieldType::Categorical));
    }

    #[test]
    fn test_array_mixed_with_scalar_is_categorical() {
        let data = records(json!([{"v": ["a"]}, {"v": "b"}]));
        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_type("v"), Some(FieldType::Categorical));
    }

    #[test]
    fn test_leading_nulls_scan_forward() {
        let data = records(json!([{"v": null}, {"v": null}, {"v": 7}]));
        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_type("v"), Some(FieldType::Numerical));
    }

    #[test]
    fn test_scan_forward_beyond_sample() {
        let mut rows: Vec<Value> = (0..12).map(|_| json!({"v": null})).collect();
        rows.push(json!({"v": ["late"]}));
        let data = records(Value::Array(rows));

        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_type("v"), Some(FieldType::Array));
    }

    #[test]
    fn test_all_null_defaults_categorical() {
        let data = records(json!([{"v": null}, {"v": null}]));
        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_type("v"), Some(FieldType::Categorical));
    }

    #[test]
    fn test_sample_limits_consistency_check() {
        let mut rows: Vec<Value> = (0..10).map(|i| json!({"v": i})).collect();
        rows.push(json!({"v": "late string"}));
        let data = records(Value::Array(rows));

        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_type("v"), Some(FieldType::Numerical));
    }

    #[test]
    fn test_fields_come_from_first_record() {
        let data = records(json!([{"a": 1}, {"a": 2, "b": "extra"}]));
        let schema = classify(&data).unwrap();
        assert_eq!(schema.field_names(), vec!["a"]);
    }

    #[test]
    fn test_empty_is_invalid_data() {
        let err = classify(&[]).unwrap_err();
        assert!(matches!(err, VizlinkError::InvalidData(_)));
    }

    #[test]
    fn test_statistics_cover_whole_dataset() {
        let rows: Vec<Value> = (0..30)
            .map(|i| {
                let group = if i % 2 == 0 { "even" } else { "odd" };
                json!({"id": format!("row-{}", i), "n": i, "group": group})
            })
            .collect();
        let data = records(Value::Array(rows));
        let schema = classify(&data).unwrap();

        let id = schema.get("id").unwrap();
        assert_eq!(id.unique_count(), 30);
        assert_eq!(id.total_count(), 30);
        assert_eq!(id.primary_type, FieldType::Categorical);
        assert!(id.is_identifier_like());

        let group = schema.get("group").unwrap();
        assert_eq!(group.unique_count(), 2);
        assert!(!group.is_identifier_like());
        assert_eq!(group.statistics.sample_values, vec!["even", "odd"]);

        let n = schema.get("n").unwrap().statistics.numeric.unwrap();
        assert_eq!(n.min, 0.0);
        assert_eq!(n.max, 29.0);
        assert_eq!(n.mean, 14.5);
    }

    #[test]
    fn test_null_count() {
        let data = records(json!([{"v": "a"}, {"v": null}, {}]));
        let schema = classify(&data).unwrap();
        let v = schema.get("v").unwrap();
        assert_eq!(v.statistics.null_count, 2);
        assert_eq!(v.unique_count(), 1);
    }
}

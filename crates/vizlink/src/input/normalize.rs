//! Normalization of arbitrary parsed JSON into a canonical record array.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, VizlinkError};
use crate::value::Record;

/// Normalization configuration.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Levels of nested objects to flatten into `<parent>_<child>` keys.
    pub max_depth: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { max_depth: 2 }
    }
}

impl NormalizeConfig {
    /// Set the flattening depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Which input shape produced the record array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrigin {
    /// The input was itself an array of objects.
    TopLevelArray,
    /// The records came from the named property of the input object.
    Property(String),
    /// The input was an object of objects, keyed by id.
    KeyedObjects,
}

/// Records plus the shape they were derived from.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub records: Vec<Record>,
    pub origin: RecordOrigin,
}

/// Normalize a parsed JSON value with the default configuration.
pub fn normalize(value: &Value) -> Result<Vec<Record>> {
    normalize_with(value, &NormalizeConfig::default()).map(|n| n.records)
}

/// Normalize a parsed JSON value into a flattened record array.
pub fn normalize_with(value: &Value, config: &NormalizeConfig) -> Result<Normalized> {
    let (records, origin) = locate_records(value)?;
    debug!(records = records.len(), origin = ?origin, "located record array");

    let records = flatten_records(records, config.max_depth);
    Ok(Normalized { records, origin })
}

/// Find the array of objects inside the input.
fn locate_records(value: &Value) -> Result<(Vec<Record>, RecordOrigin)> {
    match value {
        Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
            let records = collect_objects(items);
            let dropped = items.len() - records.len();
            if dropped > 0 {
                warn!(dropped, "dropped non-object elements from top-level array");
            }
            Ok((records, RecordOrigin::TopLevelArray))
        }
        Value::Object(map) => {
            let nested = map.iter().find(|(_, v)| is_array_of_objects(v));
            if let Some((key, Value::Array(items))) = nested {
                let records = collect_objects(items);
                if items.len() > records.len() {
                    warn!(
                        property = key.as_str(),
                        dropped = items.len() - records.len(),
                        "dropped non-object elements from nested array"
                    );
                }
                return Ok((records, RecordOrigin::Property(key.clone())));
            }

            let keyed: Vec<Record> = map
                .iter()
                .filter_map(|(key, v)| match v {
                    Value::Object(inner) => {
                        let mut record = Record::new();
                        record.insert("id".to_string(), Value::String(key.clone()));
                        for (k, v) in inner {
                            record.insert(k.clone(), v.clone());
                        }
                        Some(record)
                    }
                    _ => None,
                })
                .collect();

            if keyed.is_empty() {
                Err(VizlinkError::no_array_of_objects())
            } else {
                Ok((keyed, RecordOrigin::KeyedObjects))
            }
        }
        _ => Err(VizlinkError::no_array_of_objects()),
    }
}

fn is_array_of_objects(value: &Value) -> bool {
    matches!(value, Value::Array(items) if matches!(items.first(), Some(Value::Object(_))))
}

fn collect_objects(items: &[Value]) -> Vec<Record> {
    items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect()
}

/// Flatten nested objects in every record, up to `max_depth` levels.
pub fn flatten_records(records: Vec<Record>, max_depth: usize) -> Vec<Record> {
    records
        .into_iter()
        .map(|mut record| {
            for _ in 0..max_depth {
                if !flatten_once(&mut record) {
                    break;
                }
            }
            record
        })
        .collect()
}

/// Merge the properties of each object-valued field into the record under
/// `<key>_<child>`. Existing keys are never overwritten. Returns whether any
/// key was added.
fn flatten_once(record: &mut Record) -> bool {
    let mut additions: Vec<(String, Value)> = Vec::new();

    for (key, value) in record.iter() {
        let Value::Object(inner) = value else {
            continue;
        };
        for (child_key, child_value) in inner {
            let new_key = format!("{}_{}", key, child_key);
            if record.contains_key(&new_key) || additions.iter().any(|(k, _)| *k == new_key) {
                continue;
            }
            additions.push((new_key, child_value.clone()));
        }
    }

    let added = !additions.is_empty();
    for (key, value) in additions {
        record.insert(key, value);
    }
    added
}

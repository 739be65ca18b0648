//! Inputs for the external filter-widget builder.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::recommend::FieldSelections;
use crate::schema::{DatasetSchema, FieldType};
use crate::value::{field_key, parse_number, Record};

use super::predicate::{FilterPredicate, FilterSet};

/// Numeric bounds of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

/// A filter control the UI should build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterWidget {
    /// Checkbox list over the field's distinct values.
    Categorical { field: String, values: Vec<String> },
    /// Double-ended slider over the field's numeric bounds.
    Range { field: String, min: f64, max: f64 },
}

impl FilterWidget {
    /// The field the widget controls.
    pub fn field(&self) -> &str {
        match self {
            FilterWidget::Categorical { field, .. } => field,
            FilterWidget::Range { field, .. } => field,
        }
    }

    /// The predicate matching the widget's initial state (all checked, full range).
    pub fn initial_predicate(&self) -> FilterPredicate {
        match self {
            FilterWidget::Categorical { field, values } => {
                FilterPredicate::categorical(field.clone(), values.iter().cloned())
            }
            FilterWidget::Range { field, min, max } => FilterPredicate::range(field.clone(), *min, *max),
        }
    }
}

/// Distinct string representations of a field, in first-seen order.
pub fn get_unique_values(records: &[Record], field: &str) -> Vec<String> {
    records
        .iter()
        .map(|r| field_key(r, field))
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Numeric bounds of a field; `None` when no value parses as a number.
pub fn get_min_max(records: &[Record], field: &str) -> Option<MinMax> {
    records
        .iter()
        .filter_map(|r| r.get(field).and_then(parse_number))
        .fold(None, |acc, n| match acc {
            None => Some(MinMax { min: n, max: n }),
            Some(m) => Some(MinMax {
                min: m.min.min(n),
                max: m.max.max(n),
            }),
        })
}

/// Plan one widget per field used by any chart, skipping relation fields.
pub fn plan_filter_widgets(
    records: &[Record],
    selections: &FieldSelections,
    schema: &DatasetSchema,
) -> Vec<FilterWidget> {
    selections
        .used_fields()
        .into_iter()
        .filter_map(|field| match schema.field_type(field) {
            Some(FieldType::Array) | None => None,
            Some(FieldType::Numerical) => get_min_max(records, field).map(|m| FilterWidget::Range {
                field: field.to_string(),
                min: m.min,
                max: m.max,
            }),
            Some(_) => Some(FilterWidget::Categorical {
                field: field.to_string(),
                values: get_unique_values(records, field),
            }),
        })
        .collect()
}

impl FilterSet {
    /// The filter set matching freshly built widgets.
    pub fn from_widgets(widgets: &[FilterWidget]) -> Self {
        let mut filters = FilterSet::new();
        for widget in widgets {
            filters.set(widget.initial_predicate());
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply_filters;
    use crate::inference::classify;
    use crate::recommend::recommend;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_unique_values_in_order() {
        let data = records(json!([{"r": "Asia"}, {"r": "Europe"}, {"r": "Asia"}, {}]));
        assert_eq!(get_unique_values(&data, "r"), vec!["Asia", "Europe", "null"]);
    }

    #[test]
    fn test_min_max() {
        let data = records(json!([{"n": 3}, {"n": "7.5"}, {"n": -1}, {"n": "x"}]));
        assert_eq!(get_min_max(&data, "n"), Some(MinMax { min: -1.0, max: 7.5 }));
        assert_eq!(get_min_max(&data, "missing"), None);
    }

    #[test]
    fn test_plan_widgets_skips_arrays() {
        let data = records(json!([
            {"Artist": "A", "Region": "Asia", "Follows": 5, "Tags": ["B"]},
            {"Artist": "D", "Region": "Europe", "Follows": 9, "Tags": ["A"]}
        ]));
        let schema = classify(&data).unwrap();
        let selections = recommend(&schema);
        let widgets = plan_filter_widgets(&data, &selections, &schema);

        let fields: Vec<&str> = widgets.iter().map(|w| w.field()).collect();
        assert_eq!(fields, vec!["Artist", "Follows", "Region"]);
        assert_eq!(
            widgets[1],
            FilterWidget::Range { field: "Follows".to_string(), min: 5.0, max: 9.0 }
        );

        // Initial widget state filters nothing
        let filters = FilterSet::from_widgets(&widgets);
        assert_eq!(apply_filters(&data, &filters).len(), 2);
    }
}

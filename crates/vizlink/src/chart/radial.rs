//! Radial bar chart model.

use serde::Serialize;

use crate::value::{field_key, parse_number, Record};

/// One bar: a category and its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialBar {
    pub name: String,
    pub value: f64,
}

/// Bars in record order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialChart {
    pub bars: Vec<RadialBar>,
    /// Largest bar value, 0 when there are no bars.
    pub max_value: f64,
}

/// Build one bar per record. Non-numeric values become 0.
pub fn radial_bars(records: &[Record], category: &str, value: &str) -> RadialChart {
    let bars: Vec<RadialBar> = records
        .iter()
        .map(|record| RadialBar {
            name: field_key(record, category),
            value: record.get(value).and_then(parse_number).unwrap_or(0.0),
        })
        .collect();
    let max_value = bars.iter().map(|b| b.value).fold(0.0, f64::max);

    RadialChart { bars, max_value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bars() {
        let data: Vec<Record> = vec![
            json!({"name": "A", "n": 5}),
            json!({"name": "B", "n": "12.5"}),
            json!({"name": "C", "n": "unknown"}),
        ]
        .into_iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();

        let chart = radial_bars(&data, "name", "n");
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(chart.bars[1], RadialBar { name: "B".to_string(), value: 12.5 });
        assert_eq!(chart.bars[2].value, 0.0);
        assert_eq!(chart.max_value, 12.5);
    }

    #[test]
    fn test_empty() {
        let chart = radial_bars(&[], "name", "n");
        assert!(chart.bars.is_empty());
        assert_eq!(chart.max_value, 0.0);
    }
}

//! Field selections per chart kind and default recommendations.
//!
//! Recommendation is strictly first-encountered: the first field (in schema
//! order) of the required primary type fills each slot. No scoring is done,
//! so identical input order always yields identical defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizlinkError};
use crate::schema::{DatasetSchema, FieldType, SlotKind};

/// Slots of the radial bar chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadialSelection {
    pub category: Option<String>,
    pub value: Option<String>,
}

/// Slots of the chord diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSelection {
    pub entity: Option<String>,
    pub relations: Option<String>,
}

/// Slots of the force-directed graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceSelection {
    pub entity: Option<String>,
    pub relations: Option<String>,
    pub group: Option<String>,
}

/// Slots of the sunburst chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunburstSelection {
    pub entity: Option<String>,
    pub group: Option<String>,
    pub relations: Option<String>,
}

/// Field assignments for all four charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelections {
    pub radial: RadialSelection,
    pub chord: ChordSelection,
    pub force: ForceSelection,
    pub sunburst: SunburstSelection,
}

/// One named slot of one chart, with its current assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    /// Qualified slot name, e.g. `chord.relations`.
    pub name: &'static str,
    pub kind: SlotKind,
    pub field: Option<&'a str>,
}

impl FieldSelections {
    /// Every slot of every chart, in chart order.
    pub fn slots(&self) -> Vec<Slot<'_>> {
        vec![
            slot("radial.category", SlotKind::Categorical, &self.radial.category),
            slot("radial.value", SlotKind::Numerical, &self.radial.value),
            slot("chord.entity", SlotKind::Categorical, &self.chord.entity),
            slot("chord.relations", SlotKind::Array, &self.chord.relations),
            slot("force.entity", SlotKind::Categorical, &self.force.entity),
            slot("force.relations", SlotKind::Array, &self.force.relations),
            slot("force.group", SlotKind::Categorical, &self.force.group),
            slot("sunburst.entity", SlotKind::Categorical, &self.sunburst.entity),
            slot("sunburst.group", SlotKind::Categorical, &self.sunburst.group),
            slot("sunburst.relations", SlotKind::Array, &self.sunburst.relations),
        ]
    }

    /// Distinct fields named by any slot, in first-seen order.
    pub fn used_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for slot in self.slots() {
            if let Some(field) = slot.field {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    /// Check every assigned slot against the schema.
    ///
    /// Array slots only take `array` fields, value slots only `numerical`
    /// fields, categorical slots take categorical, boolean or date fields.
    pub fn validate(&self, schema: &DatasetSchema) -> Result<()> {
        for slot in self.slots() {
            let Some(field) = slot.field else {
                continue;
            };
            let field_type = schema
                .field_type(field)
                .ok_or_else(|| VizlinkError::UnknownField(field.to_string()))?;
            if !slot.kind.accepts(field_type) {
                return Err(VizlinkError::FieldMismatch {
                    slot: slot.name.to_string(),
                    field: field.to_string(),
                    expected: slot.kind.to_string(),
                    actual: field_type.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Unset every slot whose field the schema no longer accepts.
    pub fn retain_valid(&mut self, schema: &DatasetSchema) {
        let keep = |field: &mut Option<String>, kind: SlotKind| {
            let valid = field
                .as_deref()
                .and_then(|f| schema.field_type(f))
                .map(|t| kind.accepts(t))
                .unwrap_or(false);
            if !valid {
                *field = None;
            }
        };
        keep(&mut self.radial.category, SlotKind::Categorical);
        keep(&mut self.radial.value, SlotKind::Numerical);
        keep(&mut self.chord.entity, SlotKind::Categorical);
        keep(&mut self.chord.relations, SlotKind::Array);
        keep(&mut self.force.entity, SlotKind::Categorical);
        keep(&mut self.force.relations, SlotKind::Array);
        keep(&mut self.force.group, SlotKind::Categorical);
        keep(&mut self.sunburst.entity, SlotKind::Categorical);
        keep(&mut self.sunburst.group, SlotKind::Categorical);
        keep(&mut self.sunburst.relations, SlotKind::Array);
    }
}

fn slot<'a>(name: &'static str, kind: SlotKind, field: &'a Option<String>) -> Slot<'a> {
    Slot {
        name,
        kind,
        field: field.as_deref(),
    }
}

/// Pick default fields for every chart. Never fails; unfillable slots stay unset.
pub fn recommend(schema: &DatasetSchema) -> FieldSelections {
    let categorical = schema.fields_of(FieldType::Categorical);
    let numerical = schema.fields_of(FieldType::Numerical);
    let arrays = schema.fields_of(FieldType::Array);

    let first_categorical = categorical.first().map(|s| s.to_string());
    let second_categorical = categorical.get(1).map(|s| s.to_string());
    let first_numerical = numerical.first().map(|s| s.to_string());
    let first_array = arrays.first().map(|s| s.to_string());

    FieldSelections {
        radial: RadialSelection {
            category: first_categorical.clone(),
            value: first_numerical,
        },
        chord: ChordSelection {
            entity: first_categorical.clone(),
            relations: first_array.clone(),
        },
        force: ForceSelection {
            entity: first_categorical.clone(),
            relations: first_array.clone(),
            group: second_categorical.clone(),
        },
        sunburst: SunburstSelection {
            entity: first_categorical,
            group: second_categorical,
            relations: first_array,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldClassification;

    fn schema(fields: &[(&str, FieldType)]) -> DatasetSchema {
        DatasetSchema::with_fields(
            fields
                .iter()
                .enumerate()
                .map(|(i, (name, t))| FieldClassification::new(*name, i, *t))
                .collect(),
        )
    }

    #[test]
    fn test_first_encountered_wins() {
        let schema = schema(&[
            ("Count", FieldType::Numerical),
            ("Artist", FieldType::Categorical),
            ("Tags", FieldType::Array),
            ("Region", FieldType::Categorical),
            ("Peers", FieldType::Array),
            ("Genre", FieldType::Categorical),
        ]);
        let rec = recommend(&schema);

        assert_eq!(rec.radial.category.as_deref(), Some("Artist"));
        assert_eq!(rec.radial.value.as_deref(), Some("Count"));
        assert_eq!(rec.chord.relations.as_deref(), Some("Tags"));
        assert_eq!(rec.force.group.as_deref(), Some("Region"));
        assert_eq!(rec.sunburst.group.as_deref(), Some("Region"));
    }

    #[test]
    fn test_unfilled_slots_are_unset() {
        let schema = schema(&[("Artist", FieldType::Categorical)]);
        let rec = recommend(&schema);

        assert_eq!(rec.radial.value, None);
        assert_eq!(rec.chord.relations, None);
        assert_eq!(rec.force.group, None);
        assert_eq!(rec.sunburst.group, None);
        assert!(rec.validate(&schema).is_ok());
    }

    #[test]
    fn test_dates_and_booleans_not_recommended() {
        let schema = schema(&[
            ("When", FieldType::Date),
            ("Flag", FieldType::Boolean),
            ("Name", FieldType::Categorical),
        ]);
        let rec = recommend(&schema);
        assert_eq!(rec.radial.category.as_deref(), Some("Name"));
        assert_eq!(schema.categorical_options(), vec!["When", "Flag", "Name"]);
    }

    #[test]
    fn test_validate_rejects_mismatch() {
        let schema = schema(&[("Name", FieldType::Categorical), ("Tags", FieldType::Array)]);
        let mut selections = FieldSelections::default();
        selections.chord.relations = Some("Name".to_string());

        let err = selections.validate(&schema).unwrap_err();
        assert!(matches!(err, VizlinkError::FieldMismatch { ref slot, .. } if slot == "chord.relations"));

        selections.chord.relations = Some("Missing".to_string());
        assert!(matches!(selections.validate(&schema), Err(VizlinkError::UnknownField(_))));
    }

    #[test]
    fn test_used_fields_dedup() {
        let schema = schema(&[("Name", FieldType::Categorical), ("Tags", FieldType::Array)]);
        let rec = recommend(&schema);
        assert_eq!(rec.used_fields(), vec!["Name", "Tags"]);
    }

    #[test]
    fn test_retain_valid() {
        let schema = schema(&[("Name", FieldType::Categorical)]);
        let mut selections = FieldSelections::default();
        selections.radial.category = Some("Name".to_string());
        selections.radial.value = Some("Gone".to_string());
        selections.retain_valid(&schema);

        assert_eq!(selections.radial.category.as_deref(), Some("Name"));
        assert_eq!(selections.radial.value, None);
    }
}

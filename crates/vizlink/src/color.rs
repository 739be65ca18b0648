//! Shared entity-to-color assignment.
//!
//! One map per render pass so the same entity gets the same color in every chart.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::recommend::FieldSelections;
use crate::value::{array_keys, field_key, is_missing, Record};

/// Fixed 10-color categorical palette.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Default palette as owned strings, for configuration.
pub fn default_palette() -> Vec<String> {
    PALETTE.iter().map(|c| c.to_string()).collect()
}

/// Mapping from entity name to color token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorMap {
    colors: IndexMap<String, String>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color of an entity, if it was collected.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    /// Color of an entity, falling back to the first palette color.
    pub fn color_for(&self, name: &str) -> &str {
        self.get(name).unwrap_or(PALETTE[0])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entries in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Build the color map over the filtered records with the default palette.
pub fn build_color_map(records: &[Record], selections: &FieldSelections) -> ColorMap {
    let palette = default_palette();
    build_color_map_with_palette(records, selections, &palette)
}

/// Build the color map with a custom palette.
///
/// Names are collected in order: radial categories, chord entities and
/// relations, force entities, groups and relations, then sunburst entities,
/// groups and relations. Within a chart each record contributes its values in
/// slot order before the next record. The `i`-th distinct name gets
/// `palette[i % palette.len()]`. An empty palette yields an empty map.
pub fn build_color_map_with_palette(
    records: &[Record],
    selections: &FieldSelections,
    palette: &[String],
) -> ColorMap {
    let mut names: IndexSet<String> = IndexSet::new();

    let passes: Vec<(Vec<Option<&str>>, Option<&str>)> = vec![
        (vec![selections.radial.category.as_deref()], None),
        (
            vec![selections.chord.entity.as_deref()],
            selections.chord.relations.as_deref(),
        ),
        (
            vec![selections.force.entity.as_deref(), selections.force.group.as_deref()],
            selections.force.relations.as_deref(),
        ),
        (
            vec![selections.sunburst.entity.as_deref(), selections.sunburst.group.as_deref()],
            selections.sunburst.relations.as_deref(),
        ),
    ];

    for (scalars, relations) in &passes {
        for record in records {
            for field in scalars.iter().flatten() {
                if !is_missing(record.get(*field)) {
                    names.insert(field_key(record, field));
                }
            }
            if let Some(relations) = relations {
                names.extend(array_keys(record.get(*relations)));
            }
        }
    }

    if palette.is_empty() {
        return ColorMap::new();
    }

    let colors = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, palette[i % palette.len()].clone()))
        .collect();
    ColorMap { colors }
}

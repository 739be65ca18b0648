//! Sunburst hierarchy model.

use serde::Serialize;

use crate::value::{array_keys, field_key, is_missing, Record};

/// Name of a group ring segment whose group value is missing.
pub const UNKNOWN_GROUP: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstNode {
    pub name: String,
    pub value: f64,
    /// Owning entity, set on relation leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SunburstNode>,
}

impl SunburstNode {
    fn leaf(name: String, value: f64) -> Self {
        Self {
            name,
            value,
            origin: None,
            children: Vec::new(),
        }
    }

    /// Sum of leaf values below this node, or its own value for a leaf.
    pub fn total(&self) -> f64 {
        if self.children.is_empty() {
            self.value
        } else {
            self.children.iter().map(SunburstNode::total).sum()
        }
    }

    /// Depth of the tree rooted here (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(SunburstNode::depth).max().unwrap_or(0)
    }
}

/// Build `root -> entity -> group -> relation` with one entity node per record.
pub fn sunburst_tree(records: &[Record], entity: &str, group: &str, relations: &str) -> SunburstNode {
    let children = records
        .iter()
        .map(|record| {
            let name = field_key(record, entity);
            let related = array_keys(record.get(relations));

            let group_name = if is_missing(record.get(group)) {
                UNKNOWN_GROUP.to_string()
            } else {
                field_key(record, group)
            };
            let mut group_node = SunburstNode::leaf(group_name, related.len().max(1) as f64);
            group_node.children = related
                .into_iter()
                .map(|r| SunburstNode {
                    origin: Some(name.clone()),
                    ..SunburstNode::leaf(r, 1.0)
                })
                .collect();

            let mut entity_node = SunburstNode::leaf(name, 1.0);
            entity_node.children.push(group_node);
            entity_node
        })
        .collect();

    SunburstNode {
        children,
        ..SunburstNode::leaf("root".to_string(), 0.0)
    }
}

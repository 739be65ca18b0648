//! Force-directed graph model and community detection.

use std::collections::HashMap;

use serde::Serialize;

use crate::value::{array_keys, field_key, is_missing, Record};

/// Group given to main nodes when no group field is selected.
pub const DEFAULT_GROUP: &str = "1";
/// Group given to nodes that only appear as relations.
pub const RELATION_GROUP: &str = "0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceNode {
    pub id: String,
    pub group: String,
    /// True for nodes created from a record, false for relation-only nodes.
    pub is_main: bool,
    /// Index of the owning record, for main nodes.
    pub record: Option<usize>,
    /// Smallest node index in this node's connected component.
    pub community: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceLink {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceGraph {
    pub nodes: Vec<ForceNode>,
    pub links: Vec<ForceLink>,
}

impl ForceGraph {
    /// Number of distinct communities.
    pub fn community_count(&self) -> usize {
        let mut seen: Vec<usize> = self.nodes.iter().map(|n| n.community).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Names linked to `id` in either direction.
    pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.links.iter().filter_map(move |link| {
            if link.source == id {
                Some(link.target.as_str())
            } else if link.target == id {
                Some(link.source.as_str())
            } else {
                None
            }
        })
    }
}

/// Build the graph: one main node per record, then one node per unseen relation.
pub fn force_graph(records: &[Record], entity: &str, relations: &str, group: Option<&str>) -> ForceGraph {
    let mut nodes: Vec<ForceNode> = Vec::with_capacity(records.len());
    let mut known: HashMap<String, usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let id = field_key(record, entity);
        let group = match group {
            Some(field) if !is_missing(record.get(field)) => field_key(record, field),
            _ => DEFAULT_GROUP.to_string(),
        };
        known.entry(id.clone()).or_insert(nodes.len());
        nodes.push(ForceNode {
            id,
            group,
            is_main: true,
            record: Some(index),
            community: 0,
        });
    }

    let mut links = Vec::new();
    for record in records {
        let source = field_key(record, entity);
        for target in array_keys(record.get(relations)) {
            if !known.contains_key(&target) {
                known.insert(target.clone(), nodes.len());
                nodes.push(ForceNode {
                    id: target.clone(),
                    group: RELATION_GROUP.to_string(),
                    is_main: false,
                    record: None,
                    community: 0,
                });
            }
            links.push(ForceLink {
                source: source.clone(),
                target,
                weight: 1,
            });
        }
    }

    let communities = detect_communities(&nodes, &links);
    for (node, community) in nodes.iter_mut().zip(communities) {
        node.community = community;
    }

    ForceGraph { nodes, links }
}

/// Assign each node the smallest node index in its connected component.
///
/// Nodes sharing an id are one vertex.
pub fn detect_communities(nodes: &[ForceNode], links: &[ForceLink]) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..nodes.len()).collect();
    let mut first_index: HashMap<&str, usize> = HashMap::new();

    for (index, node) in nodes.iter().enumerate() {
        match first_index.get(node.id.as_str()) {
            Some(&first) => union(&mut parent, first, index),
            None => {
                first_index.insert(node.id.as_str(), index);
            }
        }
    }

    for link in links {
        if let (Some(&a), Some(&b)) = (
            first_index.get(link.source.as_str()),
            first_index.get(link.target.as_str()),
        ) {
            union(&mut parent, a, b);
        }
    }

    (0..nodes.len()).map(|i| find(&mut parent, i)).collect()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

// Roots are always the smaller index
fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi] = lo;
    }
}

//! Chord diagram model: a symmetric relationship matrix.

use indexmap::IndexSet;
use serde::Serialize;

use crate::value::{array_keys, field_key, Record};

/// Square matrix over `names`; `matrix[s][t]` counts relations between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordMatrix {
    pub names: Vec<String>,
    pub matrix: Vec<Vec<u32>>,
}

impl ChordMatrix {
    /// Index of a name in the matrix.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Total weight of a row (arc size).
    pub fn connection_count(&self, index: usize) -> u32 {
        self.matrix.get(index).map(|row| row.iter().sum()).unwrap_or(0)
    }

    /// Whether two names share at least one relation.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.matrix
            .get(a)
            .and_then(|row| row.get(b))
            .map(|w| *w > 0)
            .unwrap_or(false)
    }
}

/// Build the matrix. Each (entity, relation) pair adds 1 in both directions.
pub fn chord_matrix(records: &[Record], entity: &str, relations: &str) -> ChordMatrix {
    let mut names: IndexSet<String> = IndexSet::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for record in records {
        let (source, _) = names.insert_full(field_key(record, entity));
        for target in array_keys(record.get(relations)) {
            let (target, _) = names.insert_full(target);
            pairs.push((source, target));
        }
    }

    let mut matrix = vec![vec![0u32; names.len()]; names.len()];
    for (s, t) in pairs {
        matrix[s][t] += 1;
        matrix[t][s] += 1;
    }

    ChordMatrix {
        names: names.into_iter().collect(),
        matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Vec<Record> {
        vec![
            json!({"Artist": "A", "Tags": ["B", "C"]}),
            json!({"Artist": "D", "Tags": ["A"]}),
            json!({"Artist": "E", "Tags": "none"}),
        ]
        .into_iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect()
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let chord = chord_matrix(&data(), "Artist", "Tags");
        assert_eq!(chord.names, vec!["A", "B", "C", "D", "E"]);

        let a = chord.index_of("A").unwrap();
        let d = chord.index_of("D").unwrap();
        assert_eq!(chord.matrix[a][d], 1);
        assert_eq!(chord.matrix[d][a], 1);
        assert_eq!(chord.connection_count(a), 3);
        assert!(chord.connected(a, 1));
    }

    #[test]
    fn test_non_array_relations_contribute_nothing() {
        let chord = chord_matrix(&data(), "Artist", "Tags");
        let e = chord.index_of("E").unwrap();
        assert_eq!(chord.connection_count(e), 0);
    }

    #[test]
    fn test_self_relation_counts_twice() {
        let data: Vec<Record> = vec![json!({"n": "A", "r": ["A"]})]
            .into_iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect();
        let chord = chord_matrix(&data, "n", "r");
        assert_eq!(chord.matrix, vec![vec![2]]);
    }
}

//! Filter predicates and their evaluation against the canonical dataset.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value::{field_key, parse_number, Record};

/// A predicate on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterPredicate {
    /// The field's string representation must be one of `allowed`.
    ///
    /// An empty allowed set filters nothing: unchecking every value shows all rows.
    Categorical {
        field: String,
        allowed: IndexSet<String>,
    },
    /// The field must parse as a number within `[min, max]`.
    Range { field: String, min: f64, max: f64 },
}

impl FilterPredicate {
    /// Build a categorical predicate.
    pub fn categorical<I, S>(field: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterPredicate::Categorical {
            field: field.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a range predicate.
    pub fn range(field: impl Into<String>, min: f64, max: f64) -> Self {
        FilterPredicate::Range {
            field: field.into(),
            min,
            max,
        }
    }

    /// The field this predicate constrains.
    pub fn field(&self) -> &str {
        match self {
            FilterPredicate::Categorical { field, .. } => field,
            FilterPredicate::Range { field, .. } => field,
        }
    }

    /// Whether the predicate constrains anything at all.
    pub fn is_active(&self) -> bool {
        match self {
            FilterPredicate::Categorical { allowed, .. } => !allowed.is_empty(),
            FilterPredicate::Range { .. } => true,
        }
    }

    /// Check a record against this predicate.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            FilterPredicate::Categorical { field, allowed } => {
                allowed.is_empty() || allowed.contains(&field_key(record, field))
            }
            FilterPredicate::Range { field, min, max } => record
                .get(field)
                .and_then(parse_number)
                .map(|n| *min <= n && n <= *max)
                .unwrap_or(false),
        }
    }
}

/// The active predicates, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    predicates: IndexMap<String, FilterPredicate>,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the predicate for its field.
    pub fn set(&mut self, predicate: FilterPredicate) {
        self.predicates.insert(predicate.field().to_string(), predicate);
    }

    /// Builder form of [`FilterSet::set`].
    pub fn with(mut self, predicate: FilterPredicate) -> Self {
        self.set(predicate);
        self
    }

    /// Remove the predicate on a field.
    pub fn remove(&mut self, field: &str) -> Option<FilterPredicate> {
        self.predicates.shift_remove(field)
    }

    /// Get the predicate on a field.
    pub fn get(&self, field: &str) -> Option<&FilterPredicate> {
        self.predicates.get(field)
    }

    /// Drop every predicate.
    pub fn reset(&mut self) {
        self.predicates.clear();
    }

    /// All predicates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterPredicate> {
        self.predicates.values()
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether there are no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether a record passes every predicate.
    pub fn matches(&self, record: &Record) -> bool {
        self.predicates.values().all(|p| p.matches(record))
    }
}

/// Apply all predicates (ANDed) to the canonical records.
///
/// Always evaluated against the canonical dataset, never a prior filtered
/// result, so applying the same set twice gives the same output.
pub fn apply_filters(canonical: &[Record], filters: &FilterSet) -> Vec<Record> {
    let filtered: Vec<Record> = canonical
        .iter()
        .filter(|record| filters.matches(record))
        .cloned()
        .collect();

    debug!(
        predicates = filters.len(),
        before = canonical.len(),
        after = filtered.len(),
        "applied filters"
    );
    filtered
}

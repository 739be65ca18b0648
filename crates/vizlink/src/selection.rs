//! Selection state shared by every chart.
//!
//! Selection is by entity name, not by record: a name matches any record in
//! which it occurs as a scalar field value or as an element of an array field.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value::{record_mentions, Record};

/// The set of selected entity names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: IndexSet<String>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on an entity.
    ///
    /// Without a modifier the selection is cleared first; the clicked name is
    /// then toggled. So a plain click on the only selected name empties it.
    pub fn click(&mut self, name: &str, modifier: bool) {
        if !modifier {
            self.selected.clear();
        }
        if !self.selected.shift_remove(name) {
            self.selected.insert(name.to_string());
        }
        debug!(name, modifier, selected = self.selected.len(), "selection click");
    }

    /// Add both endpoints of a link without toggling (modifier-click on a ribbon).
    pub fn select_pair(&mut self, source: &str, target: &str) {
        self.selected.insert(source.to_string());
        self.selected.insert(target.to_string());
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop every name with no occurrence in `records`.
    ///
    /// Returns the number of names removed.
    pub fn prune_against_dataset(&mut self, records: &[Record]) -> usize {
        let before = self.selected.len();
        self.selected
            .retain(|name| records.iter().any(|record| record_mentions(record, name)));
        let removed = before - self.selected.len();
        if removed > 0 {
            debug!(removed, remaining = self.selected.len(), "pruned selection");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected names in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Emphasis of one entity under the current selection.
    pub fn highlight(&self, name: &str) -> Highlight {
        if self.selected.is_empty() {
            Highlight::Neutral
        } else if self.selected.contains(name) {
            Highlight::Emphasized
        } else {
            Highlight::Dimmed
        }
    }

    /// Emphasis of a link: emphasized when either endpoint is selected.
    pub fn link_highlight(&self, source: &str, target: &str) -> LinkHighlight {
        if self.selected.is_empty() {
            LinkHighlight(Highlight::Neutral)
        } else if self.selected.contains(source) || self.selected.contains(target) {
            LinkHighlight(Highlight::Emphasized)
        } else {
            LinkHighlight(Highlight::Dimmed)
        }
    }
}

/// Per-entity emphasis derived from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// Nothing is selected.
    Neutral,
    /// The entity is selected.
    Emphasized,
    /// Something else is selected.
    Dimmed,
}

impl Highlight {
    /// Highlight weight: 0 = dim, 1 = full.
    pub fn weight(&self) -> f64 {
        match self {
            Highlight::Neutral | Highlight::Emphasized => 1.0,
            Highlight::Dimmed => 0.0,
        }
    }

    /// Fill opacity for nodes and bars.
    pub fn opacity(&self) -> f64 {
        match self {
            Highlight::Neutral => 0.8,
            Highlight::Emphasized => 1.0,
            Highlight::Dimmed => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Highlight::Neutral => "neutral",
            Highlight::Emphasized => "emphasized",
            Highlight::Dimmed => "dimmed",
        }
    }
}

impl std::fmt::Display for Highlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emphasis of a link between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkHighlight(pub Highlight);

impl LinkHighlight {
    pub fn highlight(&self) -> Highlight {
        self.0
    }

    pub fn weight(&self) -> f64 {
        self.0.weight()
    }

    /// Stroke opacity for links and ribbons.
    pub fn opacity(&self) -> f64 {
        match self.0 {
            Highlight::Neutral => 0.7,
            Highlight::Emphasized => 0.9,
            Highlight::Dimmed => 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    fn names(state: &SelectionState) -> Vec<&str> {
        state.iter().collect()
    }

    #[test]
    fn test_click_toggle_sequence() {
        let mut state = SelectionState::new();

        state.click("A", false);
        assert_eq!(names(&state), vec!["A"]);

        state.click("D", true);
        assert_eq!(names(&state), vec!["A", "D"]);

        state.click("A", true);
        assert_eq!(names(&state), vec!["D"]);

        // Clear happens before the toggle, so D is added back
        state.click("D", false);
        assert_eq!(names(&state), vec!["D"]);
    }

    #[test]
    fn test_plain_click_on_sole_selection_empties() {
        let mut state = SelectionState::new();
        state.click("D", true);
        state.click("D", true);
        assert!(state.is_empty());

        state.click("D", false);
        state.click("D", true);
        assert!(state.is_empty());
    }

    #[test]
    fn test_select_pair_never_toggles_off() {
        let mut state = SelectionState::new();
        state.click("A", false);
        state.select_pair("A", "B");
        assert_eq!(names(&state), vec!["A", "B"]);
    }

    #[test]
    fn test_prune_scalars_and_array_elements() {
        let data = records(json!([
            {"Artist": "A", "Tags": ["B", "C"], "Follows": 5},
            {"Artist": "D", "Tags": ["A"], "Follows": 9}
        ]));
        let mut state = SelectionState::new();
        for name in ["A", "C", "9", "Z"] {
            state.click(name, true);
        }

        let removed = state.prune_against_dataset(&data);
        assert_eq!(removed, 1);
        assert_eq!(names(&state), vec!["A", "C", "9"]);

        state.prune_against_dataset(&data[..1]);
        assert_eq!(names(&state), vec!["A", "C"]);
    }

    #[test]
    fn test_highlight() {
        let mut state = SelectionState::new();
        assert_eq!(state.highlight("A"), Highlight::Neutral);
        assert_eq!(state.highlight("A").weight(), 1.0);

        state.click("A", false);
        assert_eq!(state.highlight("A"), Highlight::Emphasized);
        assert_eq!(state.highlight("B"), Highlight::Dimmed);
        assert_eq!(state.highlight("B").weight(), 0.0);
        assert_eq!(state.highlight("B").opacity(), 0.3);
    }

    #[test]
    fn test_link_highlight() {
        let mut state = SelectionState::new();
        assert_eq!(state.link_highlight("A", "B").opacity(), 0.7);

        state.click("B", false);
        assert_eq!(state.link_highlight("A", "B").highlight(), Highlight::Emphasized);
        assert_eq!(state.link_highlight("A", "B").opacity(), 0.9);
        assert_eq!(state.link_highlight("A", "C").opacity(), 0.1);
    }
}

//! Pure chart data models.
//!
//! Each builder maps filtered records and resolved field names to the data a
//! renderer lays out. Records whose relation field is not an array contribute
//! no relations.

mod chord;
mod force;
mod radial;
mod sunburst;

pub use chord::{chord_matrix, ChordMatrix};
pub use force::{detect_communities, force_graph, ForceGraph, ForceLink, ForceNode, DEFAULT_GROUP, RELATION_GROUP};
pub use radial::{radial_bars, RadialBar, RadialChart};
pub use sunburst::{sunburst_tree, SunburstNode, UNKNOWN_GROUP};

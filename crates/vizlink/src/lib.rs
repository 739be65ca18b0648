//! Vizlink: field inference and linked-view coordination for record datasets.
//!
//! Vizlink takes an arbitrary JSON dataset, works out what each field is
//! (categorical, numerical, array relation, date, ...), picks sensible fields
//! for four linked charts, and keeps selection, filters and colors consistent
//! across all of them.
//!
//! # Core Principles
//!
//! - **Canonical data**: filters always re-derive the working set from the loaded records
//! - **Entity identity**: selection and colors match names by string, across every field
//! - **Pure renderers**: charts receive precomputed models, colors and highlights
//!
//! # Example
//!
//! ```no_run
//! use vizlink::{ChartKind, Dashboard, FilterPredicate};
//!
//! let mut dashboard = Dashboard::new();
//! dashboard.load_file("artists.json").unwrap();
//!
//! dashboard
//!     .set_filter(FilterPredicate::categorical("Region", ["Asia"]))
//!     .unwrap();
//! dashboard.click("The Vibe", false);
//!
//! let frame = dashboard.render_frame(ChartKind::Chord);
//! println!("Records: {}", frame.records.len());
//! println!("Colors: {}", dashboard.colors().len());
//! ```

pub mod chart;
pub mod color;
pub mod error;
pub mod filter;
pub mod inference;
pub mod input;
pub mod recommend;
pub mod render;
pub mod schema;
pub mod selection;
pub mod value;

mod dashboard;

pub use crate::dashboard::{Dashboard, DashboardConfig, DashboardSummary};
pub use color::{build_color_map, ColorMap, PALETTE};
pub use error::{Result, VizlinkError};
pub use filter::{apply_filters, FilterPredicate, FilterSet, FilterWidget};
pub use inference::{classify, InferenceConfig, TypeInferrer};
pub use input::{DataLoader, SampleDataset, SourceMetadata};
pub use recommend::{recommend, FieldSelections};
pub use render::{ChartInput, ChartKind, ChartModel, ChartRenderer, RenderDispatch, RenderFrame};
pub use schema::{DatasetSchema, FieldClassification, FieldType, SlotKind};
pub use selection::{Highlight, SelectionState};
pub use value::Record;

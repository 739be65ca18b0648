//! Input loading and normalization.

mod loader;
mod normalize;
mod samples;
mod source;

pub use loader::{DataLoader, LoadedData};
pub use normalize::{flatten_records, normalize, normalize_with, NormalizeConfig, Normalized, RecordOrigin};
pub use samples::SampleDataset;
pub use source::SourceMetadata;

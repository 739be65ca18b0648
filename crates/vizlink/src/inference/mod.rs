//! Inference engine for field-type classification.

mod classifier;
mod dates;

pub use classifier::{classify, InferenceConfig, TypeInferrer};
pub use dates::is_date_string;

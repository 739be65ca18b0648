//! Filter engine: predicates over the canonical dataset.

mod predicate;
mod widgets;

pub use predicate::{apply_filters, FilterPredicate, FilterSet};
pub use widgets::{get_min_max, get_unique_values, plan_filter_widgets, FilterWidget, MinMax};

//! Core data structures: the dataset builder and its bounds.

mod bounds;
mod dataset;
mod source;

pub use bounds::{BoundsTable, RangeTracker};
pub use dataset::ScaledData;
pub use source::DataSource;

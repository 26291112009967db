//! # scaled-data
//!
//! Dataset preparation for symbolic regression.
//!
//! Fitness cases are accumulated row by row while per-column bounds and a
//! running target mean are tracked. The target is then min-max scaled to
//! `[0, 1]`, and the whole dataset can be exported normalized together with
//! the bounds needed to invert the transform.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod transform;
pub mod utils;

pub use error::{Column, Result, ScalingError};

pub mod prelude {
    pub use crate::config::{CsvOptions, ScalingConfig};
    pub use crate::core::{BoundsTable, DataSource, ScaledData};
    pub use crate::error::{Column, Result, ScalingError};
    pub use crate::io::{load_csv, read_csv};
    pub use crate::transform::{DegeneratePolicy, MinMaxScale};
    pub use crate::utils::RunningMean;
}

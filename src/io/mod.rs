//! File formats: CSV ingestion, normalized dataset export and bounds files.
//!
//! # Example
//!
//! ```no_run
//! use scaled_data::prelude::*;
//!
//! let data = load_csv("train.csv", &CsvOptions::default(), &ScalingConfig::default())?;
//! data.normalize_values("train_normalized.csv", "train_bounds.txt")?;
//!
//! let bounds = BoundsTable::read_from("train_bounds.txt")?;
//! let prediction = bounds.denormalize_target(0.42);
//! # let _ = prediction;
//! # Ok::<(), scaled_data::ScalingError>(())
//! ```

pub mod bounds;
pub mod export;
pub mod format;
pub mod loader;

pub use export::{write_normalized, write_text};
pub use format::format_double;
pub use loader::{load_csv, read_csv};

//! Utility types shared across the library.

pub mod stats;

pub use stats::RunningMean;

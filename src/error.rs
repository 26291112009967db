//! Error types for the scaled-data library.

use std::fmt;
use thiserror::Error;

/// Result type alias for scaling operations.
pub type Result<T> = std::result::Result<T, ScalingError>;

/// A column of the dataset, used to locate bound-related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The target (output) column.
    Target,
    /// A feature (input) column by zero-based position.
    Feature(usize),
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Target => write!(f, "target"),
            Column::Feature(j) => write!(f, "feature {}", j),
        }
    }
}

/// Errors that can occur while building, scaling or exporting a dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    /// Row or feature count was zero at construction.
    #[error("invalid dimension: {rows} fitness cases x {features} features")]
    InvalidDimension { rows: usize, features: usize },

    /// Row or column index outside the allocated range.
    #[error("index out of range: {index} (size: {size})")]
    IndexOutOfRange { index: usize, size: usize },

    /// A row does not have one value per feature.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Min equals max, so min-max scaling would divide by zero.
    #[error("degenerate range in {column}: min == max == {value}")]
    DegenerateRange { column: Column, value: f64 },

    /// `max - min` is not finite, so every scaled value would collapse to 0 or NaN.
    #[error("range of {column} is not finite: [{min}, {max}]")]
    NonFiniteRange { column: Column, min: f64, max: f64 },

    /// NaN or ±Infinity offered as a fitness-case value.
    #[error("non-finite value {value} for {column} in fitness case {index}")]
    NonFiniteValue {
        column: Column,
        index: usize,
        value: f64,
    },

    /// No value has been observed for a column whose bounds are required.
    #[error("no values observed for {0}")]
    EmptyColumn(Column),

    /// Export requested before the current target values were scaled.
    #[error("target must be scaled before export")]
    ScaleRequired,

    /// Malformed numeric input.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Opening, writing or persisting a file failed.
    #[error("I/O failure on {path}: {message}")]
    IoFailure { path: String, message: String },
}

impl ScalingError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, err: impl fmt::Display) -> Self {
        ScalingError::IoFailure {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

//! Linear min-max scaling.
//!
//! Maps an observed range `[min, max]` onto `[0, 1]` and back.

use crate::error::{Column, Result, ScalingError};

/// What to do when a column's min equals its max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with [`ScalingError::DegenerateRange`] before anything is written.
    #[default]
    Error,
    /// Divide anyway; scaled values become NaN, ±Infinity or collapse to 0.
    Propagate,
}

/// Parameters of a min-max transform for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScale {
    /// Smallest observed value, mapped to 0.
    pub min: f64,
    /// Largest observed value, mapped to 1.
    pub max: f64,
}

impl MinMaxScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the observed range.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// True when min == max and the transform would divide by zero.
    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }

    /// x_scaled = (x - min) / (max - min)
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }

    /// x = x_scaled * (max - min) + min
    pub fn inverse(&self, scaled: f64) -> f64 {
        scaled * self.range() + self.min
    }

    /// Scale a whole slice.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.transform(x)).collect()
    }

    /// True when `max - min` is NaN or overflows to infinity.
    pub fn is_unbounded(&self) -> bool {
        !self.range().is_finite()
    }

    /// Check the range against `policy`.
    ///
    /// A zero width and a non-finite width are both rejected under
    /// [`DegeneratePolicy::Error`]. Under [`DegeneratePolicy::Propagate`] they
    /// are logged and accepted.
    pub fn validate(&self, column: Column, policy: DegeneratePolicy) -> Result<()> {
        let err = if self.is_degenerate() {
            ScalingError::DegenerateRange {
                column,
                value: self.min,
            }
        } else if self.is_unbounded() {
            ScalingError::NonFiniteRange {
                column,
                min: self.min,
                max: self.max,
            }
        } else {
            return Ok(());
        };

        match policy {
            DegeneratePolicy::Error => Err(err),
            DegeneratePolicy::Propagate => {
                tracing::warn!(%column, min = self.min, max = self.max, "{}", err);
                Ok(())
            }
        }
    }
}

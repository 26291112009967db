//! Running bounds and the bounds table needed to invert normalization.

use crate::error::{Column, Result, ScalingError};
use crate::transform::MinMaxScale;

/// Running min/max over a stream of values.
///
/// Starts unset. The first observation sets both bounds; afterwards the
/// minimum only decreases and the maximum only increases, using strict
/// comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeTracker {
    bounds: Option<MinMaxScale>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one value into the bounds.
    pub fn observe(&mut self, value: f64) {
        match self.bounds.as_mut() {
            None => self.bounds = Some(MinMaxScale::new(value, value)),
            Some(b) => {
                if value < b.min {
                    b.min = value;
                }
                if value > b.max {
                    b.max = value;
                }
            }
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.bounds.map(|b| b.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.bounds.map(|b| b.max)
    }

    /// The observed range, if any value has been seen.
    pub fn scale(&self) -> Option<MinMaxScale> {
        self.bounds
    }
}

/// Per-feature bounds plus target bounds.
///
/// This is the content of the bounds file written next to a normalized
/// dataset, and everything a downstream model needs to map normalized
/// inputs and scaled predictions back to the original units.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsTable {
    features: Vec<MinMaxScale>,
    target: MinMaxScale,
}

impl BoundsTable {
    pub fn new(features: Vec<MinMaxScale>, target: MinMaxScale) -> Self {
        Self { features, target }
    }

    pub fn features(&self) -> &[MinMaxScale] {
        &self.features
    }

    pub fn feature(&self, column: usize) -> Result<&MinMaxScale> {
        self.features
            .get(column)
            .ok_or(ScalingError::IndexOutOfRange {
                index: column,
                size: self.features.len(),
            })
    }

    pub fn target(&self) -> &MinMaxScale {
        &self.target
    }

    /// Every column with its bounds, features first and target last.
    pub fn columns(&self) -> impl Iterator<Item = (Column, &MinMaxScale)> {
        self.features
            .iter()
            .enumerate()
            .map(|(j, s)| (Column::Feature(j), s))
            .chain(std::iter::once((Column::Target, &self.target)))
    }

    pub fn normalize_feature(&self, column: usize, value: f64) -> Result<f64> {
        Ok(self.feature(column)?.transform(value))
    }

    pub fn denormalize_feature(&self, column: usize, normalized: f64) -> Result<f64> {
        Ok(self.feature(column)?.inverse(normalized))
    }

    /// Map a scaled prediction back to target units.
    pub fn denormalize_target(&self, scaled: f64) -> f64 {
        self.target.inverse(scaled)
    }

    /// Invert one normalized dataset row (features followed by the target).
    pub fn denormalize_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        let expected = self.features.len() + 1;
        if row.len() != expected {
            return Err(ScalingError::DimensionMismatch {
                expected,
                got: row.len(),
            });
        }
        Ok(self
            .columns()
            .zip(row)
            .map(|((_, scale), &v)| scale.inverse(v))
            .collect())
    }
}

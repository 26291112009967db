//! Dataset builder with running bounds and target scaling.

use std::path::Path;

use crate::config::ScalingConfig;
use crate::core::bounds::{BoundsTable, RangeTracker};
use crate::core::source::DataSource;
use crate::error::{Column, Result, ScalingError};
use crate::io::export;
use crate::utils::RunningMean;

/// Fitness cases with target values scaled to `[0, 1]`.
///
/// Scaling the target frees the search from having to find the proper
/// scale of the output, so it can focus on the shape of the solution
/// (Vladislavleva, 2008).
///
/// Rows are inserted by caller-supplied index while per-column bounds and
/// the target mean are tracked incrementally. Once every row is in,
/// [`scale_target`](Self::scale_target) computes the scaled target and
/// [`normalize_values`](Self::normalize_values) exports the normalized
/// dataset together with its bounds.
///
/// # Example
/// ```
/// use scaled_data::prelude::*;
///
/// let mut data = ScaledData::new(3, 1)?;
/// data.add_row(&[0.0], 1.0, 0)?;
/// data.add_row(&[10.0], 5.0, 1)?;
/// data.add_row(&[5.0], 3.0, 2)?;
///
/// assert_eq!(data.scale_target()?, &[0.0, 1.0, 0.5]);
/// assert_eq!(data.target_mean(), Some(3.0));
/// # Ok::<(), scaled_data::ScalingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScaledData {
    number_of_fitness_cases: usize,
    number_of_features: usize,
    fitness_cases: Vec<Vec<f64>>,
    target: Vec<f64>,
    scaled_target: Vec<f64>,
    target_bounds: RangeTracker,
    feature_bounds: Vec<RangeTracker>,
    target_mean: RunningMean,
    config: ScalingConfig,
    /// `scaled_target` reflects every insertion so far.
    scaled: bool,
}

impl ScaledData {
    /// Allocate a zero-filled dataset with the default configuration.
    pub fn new(number_of_fitness_cases: usize, number_of_features: usize) -> Result<Self> {
        Self::with_config(
            number_of_fitness_cases,
            number_of_features,
            ScalingConfig::default(),
        )
    }

    pub fn with_config(
        number_of_fitness_cases: usize,
        number_of_features: usize,
        config: ScalingConfig,
    ) -> Result<Self> {
        if number_of_fitness_cases == 0 || number_of_features == 0 {
            return Err(ScalingError::InvalidDimension {
                rows: number_of_fitness_cases,
                features: number_of_features,
            });
        }

        tracing::debug!(
            rows = number_of_fitness_cases,
            features = number_of_features,
            "allocating dataset"
        );

        Ok(Self {
            number_of_fitness_cases,
            number_of_features,
            fitness_cases: vec![vec![0.0; number_of_features]; number_of_fitness_cases],
            target: vec![0.0; number_of_fitness_cases],
            scaled_target: vec![0.0; number_of_fitness_cases],
            target_bounds: RangeTracker::new(),
            feature_bounds: vec![RangeTracker::new(); number_of_features],
            target_mean: RunningMean::new(),
            config,
            scaled: false,
        })
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index >= self.number_of_fitness_cases {
            return Err(ScalingError::IndexOutOfRange {
                index,
                size: self.number_of_fitness_cases,
            });
        }
        Ok(())
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.number_of_features {
            return Err(ScalingError::IndexOutOfRange {
                index: column,
                size: self.number_of_features,
            });
        }
        Ok(())
    }

    fn check_finite(value: f64, index: usize, column: Column) -> Result<()> {
        if !value.is_finite() {
            return Err(ScalingError::NonFiniteValue {
                column,
                index,
                value,
            });
        }
        Ok(())
    }

    /// Store a target value and fold it into the running bounds and mean.
    ///
    /// Writing the same index twice keeps the last value, but the mean and
    /// the bounds still include the overwritten one. NaN and ±Infinity are
    /// rejected.
    pub fn add_target_value(&mut self, value: f64, index: usize) -> Result<()> {
        self.check_row(index)?;
        Self::check_finite(value, index, Column::Target)?;
        self.target[index] = value;
        self.target_mean.add(value);
        self.target_bounds.observe(value);
        self.scaled = false;
        Ok(())
    }

    /// Store one feature value and fold it into that column's bounds.
    pub fn add_feature_value(&mut self, value: f64, index: usize, column: usize) -> Result<()> {
        self.check_row(index)?;
        self.check_column(column)?;
        Self::check_finite(value, index, Column::Feature(column))?;
        self.fitness_cases[index][column] = value;
        self.feature_bounds[column].observe(value);
        self.scaled = false;
        Ok(())
    }

    /// Store a full fitness case: one value per feature plus its target.
    ///
    /// Nothing is modified if the index, the row length or any value is
    /// invalid.
    pub fn add_row(&mut self, features: &[f64], target: f64, index: usize) -> Result<()> {
        self.check_row(index)?;
        if features.len() != self.number_of_features {
            return Err(ScalingError::DimensionMismatch {
                expected: self.number_of_features,
                got: features.len(),
            });
        }
        for (column, &value) in features.iter().enumerate() {
            Self::check_finite(value, index, Column::Feature(column))?;
        }
        Self::check_finite(target, index, Column::Target)?;

        tracing::trace!(index, target, "adding fitness case");

        for (column, &value) in features.iter().enumerate() {
            self.fitness_cases[index][column] = value;
            self.feature_bounds[column].observe(value);
        }
        self.add_target_value(target, index)
    }

    /// Compute the `[0, 1]` target from the current bounds.
    ///
    /// Call after every target value has been added. Calling again without
    /// new insertions yields the same values.
    pub fn scale_target(&mut self) -> Result<&[f64]> {
        let scale = self
            .target_bounds
            .scale()
            .ok_or(ScalingError::EmptyColumn(Column::Target))?;
        scale.validate(Column::Target, self.config.degenerate_policy)?;

        tracing::debug!(
            min = scale.min,
            max = scale.max,
            observed = self.target_mean.count(),
            "scaling target"
        );

        for (scaled, &value) in self.scaled_target.iter_mut().zip(&self.target) {
            *scaled = scale.transform(value);
        }
        self.scaled = true;
        Ok(&self.scaled_target)
    }

    /// True once [`scale_target`](Self::scale_target) ran after the last insertion.
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    pub fn feature_bounds(&self) -> &[RangeTracker] {
        &self.feature_bounds
    }

    pub fn feature_min(&self, column: usize) -> Option<f64> {
        self.feature_bounds.get(column).and_then(|b| b.min())
    }

    pub fn feature_max(&self, column: usize) -> Option<f64> {
        self.feature_bounds.get(column).and_then(|b| b.max())
    }

    /// Bounds of every column, checked against the degenerate policy.
    pub fn bounds_table(&self) -> Result<BoundsTable> {
        let policy = self.config.degenerate_policy;

        let mut features = Vec::with_capacity(self.number_of_features);
        for (j, tracker) in self.feature_bounds.iter().enumerate() {
            let scale = tracker
                .scale()
                .ok_or(ScalingError::EmptyColumn(Column::Feature(j)))?;
            scale.validate(Column::Feature(j), policy)?;
            features.push(scale);
        }

        let target = self
            .target_bounds
            .scale()
            .ok_or(ScalingError::EmptyColumn(Column::Target))?;
        target.validate(Column::Target, policy)?;

        Ok(BoundsTable::new(features, target))
    }

    /// Normalized rows: each feature mapped to `[0, 1]`, then the scaled target.
    pub fn normalized_rows(&self) -> Result<Vec<Vec<f64>>> {
        if !self.scaled {
            return Err(ScalingError::ScaleRequired);
        }
        let bounds = self.bounds_table()?;
        Ok(self.normalize_with(&bounds))
    }

    fn normalize_with(&self, bounds: &BoundsTable) -> Vec<Vec<f64>> {
        self.fitness_cases
            .iter()
            .zip(&self.scaled_target)
            .map(|(row, &scaled)| {
                row.iter()
                    .zip(bounds.features())
                    .map(|(&x, scale)| scale.transform(x))
                    .chain(std::iter::once(scaled))
                    .collect()
            })
            .collect()
    }

    /// Write the normalized dataset and the bounds file.
    ///
    /// Both files are replaced entirely. Validation happens before either
    /// file is touched; with `atomic_writes` a failed write leaves the
    /// previous destination intact.
    pub fn normalize_values<P, Q>(&self, data_path: P, bounds_path: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        if !self.scaled {
            return Err(ScalingError::ScaleRequired);
        }
        let bounds = self.bounds_table()?;
        let rows = self.normalize_with(&bounds);
        let atomic = self.config.atomic_writes;

        export::write_normalized(&data_path, &rows, atomic)?;
        bounds.write_to(&bounds_path, atomic)?;

        tracing::info!(
            rows = self.number_of_fitness_cases,
            features = self.number_of_features,
            data = %data_path.as_ref().display(),
            bounds = %bounds_path.as_ref().display(),
            "exported normalized dataset"
        );
        Ok(())
    }
}

impl DataSource for ScaledData {
    fn input_values(&self) -> &[Vec<f64>] {
        &self.fitness_cases
    }

    fn target_values(&self) -> &[f64] {
        &self.target
    }

    fn scaled_target_values(&self) -> &[f64] {
        &self.scaled_target
    }

    fn target_mean(&self) -> Option<f64> {
        self.target_mean.mean()
    }

    fn target_max(&self) -> Option<f64> {
        self.target_bounds.max()
    }

    fn target_min(&self) -> Option<f64> {
        self.target_bounds.min()
    }

    fn number_of_fitness_cases(&self) -> usize {
        self.number_of_fitness_cases
    }

    fn number_of_features(&self) -> usize {
        self.number_of_features
    }
}

//! Read-only view over a fitness-case dataset.

/// Read access to a dataset of fitness cases and its target statistics.
///
/// Fitness evaluation only needs this view; how the data was stored or
/// loaded stays behind the implementation.
pub trait DataSource {
    /// Raw feature rows, one per fitness case.
    fn input_values(&self) -> &[Vec<f64>];

    /// Raw target values, index-aligned with [`input_values`](Self::input_values).
    fn target_values(&self) -> &[f64];

    /// Target values mapped to `[0, 1]`.
    fn scaled_target_values(&self) -> &[f64];

    /// Arithmetic mean of every target value added so far.
    fn target_mean(&self) -> Option<f64>;

    fn target_max(&self) -> Option<f64>;

    fn target_min(&self) -> Option<f64>;

    fn number_of_fitness_cases(&self) -> usize;

    fn number_of_features(&self) -> usize;
}

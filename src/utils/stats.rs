//! Streaming statistics.

/// Incremental arithmetic mean that does not keep past values.
///
/// Uses the `mean += (x - mean) / n` update, which stays accurate for long
/// streams where a plain running sum would lose precision.
///
/// # Example
/// ```
/// use scaled_data::utils::RunningMean;
///
/// let mut mean = RunningMean::new();
/// assert_eq!(mean.mean(), None);
///
/// for x in [2.0, 4.0, 6.0] {
///     mean.add(x);
/// }
/// assert_eq!(mean.mean(), Some(4.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningMean {
    count: usize,
    mean: f64,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one value into the mean.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    /// Current mean, or `None` if nothing has been added.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean)
        }
    }

    /// Number of values added so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Extend<f64> for RunningMean {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

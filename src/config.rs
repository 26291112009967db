//! Configuration for scaling, export and CSV ingestion.

use crate::transform::DegeneratePolicy;

/// Configuration for scaling and export.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingConfig {
    /// Behaviour when a column has min == max.
    pub degenerate_policy: DegeneratePolicy,
    /// Write exports to a temporary file and rename into place.
    pub atomic_writes: bool,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::Error,
            atomic_writes: true,
        }
    }
}

impl ScalingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Write directly to the destination paths; a failed export may leave
    /// truncated files behind.
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }
}

/// Layout of an input CSV file.
///
/// The default matches the evogpj layout: no header row, comma separated,
/// target in the last column.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// First record is a header row.
    pub has_headers: bool,
    /// Field delimiter.
    pub delimiter: u8,
    /// Zero-based target column (None for the last column).
    pub target_column: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: b',',
            target_column: None,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_target_column(mut self, column: usize) -> Self {
        self.target_column = Some(column);
        self
    }
}

//! Data transformations applied to fitness cases.
//!
//! # Example
//!
//! ```
//! use scaled_data::transform::MinMaxScale;
//!
//! let scale = MinMaxScale::new(1.0, 5.0);
//! assert_eq!(scale.apply(&[1.0, 5.0, 3.0]), vec![0.0, 1.0, 0.5]);
//! assert_eq!(scale.inverse(0.5), 3.0);
//! ```

pub mod scale;

pub use scale::{DegeneratePolicy, MinMaxScale};

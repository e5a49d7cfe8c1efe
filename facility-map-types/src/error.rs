//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum FacilityMapTypesError {
    /// Coordinate value is not a finite number or is out of its valid range.
    #[error("invalid {axis} value {value}: must be a finite number in [{min}, {max}]")]
    InvalidCoordinate {
        /// Name of the coordinate axis (`lat` or `lng`).
        axis: &'static str,
        /// The rejected value.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },
}

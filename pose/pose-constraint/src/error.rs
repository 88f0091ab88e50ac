//! Error types for constraint configuration and batch processing.

use thiserror::Error;

/// Errors that can occur when building a catalog or batching bodies.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConstraintError {
    /// A constraint axis was zero-length or contained non-finite values.
    #[error("constraint axis must be a finite non-zero vector")]
    InvalidAxis,

    /// A constraint's lower bound exceeded its upper bound.
    #[error("invalid constraint bounds: min {min} > max {max} (degrees)")]
    InvalidBounds {
        /// The offending lower bound.
        min: f64,
        /// The offending upper bound.
        max: f64,
    },

    /// The multi-body entry point was given mismatched slice lengths.
    #[error("pose and filter-state slices differ in length: {poses} poses, {states} states")]
    BodyCountMismatch {
        /// Number of pose snapshots supplied.
        poses: usize,
        /// Number of filter states supplied.
        states: usize,
    },
}

impl ConstraintError {
    /// Check if this error indicates an invalid catalog entry (as opposed
    /// to a per-call usage error).
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Self::InvalidAxis | Self::InvalidBounds { .. })
    }
}

//! Error types for pose data handling.

use thiserror::Error;

/// Errors that can occur when constructing pose data from raw tracker
/// output.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoseError {
    /// A joint index outside the fixed skeleton was referenced.
    #[error("invalid joint index: {0} (expected 0..{max})", max = crate::JOINT_COUNT)]
    InvalidJointIndex(usize),

    /// An unrecognized raw tracking-state value from the device boundary.
    #[error("invalid tracking state value: {0} (expected 0..=3)")]
    InvalidTrackingState(u8),
}

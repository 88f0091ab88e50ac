//! Core types for skeletal body-tracking poses.
//!
//! This crate provides the foundational types shared by pose filters and
//! their consumers:
//!
//! - [`JointId`] - the fixed 32-joint humanoid skeleton, with parent and
//!   mirror topology
//! - [`TrackingState`] - per-joint confidence from the upstream tracker
//! - [`JointPose`] / [`BodyPose`] - one body's orientation snapshot for
//!   one frame
//! - [`BodyFilterState`] - the small persistent record a filter keeps per
//!   tracked body across frames
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no filtering behavior and no
//! device I/O. They're the common language between:
//!
//! - Body-tracking sources (device SDKs, recorded captures)
//! - Pose filters (orientation constraints, downstream smoothing)
//! - Consumers (renderers, avatar retargeters, loggers)
//!
//! # Topology
//!
//! The skeleton is a rooted tree: the pelvis is joint 0 and its own
//! parent. [`JointId::ALL`] lists joints in topology order, so a single
//! forward pass visits every parent before its children. Left/right
//! counterparts are linked through [`JointId::mirror`].
//!
//! # Example
//!
//! ```
//! use pose_types::{BodyPose, JointId, TrackingState};
//!
//! let mut pose = BodyPose::new(1);
//! pose[JointId::Neck].tracking = TrackingState::Tracked;
//!
//! assert_eq!(JointId::Neck.parent(), JointId::SpineChest);
//! assert_eq!(pose.tracked_count(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/pose-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic for type definitions
#![allow(
    clippy::missing_const_for_fn,  // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,    // Error docs added where non-obvious
)]

mod error;
mod joint;
mod pose;
mod state;

pub use error::PoseError;
pub use joint::{JointId, TrackingState, JOINT_COUNT};
pub use pose::{BodyPose, JointPose};
pub use state::BodyFilterState;

// Re-export math types for convenience
pub use nalgebra::{UnitQuaternion, Vector3};

/// Result type for pose data operations.
pub type Result<T> = std::result::Result<T, PoseError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline_types() {
        let mut pose = BodyPose::new(12);
        let mut state = BodyFilterState::new(12);

        pose[JointId::ElbowLeft].tracking = TrackingState::Tracked;
        state.set_hinge_angle(JointId::ElbowLeft, 30.0);

        assert_eq!(pose.body_id(), state.body_id());
        assert!(state.hinge_angle(JointId::ElbowLeft) > 0.0);
    }

    #[test]
    fn test_joint_index_round_trip() {
        for joint in JointId::ALL {
            assert_eq!(JointId::try_from(joint.index()).unwrap(), joint);
        }
    }
}

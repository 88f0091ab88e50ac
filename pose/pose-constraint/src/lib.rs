//! Joint-orientation constraints for skeletal body tracking.
//!
//! Raw per-frame poses from a body tracker routinely contain joints bent
//! past anything a human skeleton allows - inferred joints especially.
//! This crate corrects each joint's rotation so it stays within
//! biomechanically plausible limits, working purely on orientations: no
//! inverse kinematics, no smoothing, no collision handling.
//!
//! # Constraint Kinds
//!
//! - [`ConstraintKind::AxisLimit`]: clamp one Euler component of the
//!   parent-local rotation (spine twist)
//! - [`ConstraintKind::SwingTwist`]: bound the deflection of the joint
//!   axis and the spin about it separately (shoulders, hips, neck)
//! - [`ConstraintKind::Hinge`]: 1-DOF joints with a signed accumulated
//!   angle tracked across frames (elbows, knees)
//!
//! The hinge accumulator is the only cross-frame state; it lives in
//! [`pose_types::BodyFilterState`], owned by whoever owns the body's
//! tracking lifetime.
//!
//! # Usage
//!
//! Build a [`ConstraintCatalog`] once at start-up, then call
//! [`constrain_body`] once per tracked body per frame:
//!
//! ```
//! use pose_constraint::{constrain_body, ConstraintCatalog};
//! use pose_types::{BodyFilterState, BodyPose, JointId, TrackingState};
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let catalog = ConstraintCatalog::with_default_constraints();
//!
//! // Owned by the component that owns the body's tracking lifetime.
//! let mut state = BodyFilterState::new(1);
//!
//! // Produced fresh by the tracker every frame.
//! let mut pose = BodyPose::new(1);
//! for joint in [JointId::Pelvis, JointId::SpineNavel, JointId::SpineChest,
//!               JointId::ClavicleLeft, JointId::ShoulderLeft, JointId::ElbowLeft] {
//!     pose[joint].tracking = TrackingState::Tracked;
//!     pose[joint].orientation =
//!         UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.02);
//! }
//! // An elbow bent to 170 degrees - past the 150 degree hinge bound.
//! let parent = pose[JointId::ShoulderLeft].orientation;
//! pose[JointId::ElbowLeft].orientation =
//!     parent * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 170.0_f64.to_radians());
//!
//! constrain_body(&mut pose, &mut state, &catalog);
//!
//! assert!((state.hinge_angle(JointId::ElbowLeft) - 150.0).abs() < 1e-6);
//! ```
//!
//! # Catalogs Are Values
//!
//! A catalog is an explicitly owned, immutable-after-setup value passed by
//! reference into every call - there is no process-wide registry, so
//! independent skeletons (and tests) can use different catalogs
//! concurrently. One catalog may be shared across any number of bodies;
//! per-body state never leaks into it.
//!
//! # Real-Time Profile
//!
//! The per-frame pass mutates the caller-owned pose in place, allocates
//! nothing, never blocks, and runs in `O(joints x constraints)` - around
//! 32 joints with at most a few constraints each. For multi-body scenes
//! [`constrain_bodies_parallel`] fans bodies out over rayon with a
//! sequential fallback for small counts.

#![doc(html_root_url = "https://docs.rs/pose-constraint/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

mod catalog;
mod constrain;
mod error;
mod parallel;
mod rotation;

pub use catalog::{AxisConstraint, ConstraintCatalog, ConstraintKind};
pub use constrain::constrain_body;
pub use error::ConstraintError;
pub use parallel::constrain_bodies_parallel;
pub use rotation::{
    any_orthogonal, axis_angle_deg, euler_deg, from_euler_deg, mirror_orientation,
    orthonormalize, rotate_towards, shortest_arc,
};

// Re-export the data types the public API is written in terms of
pub use pose_types::{BodyFilterState, BodyPose, JointId, JointPose, TrackingState, JOINT_COUNT};

/// Result type for constraint operations.
pub type Result<T> = std::result::Result<T, ConstraintError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_catalog_and_constrain_round_trip() {
        let mut catalog = ConstraintCatalog::empty();
        catalog
            .add_constraint(JointId::Neck, ConstraintKind::SwingTwist, Vector3::y(), 50.0, 80.0)
            .unwrap();

        let mut pose = BodyPose::new(1);
        let mut state = BodyFilterState::new(1);
        for joint in [JointId::Pelvis, JointId::SpineNavel, JointId::SpineChest, JointId::Neck] {
            pose[joint].tracking = TrackingState::Tracked;
            pose[joint].orientation = axis_angle_deg(&Vector3::y(), 2.0);
        }
        let parent = pose[JointId::SpineChest].orientation;
        pose[JointId::Neck].orientation = parent * axis_angle_deg(&Vector3::x(), 85.0);

        constrain_body(&mut pose, &mut state, &catalog);

        let local = parent.inverse() * pose[JointId::Neck].orientation;
        let swing = Vector3::y().angle(&(local * Vector3::y())).to_degrees();
        assert!(swing <= 50.0 + 1e-7);
    }
}

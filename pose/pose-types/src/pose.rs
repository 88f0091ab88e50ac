//! Per-joint and per-body pose snapshots.
//!
//! A [`BodyPose`] is one tracked body's complete set of joint orientations
//! at a single instant. The upstream tracker produces a fresh snapshot
//! every frame; downstream filters mutate the orientations in place.

use nalgebra::UnitQuaternion;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::joint::{JointId, TrackingState, JOINT_COUNT};

/// One joint's state within a body pose snapshot.
///
/// The orientation is expressed in the shared world frame, not relative to
/// the parent joint. An identity orientation is the "not yet populated"
/// sentinel: trackers emit it for joints they have produced no estimate
/// for, and filters skip such joints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointPose {
    /// Tracking confidence for this joint this frame.
    pub tracking: TrackingState,
    /// World-frame orientation (identity = unset).
    pub orientation: UnitQuaternion<f64>,
    /// Mirrored-view variant of the orientation, for renderers that draw
    /// the skeleton from the opposite viewing convention.
    pub mirrored: UnitQuaternion<f64>,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            tracking: TrackingState::NotTracked,
            orientation: UnitQuaternion::identity(),
            mirrored: UnitQuaternion::identity(),
        }
    }
}

impl JointPose {
    /// Create a joint pose with the given tracking state and orientation.
    ///
    /// The mirrored variant starts equal to the orientation; filters and
    /// renderers derive the true mirrored form downstream.
    #[must_use]
    pub fn new(tracking: TrackingState, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            tracking,
            orientation,
            mirrored: orientation,
        }
    }

    /// Check if the orientation is still the unset sentinel.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.orientation == UnitQuaternion::identity()
    }

    /// Check if the pose contains `NaN` or `Inf` components.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.orientation.coords.iter().all(|c| c.is_finite())
            && self.mirrored.coords.iter().all(|c| c.is_finite())
    }
}

/// A complete pose snapshot for one tracked body at one instant.
///
/// Joint slots are ordered by [`JointId`] topology order. The snapshot
/// carries the tracker-assigned body identity so that per-body filter
/// state can detect when a slot has been re-acquired by a different
/// person.
///
/// # Example
///
/// ```
/// use pose_types::{BodyPose, JointId, TrackingState};
/// use nalgebra::UnitQuaternion;
///
/// let mut pose = BodyPose::new(7);
/// pose[JointId::ElbowLeft].tracking = TrackingState::Tracked;
/// pose[JointId::ElbowLeft].orientation =
///     UnitQuaternion::from_euler_angles(0.3, 0.0, 0.0);
///
/// assert_eq!(pose.body_id(), 7);
/// assert!(!pose[JointId::ElbowLeft].is_unset());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyPose {
    body_id: u64,
    joints: [JointPose; JOINT_COUNT],
}

impl BodyPose {
    /// Create an empty pose snapshot for the given tracked body.
    ///
    /// All joints start untracked with the identity (unset) orientation.
    #[must_use]
    pub fn new(body_id: u64) -> Self {
        Self {
            body_id,
            joints: [JointPose::default(); JOINT_COUNT],
        }
    }

    /// Get the tracker-assigned body identity.
    #[must_use]
    pub fn body_id(&self) -> u64 {
        self.body_id
    }

    /// Get a joint's pose.
    #[must_use]
    pub fn joint(&self, id: JointId) -> &JointPose {
        &self.joints[id.index()]
    }

    /// Get a joint's pose mutably.
    pub fn joint_mut(&mut self, id: JointId) -> &mut JointPose {
        &mut self.joints[id.index()]
    }

    /// Iterate over all joints in topology order.
    pub fn iter(&self) -> impl Iterator<Item = (JointId, &JointPose)> {
        JointId::ALL.iter().map(|&id| (id, &self.joints[id.index()]))
    }

    /// Count the joints with a usable (tracked or inferred) state.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.joints.iter().filter(|j| j.tracking.is_tracked()).count()
    }

    /// Check if every joint pose is free of `NaN`/`Inf` components.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.joints.iter().all(JointPose::is_finite)
    }
}

impl std::ops::Index<JointId> for BodyPose {
    type Output = JointPose;

    fn index(&self, id: JointId) -> &Self::Output {
        self.joint(id)
    }
}

impl std::ops::IndexMut<JointId> for BodyPose {
    fn index_mut(&mut self, id: JointId) -> &mut Self::Output {
        self.joint_mut(id)
    }
}

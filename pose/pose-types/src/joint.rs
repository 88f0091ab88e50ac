//! Joint identifiers, skeleton topology, and tracking confidence.
//!
//! The skeleton is a fixed 32-joint humanoid tree rooted at the pelvis.
//! Topology (parent and mirror maps) is shared read-only across all tracked
//! bodies and never changes at runtime.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PoseError;

/// Number of joints in the humanoid skeleton.
pub const JOINT_COUNT: usize = 32;

/// Identifier for a joint in the humanoid skeleton.
///
/// Variants are declared in topology order: every joint's parent has a
/// smaller discriminant than the joint itself, so iterating [`JointId::ALL`]
/// visits parents before children. The pelvis is the root and is its own
/// parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum JointId {
    /// Pelvis - the root of the skeleton.
    Pelvis = 0,
    /// Lower spine, at navel height.
    SpineNavel,
    /// Upper spine, at chest height.
    SpineChest,
    /// Base of the neck.
    Neck,
    /// Left clavicle.
    ClavicleLeft,
    /// Left shoulder.
    ShoulderLeft,
    /// Left elbow.
    ElbowLeft,
    /// Left wrist.
    WristLeft,
    /// Left hand.
    HandLeft,
    /// Tip of the left hand.
    HandTipLeft,
    /// Left thumb.
    ThumbLeft,
    /// Right clavicle.
    ClavicleRight,
    /// Right shoulder.
    ShoulderRight,
    /// Right elbow.
    ElbowRight,
    /// Right wrist.
    WristRight,
    /// Right hand.
    HandRight,
    /// Tip of the right hand.
    HandTipRight,
    /// Right thumb.
    ThumbRight,
    /// Left hip.
    HipLeft,
    /// Left knee.
    KneeLeft,
    /// Left ankle.
    AnkleLeft,
    /// Left foot.
    FootLeft,
    /// Right hip.
    HipRight,
    /// Right knee.
    KneeRight,
    /// Right ankle.
    AnkleRight,
    /// Right foot.
    FootRight,
    /// Head.
    Head,
    /// Nose.
    Nose,
    /// Left eye.
    EyeLeft,
    /// Left ear.
    EarLeft,
    /// Right eye.
    EyeRight,
    /// Right ear.
    EarRight,
}

impl JointId {
    /// All joints in topology order (parents before children).
    pub const ALL: [Self; JOINT_COUNT] = [
        Self::Pelvis,
        Self::SpineNavel,
        Self::SpineChest,
        Self::Neck,
        Self::ClavicleLeft,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::HandTipLeft,
        Self::ThumbLeft,
        Self::ClavicleRight,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HandTipRight,
        Self::ThumbRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
        Self::Head,
        Self::Nose,
        Self::EyeLeft,
        Self::EarLeft,
        Self::EyeRight,
        Self::EarRight,
    ];

    /// Get the joint's index into per-body joint arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check if this joint is the skeleton root.
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Pelvis)
    }

    /// Get the parent joint.
    ///
    /// The skeleton is a rooted tree: every joint except the pelvis has
    /// exactly one parent, and the pelvis is its own parent.
    #[must_use]
    pub const fn parent(self) -> Self {
        match self {
            Self::Pelvis => Self::Pelvis,
            Self::SpineNavel | Self::HipLeft | Self::HipRight => Self::Pelvis,
            Self::SpineChest => Self::SpineNavel,
            Self::Neck | Self::ClavicleLeft | Self::ClavicleRight => Self::SpineChest,
            Self::ShoulderLeft => Self::ClavicleLeft,
            Self::ElbowLeft => Self::ShoulderLeft,
            Self::WristLeft => Self::ElbowLeft,
            Self::HandLeft | Self::ThumbLeft => Self::WristLeft,
            Self::HandTipLeft => Self::HandLeft,
            Self::ShoulderRight => Self::ClavicleRight,
            Self::ElbowRight => Self::ShoulderRight,
            Self::WristRight => Self::ElbowRight,
            Self::HandRight | Self::ThumbRight => Self::WristRight,
            Self::HandTipRight => Self::HandRight,
            Self::KneeLeft => Self::HipLeft,
            Self::AnkleLeft => Self::KneeLeft,
            Self::FootLeft => Self::AnkleLeft,
            Self::KneeRight => Self::HipRight,
            Self::AnkleRight => Self::KneeRight,
            Self::FootRight => Self::AnkleRight,
            Self::Head => Self::Neck,
            Self::Nose | Self::EyeLeft | Self::EarLeft | Self::EyeRight | Self::EarRight => {
                Self::Head
            }
        }
    }

    /// Get the mirror joint on the opposite side of the body.
    ///
    /// Left-side joints map to their right-side counterparts and vice
    /// versa; midline joints map to themselves. The mirror map is consumed
    /// by downstream renderers that display the skeleton from the opposite
    /// viewing convention; the constraint math never uses it.
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Self::ClavicleLeft => Self::ClavicleRight,
            Self::ShoulderLeft => Self::ShoulderRight,
            Self::ElbowLeft => Self::ElbowRight,
            Self::WristLeft => Self::WristRight,
            Self::HandLeft => Self::HandRight,
            Self::HandTipLeft => Self::HandTipRight,
            Self::ThumbLeft => Self::ThumbRight,
            Self::ClavicleRight => Self::ClavicleLeft,
            Self::ShoulderRight => Self::ShoulderLeft,
            Self::ElbowRight => Self::ElbowLeft,
            Self::WristRight => Self::WristLeft,
            Self::HandRight => Self::HandLeft,
            Self::HandTipRight => Self::HandTipLeft,
            Self::ThumbRight => Self::ThumbLeft,
            Self::HipLeft => Self::HipRight,
            Self::KneeLeft => Self::KneeRight,
            Self::AnkleLeft => Self::AnkleRight,
            Self::FootLeft => Self::FootRight,
            Self::HipRight => Self::HipLeft,
            Self::KneeRight => Self::KneeLeft,
            Self::AnkleRight => Self::AnkleLeft,
            Self::FootRight => Self::FootLeft,
            Self::EyeLeft => Self::EyeRight,
            Self::EarLeft => Self::EarRight,
            Self::EyeRight => Self::EyeLeft,
            Self::EarRight => Self::EarLeft,
            Self::Pelvis
            | Self::SpineNavel
            | Self::SpineChest
            | Self::Neck
            | Self::Head
            | Self::Nose => self,
        }
    }
}

impl TryFrom<usize> for JointId {
    type Error = PoseError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PoseError::InvalidJointIndex(index))
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Per-joint tracking confidence reported by the upstream body tracker.
///
/// Ordered from least to most confident, so `state >= Tracked` reads as
/// "reliably tracked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TrackingState {
    /// The joint is out of view or occluded; its data is meaningless.
    #[default]
    NotTracked = 0,
    /// The joint position was inferred from neighboring joints.
    Inferred = 1,
    /// The joint is directly observed.
    Tracked = 2,
    /// The joint is directly observed with high confidence.
    HighConfidence = 3,
}

impl TrackingState {
    /// Check if the joint carries any usable data.
    ///
    /// Inferred joints count as tracked; only [`TrackingState::NotTracked`]
    /// joints are excluded from processing.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        !matches!(self, Self::NotTracked)
    }
}

impl TryFrom<u8> for TrackingState {
    type Error = PoseError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::NotTracked),
            1 => Ok(Self::Inferred),
            2 => Ok(Self::Tracked),
            3 => Ok(Self::HighConfidence),
            _ => Err(PoseError::InvalidTrackingState(raw)),
        }
    }
}

impl std::fmt::Display for TrackingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTracked => write!(f, "not tracked"),
            Self::Inferred => write!(f, "inferred"),
            Self::Tracked => write!(f, "tracked"),
            Self::HighConfidence => write!(f, "high confidence"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_joint_once() {
        assert_eq!(JointId::ALL.len(), JOINT_COUNT);
        for (index, joint) in JointId::ALL.iter().enumerate() {
            assert_eq!(joint.index(), index);
        }
    }

    #[test]
    fn test_parents_precede_children() {
        // The constrainer relies on iteration order to see every parent's
        // corrected orientation before its children.
        for joint in JointId::ALL {
            if !joint.is_root() {
                assert!(
                    joint.parent().index() < joint.index(),
                    "{joint} has parent {} declared after it",
                    joint.parent()
                );
            }
        }
    }

    #[test]
    fn test_root_is_own_parent() {
        assert!(JointId::Pelvis.is_root());
        assert_eq!(JointId::Pelvis.parent(), JointId::Pelvis);
    }

    #[test]
    fn test_every_joint_reaches_root() {
        for joint in JointId::ALL {
            let mut current = joint;
            let mut hops = 0;
            while !current.is_root() {
                current = current.parent();
                hops += 1;
                assert!(hops <= JOINT_COUNT, "{joint} does not reach the pelvis");
            }
        }
    }

    #[test]
    fn test_mirror_is_an_involution() {
        for joint in JointId::ALL {
            assert_eq!(joint.mirror().mirror(), joint);
        }
    }

    #[test]
    fn test_mirror_swaps_sides() {
        assert_eq!(JointId::ElbowLeft.mirror(), JointId::ElbowRight);
        assert_eq!(JointId::KneeRight.mirror(), JointId::KneeLeft);
        assert_eq!(JointId::Pelvis.mirror(), JointId::Pelvis);
        assert_eq!(JointId::Head.mirror(), JointId::Head);
    }

    #[test]
    fn test_try_from_index() {
        assert_eq!(JointId::try_from(0).unwrap(), JointId::Pelvis);
        assert_eq!(JointId::try_from(31).unwrap(), JointId::EarRight);
        assert!(matches!(
            JointId::try_from(32),
            Err(PoseError::InvalidJointIndex(32))
        ));
    }

    #[test]
    fn test_tracking_state_ordering() {
        assert!(TrackingState::HighConfidence > TrackingState::Tracked);
        assert!(TrackingState::Tracked > TrackingState::Inferred);
        assert!(TrackingState::Inferred > TrackingState::NotTracked);
    }

    #[test]
    fn test_tracking_state_is_tracked() {
        assert!(!TrackingState::NotTracked.is_tracked());
        assert!(TrackingState::Inferred.is_tracked());
        assert!(TrackingState::Tracked.is_tracked());
        assert!(TrackingState::HighConfidence.is_tracked());
    }

    #[test]
    fn test_tracking_state_from_raw() {
        assert_eq!(TrackingState::try_from(2).unwrap(), TrackingState::Tracked);
        assert!(matches!(
            TrackingState::try_from(7),
            Err(PoseError::InvalidTrackingState(7))
        ));
    }
}

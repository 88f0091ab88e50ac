//! Constraint kinds, per-joint axis constraints, and the catalog.
//!
//! A [`ConstraintCatalog`] maps each joint to an ordered list of
//! [`AxisConstraint`]s. It is populated once at start-up - either from the
//! built-in humanoid table or through [`ConstraintCatalog::add_constraint`]
//! calls - and is read-only afterwards, so one catalog can be shared by
//! reference across any number of tracked bodies.

use nalgebra::Vector3;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pose_types::{JointId, JOINT_COUNT};

use crate::error::ConstraintError;

/// The kind of limit an [`AxisConstraint`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstraintKind {
    /// Clamp one Euler component of the parent-local rotation to
    /// `[angle_min, angle_max]`, leaving the other two untouched.
    ///
    /// Only well-defined for principal constraint axes: the axis selects
    /// which Euler component is clamped.
    AxisLimit,

    /// Decompose the parent-local rotation about the constraint axis and
    /// bound both parts: `angle_min` is the maximum swing (change in the
    /// direction the axis points), `angle_max` the maximum twist (spin
    /// about the axis).
    SwingTwist,

    /// Treat the joint as a 1-DOF hinge about the constraint axis and
    /// clamp its accumulated signed angle to `[angle_min, angle_max]`.
    ///
    /// Hinges track their angle across frames (see
    /// [`pose_types::BodyFilterState`]) to recover the rotation direction
    /// a bare quaternion angle cannot express. `angle_min == angle_max == 0`
    /// locks the hinge. Sign recovery uses a component permutation of the
    /// axis and is only well-defined for principal constraint axes.
    Hinge,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AxisLimit => write!(f, "axis limit"),
            Self::SwingTwist => write!(f, "swing/twist"),
            Self::Hinge => write!(f, "hinge"),
        }
    }
}

/// A single axis-bound rotation limit on one joint.
///
/// The axis is expressed in the joint's parent-local frame and is stored
/// normalized. Angle bounds are in degrees; their interpretation depends
/// on the [`ConstraintKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConstraint {
    kind: ConstraintKind,
    axis: Vector3<f64>,
    angle_min: f64,
    angle_max: f64,
}

impl AxisConstraint {
    /// Create a validated constraint.
    ///
    /// The axis must be finite and non-zero (it is normalized on
    /// construction) and `angle_min` must not exceed `angle_max`.
    pub fn new(
        kind: ConstraintKind,
        axis: Vector3<f64>,
        angle_min: f64,
        angle_max: f64,
    ) -> Result<Self, ConstraintError> {
        let norm = axis.norm();
        if !norm.is_finite() || norm < 1e-6 {
            return Err(ConstraintError::InvalidAxis);
        }
        if angle_min > angle_max {
            return Err(ConstraintError::InvalidBounds {
                min: angle_min,
                max: angle_max,
            });
        }
        Ok(Self {
            kind,
            axis: axis / norm,
            angle_min,
            angle_max,
        })
    }

    /// Create an Euler axis limit (see [`ConstraintKind::AxisLimit`]).
    pub fn axis_limit(
        axis: Vector3<f64>,
        angle_min: f64,
        angle_max: f64,
    ) -> Result<Self, ConstraintError> {
        Self::new(ConstraintKind::AxisLimit, axis, angle_min, angle_max)
    }

    /// Create a swing/twist limit: `swing_deg` bounds the swing, `twist_deg`
    /// the twist (see [`ConstraintKind::SwingTwist`]).
    pub fn swing_twist(
        axis: Vector3<f64>,
        swing_deg: f64,
        twist_deg: f64,
    ) -> Result<Self, ConstraintError> {
        Self::new(ConstraintKind::SwingTwist, axis, swing_deg, twist_deg)
    }

    /// Create a hinge limit (see [`ConstraintKind::Hinge`]).
    pub fn hinge(
        axis: Vector3<f64>,
        angle_min: f64,
        angle_max: f64,
    ) -> Result<Self, ConstraintError> {
        Self::new(ConstraintKind::Hinge, axis, angle_min, angle_max)
    }

    /// Internal constructor for the built-in table, which only uses
    /// principal unit axes and pre-ordered literal bounds.
    fn from_parts(kind: ConstraintKind, axis: Vector3<f64>, angle_min: f64, angle_max: f64) -> Self {
        Self {
            kind,
            axis,
            angle_min,
            angle_max,
        }
    }

    /// Get the constraint kind.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Get the constraint axis (unit length, parent-local frame).
    #[must_use]
    pub fn axis(&self) -> &Vector3<f64> {
        &self.axis
    }

    /// Get the lower angle bound in degrees (the swing limit for
    /// swing/twist constraints).
    #[must_use]
    pub fn angle_min(&self) -> f64 {
        self.angle_min
    }

    /// Get the upper angle bound in degrees (the twist limit for
    /// swing/twist constraints).
    #[must_use]
    pub fn angle_max(&self) -> f64 {
        self.angle_max
    }
}

/// Immutable-after-setup table of per-joint rotation constraints.
///
/// # Example
///
/// ```
/// use pose_constraint::{ConstraintCatalog, ConstraintKind};
/// use pose_types::JointId;
/// use nalgebra::Vector3;
///
/// let mut catalog = ConstraintCatalog::empty();
/// catalog
///     .add_constraint(JointId::Neck, ConstraintKind::SwingTwist, Vector3::y(), 50.0, 80.0)
///     .unwrap();
///
/// assert!(catalog.has_constraints(JointId::Neck));
/// assert_eq!(catalog.total(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintCatalog {
    entries: [Vec<AxisConstraint>; JOINT_COUNT],
}

impl Default for ConstraintCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConstraintCatalog {
    /// Create a catalog with no constraints.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Create the default humanoid catalog.
    ///
    /// The bounds are configuration data, not derivation: spine twist is
    /// narrow, the neck swings up to 50 degrees and twists up to 80,
    /// shoulders and hips are wide ball joints, elbows and knees are
    /// hinges with asymmetric ranges, and leaf joints (hand tips, thumbs,
    /// face) are left unconstrained.
    #[must_use]
    pub fn with_default_constraints() -> Self {
        let mut catalog = Self::empty();
        catalog.populate_defaults();
        debug!(
            constraints = catalog.total(),
            "populated default humanoid constraint catalog"
        );
        catalog
    }

    fn populate_defaults(&mut self) {
        use ConstraintKind::{AxisLimit, Hinge, SwingTwist};

        let x = Vector3::x();
        let y = Vector3::y();

        let table: [(JointId, ConstraintKind, Vector3<f64>, f64, f64); 22] = [
            // Torso: narrow axial twist, the tracker's spine fit drifts
            // more about Y than it bends.
            (JointId::SpineNavel, AxisLimit, y, -10.0, 10.0),
            (JointId::SpineChest, AxisLimit, y, -15.0, 15.0),
            (JointId::Neck, SwingTwist, y, 50.0, 80.0),
            (JointId::Head, SwingTwist, y, 40.0, 70.0),
            // Arms
            (JointId::ClavicleLeft, SwingTwist, x, 20.0, 15.0),
            (JointId::ClavicleRight, SwingTwist, x, 20.0, 15.0),
            (JointId::ShoulderLeft, SwingTwist, x, 120.0, 90.0),
            (JointId::ShoulderRight, SwingTwist, x, 120.0, 90.0),
            (JointId::ElbowLeft, Hinge, x, 0.0, 150.0),
            (JointId::ElbowRight, Hinge, x, 0.0, 150.0),
            (JointId::WristLeft, SwingTwist, x, 50.0, 80.0),
            (JointId::WristRight, SwingTwist, x, 50.0, 80.0),
            (JointId::HandLeft, SwingTwist, x, 40.0, 60.0),
            (JointId::HandRight, SwingTwist, x, 40.0, 60.0),
            // Legs
            (JointId::HipLeft, SwingTwist, y, 100.0, 60.0),
            (JointId::HipRight, SwingTwist, y, 100.0, 60.0),
            (JointId::KneeLeft, Hinge, x, -5.0, 145.0),
            (JointId::KneeRight, Hinge, x, -5.0, 145.0),
            (JointId::AnkleLeft, SwingTwist, x, 45.0, 30.0),
            (JointId::AnkleRight, SwingTwist, x, 45.0, 30.0),
            (JointId::FootLeft, SwingTwist, x, 30.0, 20.0),
            (JointId::FootRight, SwingTwist, x, 30.0, 20.0),
        ];

        for (joint, kind, axis, min, max) in table {
            self.add(joint, AxisConstraint::from_parts(kind, axis, min, max));
        }
    }

    /// Append a validated constraint to a joint's list, creating the list
    /// if it was empty.
    ///
    /// Constraints apply in insertion order, each operating on the output
    /// of the previous one. Constraints on the root joint are accepted but
    /// never applied: the root is exempt by construction.
    pub fn add_constraint(
        &mut self,
        joint: JointId,
        kind: ConstraintKind,
        axis: Vector3<f64>,
        angle_min: f64,
        angle_max: f64,
    ) -> Result<(), ConstraintError> {
        let constraint = AxisConstraint::new(kind, axis, angle_min, angle_max)?;
        self.add(joint, constraint);
        Ok(())
    }

    /// Append a pre-built constraint to a joint's list.
    pub fn add(&mut self, joint: JointId, constraint: AxisConstraint) {
        self.entries[joint.index()].push(constraint);
    }

    /// Get a joint's constraints in application order.
    #[must_use]
    pub fn constraints(&self, joint: JointId) -> &[AxisConstraint] {
        &self.entries[joint.index()]
    }

    /// Check if a joint has any constraints.
    #[must_use]
    pub fn has_constraints(&self, joint: JointId) -> bool {
        !self.entries[joint.index()].is_empty()
    }

    /// Total number of constraints across all joints.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    /// Check if the catalog has no constraints at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Vec::is_empty)
    }
}

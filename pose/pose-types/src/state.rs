//! Persistent per-body filter state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::joint::{JointId, JOINT_COUNT};

/// Cross-frame filter state for one tracked body.
///
/// Hinge constraints accumulate a signed joint angle across frames; that
/// accumulator is the only state the constraint filter keeps between
/// frames. It lives here, owned by whatever component owns the body's
/// tracking lifetime - never in the constraint catalog, which stays
/// shareable across bodies.
///
/// The state is keyed by the tracker-assigned body identity. When a body
/// slot is re-acquired by a different person the accumulated angles are
/// meaningless, so [`BodyFilterState::rebind`] resets them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyFilterState {
    body_id: u64,
    last_hinge_deg: [f64; JOINT_COUNT],
}

impl BodyFilterState {
    /// Create fresh filter state for the given tracked body.
    #[must_use]
    pub fn new(body_id: u64) -> Self {
        Self {
            body_id,
            last_hinge_deg: [0.0; JOINT_COUNT],
        }
    }

    /// Get the body identity this state belongs to.
    #[must_use]
    pub fn body_id(&self) -> u64 {
        self.body_id
    }

    /// Get a joint's accumulated hinge angle in degrees.
    ///
    /// Meaningful only for joints carrying a hinge constraint; zero for
    /// everything else.
    #[must_use]
    pub fn hinge_angle(&self, joint: JointId) -> f64 {
        self.last_hinge_deg[joint.index()]
    }

    /// Set a joint's accumulated hinge angle in degrees.
    pub fn set_hinge_angle(&mut self, joint: JointId, degrees: f64) {
        self.last_hinge_deg[joint.index()] = degrees;
    }

    /// Reset all accumulated angles to zero.
    pub fn reset(&mut self) {
        self.last_hinge_deg = [0.0; JOINT_COUNT];
    }

    /// Re-key the state to a (possibly different) body identity.
    ///
    /// If the identity changed, all accumulated angles are reset and `true`
    /// is returned; re-binding to the same body is a no-op.
    pub fn rebind(&mut self, body_id: u64) -> bool {
        if self.body_id == body_id {
            return false;
        }
        self.body_id = body_id;
        self.reset();
        true
    }
}

//! Parallel multi-body constraining using rayon.
//!
//! Each tracked body's pose and filter state are owned exclusively by that
//! body's constraint pass, so bodies are embarrassingly parallel: the
//! catalog is shared read-only and no two bodies alias any mutable state.
//!
//! # Design Decisions
//!
//! ## Sequential Fallback
//!
//! Parallel dispatch only activates when at least `min_bodies` bodies are
//! present. A single-body scene - the common case for desk-scale trackers -
//! runs sequentially to avoid rayon overhead for a pass that takes
//! microseconds.
//!
//! ## Paired Slices
//!
//! Poses and filter states arrive as two equal-length slices rather than a
//! combined struct: the pose snapshot is per-frame data produced by the
//! tracker, while filter state outlives frames, and callers typically store
//! the two in different places.

use rayon::prelude::*;

use pose_types::{BodyFilterState, BodyPose};

use crate::catalog::ConstraintCatalog;
use crate::constrain::constrain_body;
use crate::error::ConstraintError;

/// Constrain several tracked bodies, in parallel when it pays off.
///
/// `poses[i]` is paired with `states[i]`; the slices must have equal
/// length. With fewer than `min_bodies` bodies the pass runs sequentially.
///
/// # Errors
///
/// Returns [`ConstraintError::BodyCountMismatch`] when the slice lengths
/// differ; no body is processed in that case.
pub fn constrain_bodies_parallel(
    poses: &mut [BodyPose],
    states: &mut [BodyFilterState],
    catalog: &ConstraintCatalog,
    min_bodies: usize,
) -> Result<(), ConstraintError> {
    if poses.len() != states.len() {
        return Err(ConstraintError::BodyCountMismatch {
            poses: poses.len(),
            states: states.len(),
        });
    }

    if poses.len() < min_bodies {
        for (pose, state) in poses.iter_mut().zip(states.iter_mut()) {
            constrain_body(pose, state, catalog);
        }
        return Ok(());
    }

    poses
        .par_iter_mut()
        .zip(states.par_iter_mut())
        .for_each(|(pose, state)| constrain_body(pose, state, catalog));

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use pose_types::{JointId, TrackingState};

    use crate::rotation::axis_angle_deg;

    fn bent_body(body_id: u64, elbow_deg: f64) -> BodyPose {
        let mut pose = BodyPose::new(body_id);
        for joint in JointId::ALL {
            pose[joint].tracking = TrackingState::Tracked;
            pose[joint].orientation = axis_angle_deg(&Vector3::y(), 1.0);
        }
        let parent = pose[JointId::ElbowLeft.parent()].orientation;
        pose[JointId::ElbowLeft].orientation = parent * axis_angle_deg(&Vector3::x(), elbow_deg);
        pose
    }

    #[test]
    fn test_mismatched_slices_error() {
        let catalog = ConstraintCatalog::with_default_constraints();
        let mut poses = vec![BodyPose::new(0)];
        let mut states = vec![BodyFilterState::new(0), BodyFilterState::new(1)];

        let result = constrain_bodies_parallel(&mut poses, &mut states, &catalog, 2);
        assert_eq!(
            result.unwrap_err(),
            ConstraintError::BodyCountMismatch { poses: 1, states: 2 }
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = ConstraintCatalog::with_default_constraints();

        let make = || -> (Vec<BodyPose>, Vec<BodyFilterState>) {
            let poses: Vec<BodyPose> =
                (0..6).map(|i| bent_body(i, 120.0 + 10.0 * i as f64)).collect();
            let states: Vec<BodyFilterState> = (0..6).map(BodyFilterState::new).collect();
            (poses, states)
        };

        let (mut seq_poses, mut seq_states) = make();
        for (pose, state) in seq_poses.iter_mut().zip(seq_states.iter_mut()) {
            constrain_body(pose, state, &catalog);
        }

        let (mut par_poses, mut par_states) = make();
        constrain_bodies_parallel(&mut par_poses, &mut par_states, &catalog, 2).unwrap();

        for (seq, par) in seq_poses.iter().zip(par_poses.iter()) {
            for joint in JointId::ALL {
                assert_relative_eq!(
                    seq[joint].orientation.angle_to(&par[joint].orientation),
                    0.0,
                    epsilon = 1e-12
                );
            }
        }
        for (seq, par) in seq_states.iter().zip(par_states.iter()) {
            for joint in JointId::ALL {
                assert_relative_eq!(
                    seq.hinge_angle(joint),
                    par.hinge_angle(joint),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_sequential_fallback_below_threshold() {
        let catalog = ConstraintCatalog::with_default_constraints();
        let mut poses = vec![bent_body(0, 170.0)];
        let mut states = vec![BodyFilterState::new(0)];

        constrain_bodies_parallel(&mut poses, &mut states, &catalog, 4).unwrap();

        assert_relative_eq!(
            states[0].hinge_angle(JointId::ElbowLeft),
            150.0,
            epsilon = 1e-7
        );
    }
}

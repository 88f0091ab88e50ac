//! The per-frame constraint pass and the three limit algorithms.
//!
//! [`constrain_body`] is the steady-state entry point: one call per
//! tracked body per frame, mutating the body's pose snapshot in place. It
//! never allocates, never blocks, and runs in
//! `O(joints x constraints_per_joint)`.

use nalgebra::{UnitQuaternion, Vector3};

use pose_types::{BodyFilterState, BodyPose, JointId};

use crate::catalog::{AxisConstraint, ConstraintCatalog, ConstraintKind};
use crate::rotation::{
    axis_angle_deg, euler_deg, from_euler_deg, mirror_orientation, orthonormalize, rotate_towards,
    shortest_arc,
};

/// Apply a constraint catalog to one body's pose snapshot.
///
/// Joints are visited in topology order, so every child is constrained
/// against its parent's already-corrected orientation. For each
/// constrained joint the parent-local rotation is extracted, every
/// constraint in the joint's list is applied in order (each to the output
/// of the previous), and the corrected world orientation plus its mirrored
/// variant are written back.
///
/// A joint is skipped - left byte-for-byte untouched, filter state
/// included - when it is the root, when its orientation is still the
/// identity (unset) sentinel, or when it or its parent is untracked this
/// frame.
///
/// The filter state is re-keyed to the pose's body identity first, so a
/// tracking slot re-acquired by a different person never sees stale hinge
/// angles.
///
/// Re-running the pass on an already-constrained pose is a no-op (within
/// floating-point tolerance): every algorithm returns in-range rotations
/// unchanged.
///
/// # Example
///
/// ```
/// use pose_constraint::{constrain_body, ConstraintCatalog};
/// use pose_types::{BodyFilterState, BodyPose, JointId, TrackingState};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let catalog = ConstraintCatalog::with_default_constraints();
/// let mut pose = BodyPose::new(1);
/// let mut state = BodyFilterState::new(1);
///
/// for joint in [JointId::Pelvis, JointId::SpineNavel, JointId::SpineChest] {
///     pose[joint].tracking = TrackingState::Tracked;
///     pose[joint].orientation =
///         UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.01);
/// }
///
/// constrain_body(&mut pose, &mut state, &catalog);
/// ```
pub fn constrain_body(
    pose: &mut BodyPose,
    state: &mut BodyFilterState,
    catalog: &ConstraintCatalog,
) {
    state.rebind(pose.body_id());

    for joint in JointId::ALL {
        let constraints = catalog.constraints(joint);
        if joint.is_root() || constraints.is_empty() {
            continue;
        }

        let parent = joint.parent();
        if !pose[joint].tracking.is_tracked() || !pose[parent].tracking.is_tracked() {
            continue;
        }
        if pose[joint].is_unset() {
            continue;
        }

        // Rotation relative to the parent's current (already corrected)
        // orientation - the frame all constraints are defined in.
        let parent_orientation = pose[parent].orientation;
        let original = parent_orientation.inverse() * pose[joint].orientation;
        let mut local = original;

        for constraint in constraints {
            local = match constraint.kind() {
                ConstraintKind::AxisLimit => limit_axis(&local, constraint),
                ConstraintKind::SwingTwist => {
                    let swung = limit_swing(&local, constraint.axis(), constraint.angle_min());
                    limit_twist(&swung, constraint.axis(), constraint.angle_max())
                }
                ConstraintKind::Hinge => {
                    let mut last_deg = state.hinge_angle(joint);
                    let limited = limit_hinge(&local, constraint, &mut last_deg);
                    state.set_hinge_angle(joint, last_deg);
                    limited
                }
            };
        }

        if local != original {
            let corrected = parent_orientation * local;
            pose[joint].orientation = corrected;
            pose[joint].mirrored = mirror_orientation(&corrected);
        }
    }
}

// ============================================================================
// Euler axis limit
// ============================================================================

/// Clamp one signed Euler component of `local` to the constraint bounds.
///
/// The constraint axis selects the component; the other two are preserved.
/// nalgebra decomposes into signed angles already, so the clamp operates
/// directly in [-180, 180]. In-range rotations are returned unchanged.
fn limit_axis(local: &UnitQuaternion<f64>, constraint: &AxisConstraint) -> UnitQuaternion<f64> {
    let (x, y, z) = euler_deg(local);
    let mut components = [x, y, z];

    let selected = dominant_component(constraint.axis());
    let value = components[selected];
    let clamped = value.clamp(constraint.angle_min(), constraint.angle_max());
    if clamped == value {
        return *local;
    }

    components[selected] = clamped;
    from_euler_deg(components[0], components[1], components[2])
}

/// Index of the principal axis a constraint axis is most aligned with.
fn dominant_component(axis: &Vector3<f64>) -> usize {
    if axis.x.abs() >= axis.y.abs() && axis.x.abs() >= axis.z.abs() {
        0
    } else if axis.y.abs() >= axis.z.abs() {
        1
    } else {
        2
    }
}

// ============================================================================
// Swing/twist limit
// ============================================================================

/// Bound the swing of `rotation`: the angle between `axis` and its rotated
/// image may not exceed `limit_deg`.
///
/// Works in the plane the rotation actually swings through: the full swing
/// is re-expressed as a from-to rotation of `axis`, its angle clamped, and
/// the excess removed with a correction rotation. Identity rotations and
/// limits of 180 degrees or more pass through untouched.
fn limit_swing(
    rotation: &UnitQuaternion<f64>,
    axis: &Vector3<f64>,
    limit_deg: f64,
) -> UnitQuaternion<f64> {
    if *rotation == UnitQuaternion::identity() || limit_deg >= 180.0 {
        return *rotation;
    }

    let swung = rotation * axis;
    if axis.angle(&swung).to_degrees() <= limit_deg {
        return *rotation;
    }

    let swing = shortest_arc(axis, &swung);
    let bounded = rotate_towards(&UnitQuaternion::identity(), &swing, limit_deg);
    let correction = shortest_arc(&swung, &(bounded * axis));
    correction * rotation
}

/// Bound the twist of `rotation` about `axis` to at most `limit_deg`.
///
/// The twist-free version of the rotation is recovered by comparing a
/// helper tangent with its rotated image, both orthonormalized against the
/// swung axis; the result is then rotated back towards the input by at
/// most the limit. The helper is a component permutation of the axis,
/// which keeps it well away from parallel for principal constraint axes.
fn limit_twist(
    rotation: &UnitQuaternion<f64>,
    axis: &Vector3<f64>,
    limit_deg: f64,
) -> UnitQuaternion<f64> {
    let limit = limit_deg.clamp(0.0, 180.0);
    if limit >= 180.0 {
        return *rotation;
    }

    let helper = Vector3::new(axis.y, axis.z, axis.x);
    let normal = rotation * axis;

    let tangent = orthonormalize(&normal, &helper);
    let rotated_tangent = orthonormalize(&normal, &(rotation * helper));

    let untwisted = shortest_arc(&rotated_tangent, &tangent) * rotation;
    if limit <= 0.0 {
        return untwisted;
    }
    rotate_towards(&untwisted, rotation, limit)
}

// ============================================================================
// Hinge limit
// ============================================================================

/// Constrain `local` to a 1-DOF hinge about `axis`, accumulating the
/// signed joint angle in `last_deg` across frames.
///
/// A bare quaternion angle is non-negative and wraps at 180 degrees, so
/// the per-frame delta against the previously accumulated angle is signed
/// via a cross-product test before being accumulated and clamped. The
/// returned rotation is the pure on-axis rotation at the clamped angle.
fn limit_hinge(
    local: &UnitQuaternion<f64>,
    constraint: &AxisConstraint,
    last_deg: &mut f64,
) -> UnitQuaternion<f64> {
    let axis = constraint.axis();
    let (min_deg, max_deg) = (constraint.angle_min(), constraint.angle_max());

    // Locked hinge: pin the joint at its rest rotation.
    if min_deg == 0.0 && max_deg == 0.0 {
        return UnitQuaternion::identity();
    }

    // Project out any residual swing; a nominal hinge only turns about
    // its axis.
    let on_axis = shortest_arc(&(local * axis), axis) * local;

    let previous = axis_angle_deg(axis, *last_deg);
    let delta = on_axis * previous.inverse();
    let mut delta_deg = delta.angle().to_degrees();

    let secondary = Vector3::new(axis.y, axis.z, axis.x);
    let cross_ref = secondary.cross(axis);
    if (delta * secondary).dot(&cross_ref) > 0.0 {
        delta_deg = -delta_deg;
    }

    let new_deg = (*last_deg + delta_deg).clamp(min_deg, max_deg);
    *last_deg = new_deg;
    axis_angle_deg(axis, new_deg)
}

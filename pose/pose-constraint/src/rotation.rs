//! Stateless rotation primitives used by the constraint algorithms.
//!
//! Everything here is a thin layer over nalgebra quaternions with explicit
//! short-circuits for the degenerate inputs the per-frame path can produce:
//! zero-length vectors, antiparallel from/to pairs, identity rotations.
//! Angles cross the public boundary in degrees; radians stay internal.

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Squared-norm threshold below which a vector is treated as zero.
const DEGENERATE_EPS: f64 = 1e-12;

/// Shortest rotation mapping `from` onto `to` (a from-to rotation).
///
/// Degenerate inputs short-circuit: a near-zero vector on either side
/// yields the identity, and antiparallel vectors (where the rotation plane
/// is ambiguous) yield a half-turn about an arbitrary axis orthogonal to
/// `from`.
#[must_use]
pub fn shortest_arc(from: &Vector3<f64>, to: &Vector3<f64>) -> UnitQuaternion<f64> {
    if from.norm_squared() < DEGENERATE_EPS || to.norm_squared() < DEGENERATE_EPS {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::rotation_between(from, to).unwrap_or_else(|| {
        // Antiparallel: any axis orthogonal to `from` works.
        UnitQuaternion::from_axis_angle(
            &Unit::new_normalize(any_orthogonal(from)),
            std::f64::consts::PI,
        )
    })
}

/// Rotate `from` towards `to`, covering at most `max_deg` degrees.
///
/// The rotation plane of the relative rotation is preserved; only its
/// angle is clamped. Returns `to` exactly when it is already within
/// `max_deg` of `from`, and `from` exactly when `max_deg` is zero or
/// negative.
#[must_use]
pub fn rotate_towards(
    from: &UnitQuaternion<f64>,
    to: &UnitQuaternion<f64>,
    max_deg: f64,
) -> UnitQuaternion<f64> {
    if max_deg <= 0.0 {
        return *from;
    }
    let delta = from.inverse() * to;
    let angle_deg = delta.angle().to_degrees();
    if angle_deg <= max_deg {
        return *to;
    }
    from * delta.powf(max_deg / angle_deg)
}

/// Gram-Schmidt: the component of `v` orthogonal to `normal`, normalized.
///
/// Falls back to an arbitrary direction orthogonal to `normal` when `v` is
/// (nearly) parallel to it, so the result is always a usable unit tangent.
#[must_use]
pub fn orthonormalize(normal: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    if normal.norm_squared() < DEGENERATE_EPS {
        return if v.norm_squared() < DEGENERATE_EPS {
            Vector3::x()
        } else {
            v.normalize()
        };
    }
    let n = normal.normalize();
    let projected = v - n * v.dot(&n);
    if projected.norm_squared() < DEGENERATE_EPS {
        any_orthogonal(&n).normalize()
    } else {
        projected.normalize()
    }
}

/// Any vector orthogonal to `v` (not normalized).
///
/// Crosses `v` with whichever principal axis it is least aligned with.
#[must_use]
pub fn any_orthogonal(v: &Vector3<f64>) -> Vector3<f64> {
    let candidate = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&candidate)
}

/// Rotation of `deg` degrees about `axis`.
///
/// A near-zero axis yields the identity.
#[must_use]
pub fn axis_angle_deg(axis: &Vector3<f64>, deg: f64) -> UnitQuaternion<f64> {
    if axis.norm_squared() < DEGENERATE_EPS {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::from_axis_angle(&Unit::new_normalize(*axis), deg.to_radians())
}

/// Euler decomposition of `q` in degrees, signed per component.
///
/// Components follow nalgebra's convention: rotation about X, then Y,
/// then Z, each in [-180, 180].
#[must_use]
pub fn euler_deg(q: &UnitQuaternion<f64>) -> (f64, f64, f64) {
    let (x, y, z) = q.euler_angles();
    (x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Build a rotation from signed Euler components in degrees.
#[must_use]
pub fn from_euler_deg(x: f64, y: f64, z: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(x.to_radians(), y.to_radians(), z.to_radians())
}

/// The mirrored-view variant of an orientation.
///
/// Negates the Y and Z Euler components, which flips the rotation across
/// the X axis for renderers drawing the skeleton from the opposite viewing
/// convention.
#[must_use]
pub fn mirror_orientation(q: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    let (x, y, z) = euler_deg(q);
    from_euler_deg(x, -y, -z)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shortest_arc_maps_from_onto_to() {
        let from = Vector3::new(1.0, 0.0, 0.0);
        let to = Vector3::new(0.0, 1.0, 0.0);

        let rot = shortest_arc(&from, &to);
        assert_relative_eq!(rot * from, to, epsilon = 1e-10);
    }

    #[test]
    fn test_shortest_arc_ignores_magnitudes() {
        let from = Vector3::new(3.0, 0.0, 0.0);
        let to = Vector3::new(0.0, 0.0, 0.5);

        let rot = shortest_arc(&from, &to);
        let mapped = rot * from.normalize();
        assert_relative_eq!(mapped, to.normalize(), epsilon = 1e-10);
    }

    #[test]
    fn test_shortest_arc_antiparallel() {
        let from = Vector3::new(0.0, 1.0, 0.0);
        let to = Vector3::new(0.0, -1.0, 0.0);

        let rot = shortest_arc(&from, &to);
        assert_relative_eq!(rot * from, to, epsilon = 1e-10);
        assert_relative_eq!(rot.angle(), std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_shortest_arc_zero_vector_is_identity() {
        let rot = shortest_arc(&Vector3::zeros(), &Vector3::x());
        assert_eq!(rot, UnitQuaternion::identity());
    }

    #[test]
    fn test_rotate_towards_within_limit_returns_target() {
        let from = UnitQuaternion::identity();
        let to = axis_angle_deg(&Vector3::z(), 20.0);

        assert_eq!(rotate_towards(&from, &to, 30.0), to);
    }

    #[test]
    fn test_rotate_towards_clamps_angle() {
        let from = UnitQuaternion::identity();
        let to = axis_angle_deg(&Vector3::z(), 90.0);

        let result = rotate_towards(&from, &to, 30.0);
        assert_relative_eq!(result.angle().to_degrees(), 30.0, epsilon = 1e-9);

        // The rotation plane is preserved.
        let axis = result.axis().unwrap();
        assert_relative_eq!(axis.into_inner(), Vector3::z(), epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_towards_zero_limit_returns_start() {
        let from = axis_angle_deg(&Vector3::y(), 10.0);
        let to = axis_angle_deg(&Vector3::y(), 50.0);

        assert_eq!(rotate_towards(&from, &to, 0.0), from);
    }

    #[test]
    fn test_orthonormalize_produces_unit_orthogonal() {
        let normal = Vector3::new(0.0, 2.0, 0.0);
        let v = Vector3::new(1.0, 1.0, 0.0);

        let t = orthonormalize(&normal, &v);
        assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(t.dot(&normal), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_orthonormalize_parallel_fallback() {
        let normal = Vector3::z();
        let t = orthonormalize(&normal, &(Vector3::z() * 5.0));

        assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(t.dot(&normal), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_any_orthogonal() {
        for v in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(0.3, -2.0, 1.1)] {
            let o = any_orthogonal(&v);
            assert!(o.norm_squared() > 0.0);
            assert_relative_eq!(o.dot(&v), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_axis_angle_deg_round_trip() {
        let q = axis_angle_deg(&Vector3::x(), 45.0);
        assert_relative_eq!(q.angle().to_degrees(), 45.0, epsilon = 1e-10);

        let axis = q.axis().unwrap();
        assert_relative_eq!(axis.into_inner(), Vector3::x(), epsilon = 1e-10);
    }

    #[test]
    fn test_euler_round_trip() {
        let q = from_euler_deg(10.0, -25.0, 40.0);
        let (x, y, z) = euler_deg(&q);

        assert_relative_eq!(x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(y, -25.0, epsilon = 1e-9);
        assert_relative_eq!(z, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mirror_orientation_is_an_involution() {
        let q = from_euler_deg(15.0, 30.0, -20.0);
        let twice = mirror_orientation(&mirror_orientation(&q));

        assert_relative_eq!(twice.angle_to(&q), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mirror_orientation_negates_y_and_z() {
        let q = from_euler_deg(15.0, 30.0, -20.0);
        let (x, y, z) = euler_deg(&mirror_orientation(&q));

        assert_relative_eq!(x, 15.0, epsilon = 1e-9);
        assert_relative_eq!(y, -30.0, epsilon = 1e-9);
        assert_relative_eq!(z, 20.0, epsilon = 1e-9);
    }
}

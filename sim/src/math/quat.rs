use nalgebra as na;

use super::{NORMALIZE_EPS, Quat, Vec3};

/// Above this cosine the two rotations are close enough that slerp falls back
/// to linear blending (avoids dividing by a vanishing `sin(omega)`).
const SLERP_LINEAR_THRESHOLD: f32 = 0.9999;

/// Spherical linear interpolation from `q0` (t = 0) to `q1` (t = 1).
///
/// - `t` is clamped: `t <= 0` returns `q0`, `t >= 1` returns `q1`.
/// - Takes the shortest arc: when `q0 · q1 < 0`, `q1` is negated first.
/// - The result is not renormalized; callers needing a unit quaternion
///   normalize it themselves (see [`normalize_quat`]).
pub fn slerp(q0: &Quat, q1: &Quat, t: f32) -> Quat {
    if t <= 0.0 {
        return *q0;
    }
    if t >= 1.0 {
        return *q1;
    }

    let mut cos_omega = q0.dot(q1);
    let mut q1c = *q1;
    if cos_omega < 0.0 {
        q1c = -q1c;
        cos_omega = -cos_omega;
    }

    let (k0, k1) = if cos_omega > SLERP_LINEAR_THRESHOLD {
        (1.0 - t, t)
    } else {
        let sin_omega = (1.0 - cos_omega * cos_omega).sqrt();
        let omega = sin_omega.atan2(cos_omega);
        let inv_sin = 1.0 / sin_omega;
        (((1.0 - t) * omega).sin() * inv_sin, (t * omega).sin() * inv_sin)
    };

    *q0 * k0 + q1c * k1
}

/// Build the rotation whose local +Z points along `forward` and whose local +Y
/// lies in the plane spanned by `forward` and `up`.
///
/// Degenerate input never produces NaN:
/// - a zero-length `forward` yields the identity;
/// - an `up` parallel (or antiparallel) to `forward` is replaced by the world
///   axis least aligned with `forward`.
pub fn look_at(forward: &Vec3, up: &Vec3) -> Quat {
    let Some(f) = forward.try_normalize(NORMALIZE_EPS) else {
        return Quat::identity();
    };

    let mut right = up.cross(&f);
    if right.norm() <= NORMALIZE_EPS {
        log::trace!("look_at: up {up:?} parallel to forward {f:?}, substituting fallback up");
        right = least_aligned_axis(&f).cross(&f);
    }
    let right = right.normalize();
    let true_up = f.cross(&right);

    let basis = na::Matrix3::from_columns(&[right, true_up, f]);
    let rotation = na::Rotation3::from_matrix_unchecked(basis);
    na::UnitQuaternion::from_rotation_matrix(&rotation).into_inner()
}

/// World axis with the smallest component along `v`.
fn least_aligned_axis(v: &Vec3) -> Vec3 {
    let a = v.abs();
    if a.x <= a.y && a.x <= a.z {
        Vec3::x()
    } else if a.y <= a.z {
        Vec3::y()
    } else {
        Vec3::z()
    }
}

/// Euler angles (radians) to quaternion, composed as yaw(Z) · pitch(Y) · roll(X).
pub fn euler_to_quat(rx: f32, ry: f32, rz: f32) -> Quat {
    na::UnitQuaternion::from_euler_angles(rx, ry, rz).into_inner()
}

/// Rotation of `angle` radians about `axis`. A zero axis yields the identity.
pub fn axis_angle_to_quat(axis: &Vec3, angle: f32) -> Quat {
    match axis.try_normalize(NORMALIZE_EPS) {
        Some(axis) => {
            let (s, c) = (angle * 0.5).sin_cos();
            Quat::from_parts(c, axis * s)
        }
        None => Quat::identity(),
    }
}

/// Scale `q` to unit length; a zero quaternion becomes the identity.
pub fn normalize_quat(q: &Quat) -> Quat {
    let n = q.norm();
    if n > NORMALIZE_EPS {
        *q / n
    } else {
        Quat::identity()
    }
}

/// Rotate `v` by `q` (normalized first).
#[inline]
pub fn rotate(q: &Quat, v: &Vec3) -> Vec3 {
    na::UnitQuaternion::new_unchecked(normalize_quat(q)) * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{world_forward, world_right, world_up};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;
    use test_case::test_case;

    fn yaw(angle: f32) -> Quat {
        axis_angle_to_quat(&world_up(), angle)
    }

    #[test]
    fn slerp_clamps_to_endpoints() {
        let q0 = yaw(0.2);
        let q1 = yaw(1.3);
        assert_eq!(slerp(&q0, &q1, 0.0), q0);
        assert_eq!(slerp(&q0, &q1, -3.0), q0);
        assert_eq!(slerp(&q0, &q1, 1.0), q1);
        assert_eq!(slerp(&q0, &q1, 7.5), q1);
    }

    #[test_case(0.1)]
    #[test_case(0.5)]
    #[test_case(0.9)]
    fn slerp_of_identical_rotations_is_constant(t: f32) {
        let q = euler_to_quat(0.3, -0.7, 1.1);
        assert_relative_eq!(slerp(&q, &q, t), q, epsilon = 1.0e-6);
    }

    #[test_case(0.25)]
    #[test_case(0.5)]
    #[test_case(0.75)]
    fn slerp_takes_shortest_path(t: f32) {
        let q0 = yaw(0.1);
        let q1 = -yaw(1.4);
        assert!(q0.dot(&q1) < 0.0);
        assert_eq!(slerp(&q0, &q1, t), slerp(&q0, &-q1, t));
    }

    #[test]
    fn slerp_halfway_between_yaws() {
        let mid = slerp(&yaw(0.0), &yaw(1.0), 0.5);
        assert_relative_eq!(mid, yaw(0.5), epsilon = 1.0e-5);
    }

    #[test]
    fn look_at_maps_local_z_to_forward() {
        let forward = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = look_at(&forward, &world_up());
        assert_relative_eq!(rotate(&q, &world_forward()), forward, epsilon = 1.0e-5);
        // Local +Y stays in the forward/up plane, so it is world up here.
        assert_relative_eq!(rotate(&q, &world_up()), world_up(), epsilon = 1.0e-5);
    }

    #[test]
    fn look_at_world_axes_is_identity() {
        let q = look_at(&world_forward(), &world_up());
        assert_relative_eq!(normalize_quat(&q).w.abs(), 1.0, epsilon = 1.0e-6);
    }

    #[test_case(Vec3::new(0.0, 1.0, 0.0) ; "parallel")]
    #[test_case(Vec3::new(0.0, -3.0, 0.0) ; "antiparallel")]
    fn look_at_survives_degenerate_up(forward: Vec3) {
        let q = look_at(&forward, &world_up());
        assert!(q.coords.iter().all(|c| c.is_finite()));
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(
            rotate(&q, &world_forward()),
            forward.normalize(),
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn look_at_zero_forward_is_identity() {
        assert_eq!(look_at(&Vec3::zeros(), &world_up()), Quat::identity());
    }

    #[test]
    fn axis_angle_quarter_turn_about_up() {
        let q = axis_angle_to_quat(&world_up(), FRAC_PI_2);
        assert_relative_eq!(rotate(&q, &world_forward()), world_right(), epsilon = 1.0e-6);
    }

    #[test]
    fn axis_angle_zero_axis_is_identity() {
        assert_eq!(axis_angle_to_quat(&Vec3::zeros(), 1.0), Quat::identity());
    }

    #[test]
    fn euler_pitch_matches_axis_angle() {
        assert_relative_eq!(
            euler_to_quat(0.0, FRAC_PI_2, 0.0),
            axis_angle_to_quat(&world_up(), FRAC_PI_2),
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn normalize_quat_handles_zero() {
        let zero = Quat::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(normalize_quat(&zero), Quat::identity());
        assert_relative_eq!(normalize_quat(&(yaw(0.4) * 3.0)).norm(), 1.0, epsilon = 1.0e-6);
    }
}

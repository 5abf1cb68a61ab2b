use super::settings::DIST_EPS;
use crate::math::{Vec3, world_up};

/// Velocity change for `a` when two equal-mass spheres of `radius` overlap.
///
/// Treats the pair as a 1-D elastic exchange along the line joining their
/// centres: the components of both velocities along that axis are swapped.
/// `b` receives the negated delta. Returns `None` when the centres are farther
/// apart than `radius`.
///
/// Coincident centres have no joining line; world up is used as the axis.
pub fn exchange_delta(
    pos_a: &Vec3,
    vel_a: &Vec3,
    pos_b: &Vec3,
    vel_b: &Vec3,
    radius: f32,
) -> Option<Vec3> {
    let d = pos_b - pos_a;
    let dist = d.norm();
    if dist > radius {
        return None;
    }

    let axis = if dist <= DIST_EPS { world_up() } else { d / dist };
    let dot_a = vel_a.dot(&axis);
    let dot_b = vel_b.dot(&axis);
    Some(axis * (dot_b - dot_a))
}

/// Resolve a pair in place. Returns whether they collided.
pub fn resolve_pair(
    pos_a: &Vec3,
    vel_a: &mut Vec3,
    pos_b: &Vec3,
    vel_b: &mut Vec3,
    radius: f32,
) -> bool {
    match exchange_delta(pos_a, vel_a, pos_b, vel_b, radius) {
        Some(delta) => {
            *vel_a += delta;
            *vel_b -= delta;
            true
        }
        None => false,
    }
}

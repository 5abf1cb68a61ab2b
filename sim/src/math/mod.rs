//! Vector and quaternion helpers shared by the transform, physics and camera code.
//!
//! nalgebra already covers the arithmetic (scale, add, subtract, cross, dot,
//! magnitude, quaternion multiply/add/scale). This module adds the pieces the
//! simulation needs on top of it: normalization with explicit fallbacks, the
//! clamped shortest-path slerp, look-at construction and the seedable LCG.

pub mod quat;
pub mod random;

use nalgebra as na;

pub use quat::{axis_angle_to_quat, euler_to_quat, look_at, normalize_quat, rotate, slerp};
pub use random::Lcg;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
/// Raw (not necessarily unit) quaternion. `Transform` renormalizes before use.
pub type Quat = na::Quaternion<f32>;
pub type Mat4 = na::Matrix4<f32>;

/// Vectors shorter than this are treated as having no direction.
pub const NORMALIZE_EPS: f32 = 1.0e-6;

#[inline]
pub fn world_up() -> Vec3 {
    Vec3::y()
}

#[inline]
pub fn world_forward() -> Vec3 {
    Vec3::z()
}

#[inline]
pub fn world_right() -> Vec3 {
    Vec3::x()
}

/// Normalize `v`, or return `fallback` when `v` is too short to carry a direction.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len = v.norm();
    if len > NORMALIZE_EPS {
        v / len
    } else {
        fallback
    }
}

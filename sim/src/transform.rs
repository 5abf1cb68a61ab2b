//! Lazily recomposed affine transform.
//!
//! Setters only record the new position/rotation/scale and mark the transform
//! dirty. The matrix and the forward/up/right basis are rebuilt on the next
//! read (or an explicit [`Transform::recompute`]), so a frame that moves and
//! rotates an entity several times pays for one composition.

use std::cell::Cell;

use nalgebra as na;

use crate::math::{
    Mat4, Quat, Vec3, axis_angle_to_quat, euler_to_quat, normalize_or, normalize_quat,
    world_forward, world_right, world_up,
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Derived {
    matrix: Mat4,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
}

#[derive(Clone, Debug)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    derived: Cell<Derived>,
    dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl Transform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
            scale: Vec3::repeat(1.0),
            derived: Cell::new(Derived {
                matrix: Mat4::identity(),
                forward: world_forward(),
                up: world_up(),
                right: world_right(),
            }),
            dirty: Cell::new(true),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Stored rotation. Unit length after `rotate_set` or `recompute`; the
    /// composing setters may drift it slightly until the next `recompute`.
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.dirty.set(true);
    }

    /// Move by `delta` in world space.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.dirty.set(true);
    }

    /// Compose a relative Euler rotation (radians) in the local frame.
    pub fn rotate_by(&mut self, rx: f32, ry: f32, rz: f32) {
        self.rotation *= euler_to_quat(rx, ry, rz);
        self.dirty.set(true);
    }

    /// Compose a rotation of `angle` radians about the world-space `axis`.
    pub fn rotate_axis(&mut self, axis: &Vec3, angle: f32) {
        self.rotation = axis_angle_to_quat(axis, angle) * self.rotation;
        self.dirty.set(true);
    }

    /// Replace the rotation outright. Stored normalized (zero becomes identity).
    pub fn rotate_set(&mut self, rotation: Quat) {
        self.rotation = normalize_quat(&rotation);
        self.dirty.set(true);
    }

    pub fn scale_to(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty.set(true);
    }

    /// Renormalize the stored rotation and rebuild the derived data now.
    pub fn recompute(&mut self) {
        self.rotation = normalize_quat(&self.rotation);
        self.derived
            .set(compose(&self.position, &self.rotation, &self.scale));
        self.dirty.set(false);
    }

    pub fn matrix(&self) -> Mat4 {
        self.derived().matrix
    }

    pub fn forward(&self) -> Vec3 {
        self.derived().forward
    }

    pub fn up(&self) -> Vec3 {
        self.derived().up
    }

    pub fn right(&self) -> Vec3 {
        self.derived().right
    }

    // Reads through `&self` cache the composition; the stored rotation itself
    // is only rewritten by `recompute`.
    fn derived(&self) -> Derived {
        if self.dirty.get() {
            let rotation = normalize_quat(&self.rotation);
            self.derived
                .set(compose(&self.position, &rotation, &self.scale));
            self.dirty.set(false);
        }
        self.derived.get()
    }
}

/// `M = T · R · S`, basis vectors pushed through `R · S` and normalized.
fn compose(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Derived {
    let unit = na::UnitQuaternion::new_unchecked(*rotation);
    let rs = unit.to_rotation_matrix().into_inner() * na::Matrix3::from_diagonal(scale);

    let mut matrix = rs.to_homogeneous();
    matrix[(0, 3)] = position.x;
    matrix[(1, 3)] = position.y;
    matrix[(2, 3)] = position.z;

    // A zero scale component collapses its axis; fall back to the pure rotation.
    let axis = |e: Vec3| normalize_or(rs * e, unit * e);

    Derived {
        matrix,
        forward: axis(world_forward()),
        up: axis(world_up()),
        right: axis(world_right()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1.0e-5;

    fn assert_orthonormal(t: &Transform) {
        let (f, u, r) = (t.forward(), t.up(), t.right());
        for v in [f, u, r] {
            assert_relative_eq!(v.norm(), 1.0, epsilon = EPS);
        }
        assert!(f.dot(&u).abs() < EPS);
        assert!(f.dot(&r).abs() < EPS);
        assert!(u.dot(&r).abs() < EPS);
    }

    #[test]
    fn default_basis_is_world_axes() {
        let t = Transform::default();
        assert_relative_eq!(t.forward(), world_forward(), epsilon = EPS);
        assert_relative_eq!(t.up(), world_up(), epsilon = EPS);
        assert_relative_eq!(t.right(), world_right(), epsilon = EPS);
        assert_eq!(t.matrix(), Mat4::identity());
    }

    #[test]
    fn rotate_set_stores_unit_quaternion() {
        let mut t = Transform::default();
        let q = axis_angle_to_quat(&world_up(), 0.7) * 3.0;
        t.rotate_set(q);
        assert_relative_eq!(t.rotation().norm(), 1.0, epsilon = EPS);
        let _ = t.matrix();
        assert_relative_eq!(t.rotation(), q / 3.0, epsilon = EPS);

        t.rotate_set(Quat::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(t.rotation(), Quat::identity());
    }

    #[test]
    fn setters_mark_dirty_and_recompute_clears() {
        let mut t = Transform::default();
        t.recompute();
        assert!(!t.is_dirty());

        t.move_to(Vec3::new(1.0, 2.0, 3.0));
        assert!(t.is_dirty());
        t.recompute();
        assert!(!t.is_dirty());

        t.rotate_by(0.0, 0.1, 0.0);
        assert!(t.is_dirty());
        t.recompute();

        t.scale_to(Vec3::new(2.0, 2.0, 2.0));
        assert!(t.is_dirty());
        let _ = t.forward();
        assert!(!t.is_dirty());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut t = Transform::new(Vec3::new(4.0, -1.0, 2.0));
        t.rotate_by(0.3, 1.2, -0.4);
        t.scale_to(Vec3::new(1.0, 3.0, 0.5));
        t.recompute();
        let first = (t.matrix(), t.forward(), t.up(), t.right());
        t.recompute();
        let second = (t.matrix(), t.forward(), t.up(), t.right());
        assert_eq!(first, second);
    }

    #[test]
    fn basis_stays_orthonormal_under_non_uniform_scale() {
        let mut t = Transform::default();
        t.move_to(Vec3::new(10.0, 0.0, -3.0));
        t.rotate_by(0.4, -0.9, 0.25);
        t.scale_to(Vec3::new(200.0, 0.5, 12.0));
        t.rotate_axis(&world_up(), 0.7);
        t.translate(Vec3::new(0.0, 1.0, 0.0));
        t.recompute();
        assert_orthonormal(&t);
    }

    #[test]
    fn zero_scale_axis_keeps_basis_finite() {
        let mut t = Transform::default();
        t.rotate_by(0.0, 0.5, 0.0);
        t.scale_to(Vec3::new(1.0, 0.0, 1.0));
        assert_orthonormal(&t);
    }

    #[test]
    fn unnormalized_rotation_is_renormalized() {
        let mut t = Transform::default();
        t.rotate_set(axis_angle_to_quat(&world_up(), 0.3) * 4.0);
        t.recompute();
        assert_relative_eq!(t.rotation().norm(), 1.0, epsilon = EPS);
        assert_orthonormal(&t);
    }

    #[test]
    fn matrix_places_translation_in_last_column() {
        let mut t = Transform::new(Vec3::new(1.0, 2.0, 3.0));
        t.scale_to(Vec3::new(2.0, 2.0, 2.0));
        let p = t.matrix() * na::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.xyz(), Vec3::new(3.0, 2.0, 3.0), epsilon = EPS);
    }

    #[test]
    fn rotate_axis_turns_forward_about_world_up() {
        let mut t = Transform::default();
        t.rotate_axis(&world_up(), FRAC_PI_2);
        assert_relative_eq!(t.forward(), world_right(), epsilon = EPS);
        assert_relative_eq!(t.right(), -world_forward(), epsilon = EPS);
    }
}

/*!
Core collision types shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data
exchanged between:
- the terrain query surfaces (triangle mesh, floor plane)
- ground probing (hovercraft snap, camera clearance)
- player physics and the camera rig
*/

use crate::math::Vec3;

/// Closest intersection of a ray with a query surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the (normalized) ray direction.
    pub distance: f32,
    /// Unit surface normal, facing against the ray.
    pub normal: Vec3,
}

impl RayHit {
    /// World-space hit point for the ray the hit came from.
    #[inline]
    pub fn point(&self, origin: &Vec3, direction: &Vec3) -> Vec3 {
        origin + direction * self.distance
    }
}

/// Ray query surface the simulation casts against.
///
/// Implementations return the closest hit at a positive distance along
/// `direction` (normalized by the implementation), or `None` when nothing is
/// hit or `direction` has no length.
pub trait TerrainQuery {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for &T {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        (**self).raycast(origin, direction)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Box<T> {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        (**self).raycast(origin, direction)
    }
}

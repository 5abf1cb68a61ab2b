use serde::{Deserialize, Serialize};

use super::types::{RayHit, TerrainQuery};
use crate::math::{NORMALIZE_EPS, Vec3, world_up};

/// Axis-aligned XZ rectangle limiting a floor plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorBounds {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
}

impl FloorBounds {
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }
}

/// Horizontal floor (the water plane). Players never sink below its height;
/// rays only hit it inside `bounds` when it has any.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorPlane {
    height: f32,
    bounds: Option<FloorBounds>,
}

impl FloorPlane {
    /// Infinite plane at `height`.
    pub fn new(height: f32) -> Self {
        Self {
            height,
            bounds: None,
        }
    }

    /// Square plane of side `2 * half_extent` centred on the origin.
    pub fn centered(height: f32, half_extent: f32) -> Self {
        Self {
            height,
            bounds: Some(FloorBounds {
                min_x: -half_extent,
                min_z: -half_extent,
                max_x: half_extent,
                max_z: half_extent,
            }),
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Option<FloorBounds> {
        self.bounds
    }
}

impl TerrainQuery for FloorPlane {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let dir = direction.try_normalize(NORMALIZE_EPS)?;
        if dir.y.abs() <= NORMALIZE_EPS {
            return None;
        }

        let distance = (self.height - origin.y) / dir.y;
        if distance <= 0.0 {
            return None;
        }

        let point = origin + dir * distance;
        if let Some(bounds) = self.bounds {
            if !bounds.contains(point.x, point.z) {
                return None;
            }
        }

        let normal = if dir.y < 0.0 { world_up() } else { -world_up() };
        Some(RayHit { distance, normal })
    }
}

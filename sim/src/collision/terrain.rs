use rapier3d::parry::{
    math::{Isometry, Point, Real, Vector},
    query::{Ray, RayCast},
    shape::TriMesh,
};

use super::types::{RayHit, TerrainQuery};
use crate::{
    SimError,
    math::{NORMALIZE_EPS, Vec3, normalize_or, world_up},
};

/// Static terrain as a parry triangle mesh.
///
/// The model scale is baked into the vertices at construction, so rays are
/// cast in world space against an identity pose.
pub struct TerrainMesh {
    mesh: TriMesh,
}

impl std::fmt::Debug for TerrainMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainMesh")
            .field("vertices", &self.mesh.vertices().len())
            .field("triangles", &self.mesh.indices().len())
            .finish()
    }
}

impl TerrainMesh {
    /// Build from model-space `vertices`, triangle `indices` and a per-axis `scale`.
    pub fn new(vertices: &[Vec3], indices: Vec<[u32; 3]>, scale: Vec3) -> Result<Self, SimError> {
        if indices.is_empty() {
            return Err(SimError::InvalidMesh("mesh has no triangles".into()));
        }
        let count = vertices.len() as u32;
        if let Some(bad) = indices.iter().flatten().find(|&&i| i >= count) {
            return Err(SimError::InvalidMesh(format!(
                "index {bad} out of range for {count} vertices"
            )));
        }

        let points: Vec<Point<Real>> = vertices
            .iter()
            .map(|v| Point::new(v.x * scale.x, v.y * scale.y, v.z * scale.z))
            .collect();

        let mesh = TriMesh::new(points, indices)
            .map_err(|e| SimError::InvalidMesh(format!("{e:?}")))?;

        Ok(Self { mesh })
    }

    /// Regular grid of `cols x rows` cells of `cell_size`, starting at the
    /// origin and extending along +X/+Z, with vertex heights from `height(x, z)`.
    pub fn heightfield(
        cols: u32,
        rows: u32,
        cell_size: f32,
        height: impl Fn(f32, f32) -> f32,
    ) -> Result<Self, SimError> {
        if cols == 0 || rows == 0 {
            return Err(SimError::InvalidMesh("heightfield needs at least one cell".into()));
        }

        let stride = cols + 1;
        let mut vertices = Vec::with_capacity(((cols + 1) * (rows + 1)) as usize);
        for iz in 0..=rows {
            for ix in 0..=cols {
                let (x, z) = (ix as f32 * cell_size, iz as f32 * cell_size);
                vertices.push(Vec3::new(x, height(x, z), z));
            }
        }

        let mut indices = Vec::with_capacity((cols * rows * 2) as usize);
        for iz in 0..rows {
            for ix in 0..cols {
                let i00 = iz * stride + ix;
                let i10 = i00 + 1;
                let i01 = i00 + stride;
                let i11 = i01 + 1;
                // Counter-clockwise seen from above, so face normals point up.
                indices.push([i00, i01, i10]);
                indices.push([i10, i01, i11]);
            }
        }

        Self::new(&vertices, indices, Vec3::repeat(1.0))
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.indices().len()
    }
}

impl TerrainQuery for TerrainMesh {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let dir = direction.try_normalize(NORMALIZE_EPS)?;
        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        // Non-solid: a mesh has no interior, only the first surface crossing counts.
        let hit = self
            .mesh
            .cast_ray_and_get_normal(&Isometry::identity(), &ray, Real::MAX, false)?;
        if hit.time_of_impact <= 0.0 {
            return None;
        }

        let mut normal = normalize_or(
            Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z),
            world_up(),
        );
        if normal.dot(&dir) > 0.0 {
            normal = -normal;
        }

        Some(RayHit {
            distance: hit.time_of_impact,
            normal,
        })
    }
}

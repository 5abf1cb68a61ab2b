use super::types::TerrainQuery;
use crate::math::{Vec3, world_up};

/// Outcome of a downward terrain probe under a hovercraft.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroundContact {
    /// The hovercraft reached or crossed the surface this frame.
    Snapped {
        /// Surface point directly below the probe origin.
        point: Vec3,
        /// Unit surface normal at `point`.
        normal: Vec3,
    },
    /// Still above the surface, or nothing below at all.
    Airborne,
}

/// Probe for ground under `pos`.
///
/// - The ray starts `ray_height` above `pos` so it begins above any terrain.
/// - A hit closer than `ray_height` means `pos` is at or below the surface, and
///   the hovercraft snaps to the hit point.
/// - A farther hit, or no hit at all, leaves the hovercraft airborne.
pub fn probe_ground<T: TerrainQuery + ?Sized>(
    terrain: &T,
    pos: Vec3,
    ray_height: f32,
) -> GroundContact {
    if ray_height <= 0.0 {
        return GroundContact::Airborne;
    }

    let origin = pos + world_up() * ray_height;
    let down = -world_up();
    match terrain.raycast(origin, down) {
        Some(hit) if hit.distance < ray_height => GroundContact::Snapped {
            point: hit.point(&origin, &down),
            normal: hit.normal,
        },
        _ => GroundContact::Airborne,
    }
}

/// How far `pos` must rise to sit at least `clearance` above the terrain.
///
/// Casts from `ray_height` above `pos`; returns 0 when the terrain is far
/// enough below or absent.
pub fn clearance_shortfall<T: TerrainQuery + ?Sized>(
    terrain: &T,
    pos: Vec3,
    ray_height: f32,
    clearance: f32,
) -> f32 {
    let origin = pos + world_up() * ray_height;
    let wanted = ray_height + clearance;
    match terrain.raycast(origin, -world_up()) {
        Some(hit) if hit.distance < wanted => wanted - hit.distance,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::FloorPlane;
    use approx::assert_relative_eq;

    #[test]
    fn below_surface_snaps_to_hit_point() {
        let ground = FloorPlane::new(0.0);
        let contact = probe_ground(&ground, Vec3::new(4.0, -0.25, 9.0), 200.0);
        match contact {
            GroundContact::Snapped { point, normal } => {
                assert_relative_eq!(point, Vec3::new(4.0, 0.0, 9.0), epsilon = 1.0e-4);
                assert_eq!(normal, world_up());
            }
            GroundContact::Airborne => panic!("expected a snap"),
        }
    }

    #[test]
    fn above_surface_is_airborne() {
        let ground = FloorPlane::new(0.0);
        assert_eq!(
            probe_ground(&ground, Vec3::new(0.0, 3.0, 0.0), 200.0),
            GroundContact::Airborne
        );
    }

    #[test]
    fn exactly_on_surface_is_airborne() {
        // Distance equals the ray height, which is not strictly closer.
        let ground = FloorPlane::new(0.0);
        assert_eq!(
            probe_ground(&ground, Vec3::new(0.0, 0.0, 0.0), 200.0),
            GroundContact::Airborne
        );
    }

    #[test]
    fn missing_terrain_is_airborne() {
        let ground = FloorPlane::centered(0.0, 10.0);
        assert_eq!(
            probe_ground(&ground, Vec3::new(50.0, -1.0, 0.0), 200.0),
            GroundContact::Airborne
        );
    }

    #[test]
    fn clearance_raises_low_points() {
        let ground = FloorPlane::new(0.0);
        assert_relative_eq!(
            clearance_shortfall(&ground, Vec3::new(0.0, 1.0, 0.0), 400.0, 2.5),
            1.5,
            epsilon = 1.0e-3
        );
        assert_eq!(clearance_shortfall(&ground, Vec3::new(0.0, 5.0, 0.0), 400.0, 2.5), 0.0);
    }
}

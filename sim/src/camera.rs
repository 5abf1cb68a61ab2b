//! Per-player chase camera and split-screen layout.

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::{
    collision::{TerrainQuery, clearance_shortfall},
    config::CameraConfig,
    constants::MAX_PLAYERS,
    math::{Mat4, NORMALIZE_EPS, Vec3, world_up},
    transform::Transform,
};

/// Sub-rectangle of the framebuffer showing one player's view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Viewport {
    pub fn full(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Viewport of the `index`-th (0-based) of `total` players.
    ///
    /// One player gets the whole screen, two are stacked top and bottom,
    /// three or four share quadrants in reading order.
    pub fn split(screen_width: f32, screen_height: f32, total: usize, index: usize) -> Self {
        assert!(
            (1..=MAX_PLAYERS).contains(&total) && index < total,
            "invalid split: player {index} of {total}"
        );

        match total {
            1 => Self::full(screen_width, screen_height),
            2 => {
                let height = screen_height / 2.0;
                Self {
                    width: screen_width,
                    height,
                    offset_x: 0.0,
                    offset_y: index as f32 * height,
                }
            }
            _ => {
                let (width, height) = (screen_width / 2.0, screen_height / 2.0);
                Self {
                    width,
                    height,
                    offset_x: (index % 2) as f32 * width,
                    offset_y: (index / 2) as f32 * height,
                }
            }
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    viewport: Viewport,
    projection: Mat4,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            viewport: Viewport::default(),
            projection: Mat4::identity(),
            view: Mat4::identity(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// View matrix from the last [`Camera::follow`].
    #[inline]
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Jump straight to `position` without smoothing.
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Assign the split-screen viewport and rebuild the projection for its aspect.
    pub fn setup(&mut self, viewport: Viewport, config: &CameraConfig) {
        self.viewport = viewport;
        self.projection = Mat4::new_perspective(
            viewport.aspect_ratio(),
            config.fov_deg.to_radians(),
            config.near,
            config.far,
        );
    }

    /// Advance one frame toward the rig point behind `target` and return the view.
    ///
    /// The rig point sits `distance` behind the hovercraft along its forward
    /// axis and `height` above it. The camera closes `smoothing` of the gap per
    /// frame, then is pushed up if it would come closer than `height` to the
    /// terrain below.
    pub fn follow<T: TerrainQuery + ?Sized>(
        &mut self,
        target: &Transform,
        terrain: &T,
        config: &CameraConfig,
    ) -> Mat4 {
        let anchor = target.position();
        let rig = anchor - target.forward() * config.distance + world_up() * config.height;

        let mut eye = self.position + (rig - self.position) * config.smoothing;
        eye.y += clearance_shortfall(terrain, eye, config.ray_height, config.height);
        self.position = eye;

        let look = anchor - eye;
        if look.norm() > NORMALIZE_EPS && look.cross(&world_up()).norm() > NORMALIZE_EPS {
            self.view = Mat4::look_at_rh(
                &na::Point3::from(eye),
                &na::Point3::from(anchor),
                &world_up(),
            );
        } else {
            log::trace!("camera eye {eye:?} degenerate against {anchor:?}, keeping previous view");
        }

        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{FloorPlane, RayHit};
    use approx::assert_relative_eq;
    use test_case::test_case;

    struct Void;

    impl TerrainQuery for Void {
        fn raycast(&self, _origin: Vec3, _direction: Vec3) -> Option<RayHit> {
            None
        }
    }

    #[test_case(1, 0, Viewport { width: 640.0, height: 480.0, offset_x: 0.0, offset_y: 0.0 })]
    #[test_case(2, 1, Viewport { width: 640.0, height: 240.0, offset_x: 0.0, offset_y: 240.0 })]
    #[test_case(3, 2, Viewport { width: 320.0, height: 240.0, offset_x: 0.0, offset_y: 240.0 })]
    #[test_case(4, 1, Viewport { width: 320.0, height: 240.0, offset_x: 320.0, offset_y: 0.0 })]
    #[test_case(4, 3, Viewport { width: 320.0, height: 240.0, offset_x: 320.0, offset_y: 240.0 })]
    fn split_layout(total: usize, index: usize, expected: Viewport) {
        assert_eq!(Viewport::split(640.0, 480.0, total, index), expected);
    }

    #[test]
    #[should_panic]
    fn split_rejects_index_past_total() {
        Viewport::split(640.0, 480.0, 2, 2);
    }

    #[test]
    fn first_frame_covers_smoothing_fraction() {
        let config = CameraConfig::default();
        let mut camera = Camera::default();
        camera.follow(&Transform::default(), &Void, &config);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.25, -0.5), epsilon = 1.0e-6);
    }

    #[test]
    fn converges_on_rig_point() {
        let config = CameraConfig::default();
        let target = Transform::new(Vec3::new(10.0, 3.0, 10.0));
        let mut camera = Camera::default();
        for _ in 0..300 {
            camera.follow(&target, &Void, &config);
        }
        assert_relative_eq!(camera.position(), Vec3::new(10.0, 5.5, 5.0), epsilon = 1.0e-3);
    }

    #[test]
    fn ground_avoidance_lifts_camera() {
        let config = CameraConfig::default();
        let ground = FloorPlane::new(0.0);
        // Rig point is 0.5 above ground; the camera must keep 2.5.
        let target = Transform::new(Vec3::new(0.0, -2.0, 0.0));
        let mut camera = Camera::new(Vec3::new(0.0, 0.5, -5.0));
        camera.follow(&target, &ground, &config);
        assert_relative_eq!(camera.position().y, 2.5, epsilon = 1.0e-3);
    }

    #[test]
    fn view_looks_at_target() {
        let config = CameraConfig::default();
        let target = Transform::new(Vec3::new(1.0, 2.0, 3.0));
        let mut camera = Camera::new(Vec3::new(1.0, 4.5, -2.0));
        let view = camera.follow(&target, &Void, &config);

        let p = view * na::Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1.0e-4);
        assert_relative_eq!(p.y, 0.0, epsilon = 1.0e-4);
        assert!(p.z < 0.0);
    }

    #[test]
    fn setup_builds_projection_for_viewport_aspect() {
        let config = CameraConfig::default();
        let mut camera = Camera::default();
        let viewport = Viewport::split(640.0, 480.0, 2, 0);
        camera.setup(viewport, &config);

        assert_eq!(*camera.viewport(), viewport);
        let expected = Mat4::new_perspective(640.0 / 240.0, 60f32.to_radians(), 0.1, 3000.0);
        assert_relative_eq!(*camera.projection(), expected);
    }
}

//! Simulation configuration.
//!
//! Every tunable has a default taken from [`crate::constants`] and
//! [`crate::collision::settings`]; a JSON document only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};

use crate::{
    SimError,
    collision::settings::{CAMERA_RAY_HEIGHT, COLLISION_RADIUS, GROUND_RAY_HEIGHT},
    constants::*,
    math::Vec3,
};

/// Video-mode tick rate. The frame loop is driven externally at this rate and
/// every per-frame constant assumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameRate {
    #[default]
    Ntsc,
    Pal,
}

impl FrameRate {
    pub const fn hz(self) -> u32 {
        match self {
            FrameRate::Ntsc => TICK_HZ_NTSC,
            FrameRate::Pal => TICK_HZ_PAL,
        }
    }

    /// Seconds per frame.
    pub fn frame_time(self) -> f32 {
        1.0 / self.hz() as f32
    }
}

/// How pairwise player collisions are applied within a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOrder {
    /// Player `i` resolves against every active `j > i` right after its own
    /// velocity update, so a later player may see its velocity changed before
    /// it integrates. This is the order the game has always used.
    #[default]
    Sequential,
    /// Every player integrates velocity first; all pair deltas are gathered
    /// into a scratch buffer and applied together before positions move.
    /// Results do not depend on slot order.
    Deferred,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub turn_rate: f32,
    pub accel_rate: f32,
    pub decel_rate: f32,
    pub damping: f32,
    /// Downward velocity gained per second (positive magnitude).
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Share of the current orientation kept per frame when re-aligning.
    pub orientation_blend: f32,
    pub collision_radius: f32,
    pub ground_ray_height: f32,
    /// Optional cap on velocity magnitude (per-frame units). Off by default.
    pub max_speed: Option<f32>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            turn_rate: TURN_RATE,
            accel_rate: ACCEL_RATE,
            decel_rate: DECEL_RATE,
            damping: DAMPING,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            orientation_blend: ORIENTATION_BLEND,
            collision_radius: COLLISION_RADIUS,
            ground_ray_height: GROUND_RAY_HEIGHT,
            max_speed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub height: f32,
    pub smoothing: f32,
    pub ray_height: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            height: CAMERA_HEIGHT,
            smoothing: CAMERA_SMOOTHING,
            ray_height: CAMERA_RAY_HEIGHT,
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for spawn placement.
    pub seed: u32,
    pub spawn_extent: f32,
    pub spawn_height: f32,
    pub terrain_scale: f32,
    pub floor_height: f32,
    pub floor_half_extent: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            spawn_extent: SPAWN_EXTENT,
            spawn_height: SPAWN_HEIGHT,
            terrain_scale: TERRAIN_SCALE,
            floor_height: FLOOR_HEIGHT,
            floor_half_extent: FLOOR_HALF_EXTENT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub frame_rate: FrameRate,
    pub collision_order: CollisionOrder,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Gravity as a per-frame velocity change.
    pub fn gravity_per_frame(&self) -> Vec3 {
        Vec3::new(0.0, -self.physics.gravity * self.frame_rate.frame_time(), 0.0)
    }
}

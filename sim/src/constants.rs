//! Gameplay tuning constants.
//!
//! Velocities are per-frame displacements and the damping/smoothing factors
//! are applied once per frame, so every value here assumes the fixed tick of
//! [`TICK_HZ_NTSC`] unless it is explicitly divided by the tick rate.

/// Number of controller ports, and so the size of the player slot table.
pub const MAX_PLAYERS: usize = 4;

/// Fixed simulation tick for 60 Hz video modes.
pub const TICK_HZ_NTSC: u32 = 60;

/// Fixed simulation tick for 50 Hz video modes.
pub const TICK_HZ_PAL: u32 = 50;

/// Yaw applied per frame at full analog deflection (radians).
pub const TURN_RATE: f32 = 0.033;

/// Forward thrust per frame at full right trigger.
pub const ACCEL_RATE: f32 = 0.02;

/// Braking thrust per frame at full left trigger.
pub const DECEL_RATE: f32 = 0.033;

/// Fraction of velocity kept each frame (drag).
pub const DAMPING: f32 = 0.95;

/// Downward velocity gained per second; divided by the tick rate each frame.
pub const GRAVITY: f32 = 0.8;

/// Upward velocity added by a grounded jump.
pub const JUMP_IMPULSE: f32 = 0.3;

/// Share of the current orientation kept when blending toward the terrain
/// (or level) orientation each frame.
pub const ORIENTATION_BLEND: f32 = 0.9;

/// Chase camera distance behind the hovercraft.
pub const CAMERA_DISTANCE: f32 = 5.0;

/// Chase camera height above the hovercraft, also its minimum ground clearance.
pub const CAMERA_HEIGHT: f32 = 2.5;

/// Fraction of the remaining distance the camera covers each frame.
pub const CAMERA_SMOOTHING: f32 = 0.1;

/// Vertical field of view of each player camera (degrees).
pub const CAMERA_FOV_DEG: f32 = 60.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 3000.0;

/// Framebuffer size split between the player viewports.
pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 480.0;

/// Spawn positions are drawn from `[0, SPAWN_EXTENT)` on X and Z.
pub const SPAWN_EXTENT: f32 = 200.0;

/// Spawn height; players fall onto the terrain from here.
pub const SPAWN_HEIGHT: f32 = 30.0;

/// Uniform scale applied to the terrain model.
pub const TERRAIN_SCALE: f32 = 200.0;

/// Water plane height, the lowest a hovercraft may sink.
pub const FLOOR_HEIGHT: f32 = 6.1;

/// Half the side length of the square water plane centred on the origin.
pub const FLOOR_HALF_EXTENT: f32 = 500.0;

use crate::{
    collision::{FloorPlane, GroundContact, TerrainQuery, probe_ground},
    config::SimConfig,
    input::PlayerInput,
    math::{Vec3, look_at, normalize_or, slerp, world_up},
    player::Player,
    transform::Transform,
};

/// Output of a single [`integrate_position`] tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepMovementResult {
    /// Terrain contact found by the downward probe.
    pub contact: GroundContact,
    /// Whether the hovercraft ended below the water plane and was lifted onto it.
    pub floor_clamped: bool,
}

/// Fold one frame of controls into `player.velocity`.
///
/// Behavior
/// - Yaws the hovercraft about world-up by `turn * turn_rate`.
/// - Drives along the horizontal heading derived from the right axis, so a
///   pitched hovercraft still thrusts level.
/// - Applies damping, thrust, braking and gravity in that order.
/// - Adds the jump impulse only when grounded from the previous frame.
pub fn integrate_velocity(player: &mut Player, input: &PlayerInput, config: &SimConfig) {
    let physics = &config.physics;
    let transform = &mut player.transform;

    // 1) Turn.
    transform.rotate_axis(&world_up(), input.turn * physics.turn_rate);
    transform.recompute();

    // 2) Level heading.
    let forward = level_heading(transform);

    // 3) Thrust and braking.
    let thrust = forward * (input.accelerate * physics.accel_rate);
    let brake = forward * (-input.decelerate * physics.decel_rate);

    // 4) Integrate.
    let mut velocity = player.velocity * physics.damping + thrust + brake;
    velocity += config.gravity_per_frame();
    if player.grounded && input.jump {
        velocity.y += physics.jump_impulse;
    }

    player.velocity = velocity;
}

/// Move the hovercraft by its velocity and settle it against terrain and water.
///
/// Behavior
/// - Optionally caps the speed (`max_speed`).
/// - Translates by the per-frame velocity.
/// - Probes straight down from `ground_ray_height` above; a hit closer than
///   that means the hovercraft sank into the ground, so it snaps onto the hit
///   point, zeroes vertical velocity and aims to align with the surface normal.
///   Otherwise it is airborne and aims to level out.
/// - Blends toward that orientation, keeping `orientation_blend` of the current one.
/// - Clamps to the water plane.
pub fn integrate_position<T: TerrainQuery + ?Sized>(
    player: &mut Player,
    terrain: &T,
    floor: &FloorPlane,
    config: &SimConfig,
) -> StepMovementResult {
    let physics = &config.physics;

    if let Some(max_speed) = physics.max_speed {
        player.velocity = clamp_speed(player.velocity, max_speed);
    }

    player.transform.translate(player.velocity);

    // Ground probe, then the orientation the hovercraft should settle into.
    let contact = probe_ground(terrain, player.position(), physics.ground_ray_height);
    let target = match contact {
        GroundContact::Snapped { point, normal } => {
            player.transform.move_to(point);
            player.grounded = true;
            player.velocity.y = 0.0;

            let heading = player.transform.right().cross(&normal);
            look_at(&normalize_or(heading, player.transform.forward()), &normal)
        }
        GroundContact::Airborne => {
            player.grounded = false;
            look_at(&level_heading(&player.transform), &world_up())
        }
    };

    let current = player.transform.rotation();
    player
        .transform
        .rotate_set(slerp(&target, &current, physics.orientation_blend));

    // Water plane.
    let mut position = player.position();
    let floor_clamped = position.y < floor.height();
    if floor_clamped {
        position.y = floor.height();
        player.transform.move_to(position);
        player.grounded = true;
        player.velocity.y = 0.0;
    }

    player.transform.recompute();

    StepMovementResult {
        contact,
        floor_clamped,
    }
}

/// Horizontal heading under the hovercraft's right axis, ignoring pitch and roll.
#[inline]
fn level_heading(transform: &Transform) -> Vec3 {
    normalize_or(transform.right().cross(&world_up()), transform.forward())
}

#[inline]
fn clamp_speed(velocity: Vec3, max_speed: f32) -> Vec3 {
    let speed = velocity.norm();
    if speed > max_speed.max(0.0) && speed > 0.0 {
        velocity * (max_speed.max(0.0) / speed)
    } else {
        velocity
    }
}

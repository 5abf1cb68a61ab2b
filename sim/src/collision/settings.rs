/*!
Collision and ground-query tolerances.

These constants centralize the parameters used by the pairwise player
collision and the downward terrain rays. Keeping them together makes tuning
easier.

Notes
- Distances are in world units (the terrain model is scaled to ~200 units).
- The downward rays start far above the queried point so they always begin
  above any terrain height; there is no spatial index to find a tighter start.
*/

/// Radius of each hovercraft's collision sphere.
pub const COLLISION_RADIUS: f32 = 2.0;

/// Height above a hovercraft from which its ground ray is cast.
pub const GROUND_RAY_HEIGHT: f32 = 200.0;

/// Height above a camera from which its ground-avoidance ray is cast.
pub const CAMERA_RAY_HEIGHT: f32 = 400.0;

/// Practical small distance for comparisons.
/// Separations shorter than this have no usable direction.
pub const DIST_EPS: f32 = 1.0e-6;

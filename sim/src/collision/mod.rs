/*!
Collision root module.

Everything the physics and camera code asks of the world geometry, plus the
pairwise hovercraft response. The code is split for clarity:

- types:    shared data types (`RayHit`) and the `TerrainQuery` surface
- settings: collision radius, ray heights and tolerances
- terrain:  triangle-mesh raycasts (parry `TriMesh`)
- floor:    the water plane
- ground:   downward probes for snapping and camera clearance
- bounce:   equal-mass elastic exchange between two hovercrafts
*/

pub mod bounce;
pub mod floor;
pub mod ground;
pub mod settings;
pub mod terrain;
pub mod types;

// Re-export commonly used types and functions.
pub use bounce::{exchange_delta, resolve_pair};
pub use floor::{FloorBounds, FloorPlane};
pub use ground::{GroundContact, clearance_shortfall, probe_ground};
pub use terrain::TerrainMesh;
pub use types::{RayHit, TerrainQuery};

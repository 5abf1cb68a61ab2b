pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod math;
pub mod movement;
pub mod player;
pub mod render;
pub mod scene;
pub mod transform;
pub mod world;

/// Controller port / player slot index, `0..MAX_PLAYERS`.
pub type PlayerId = usize;

pub use camera::{Camera, Viewport};
pub use collision::{FloorPlane, RayHit, TerrainMesh, TerrainQuery};
pub use config::{CameraConfig, CollisionOrder, FrameRate, PhysicsConfig, SceneConfig, SimConfig};
pub use constants::MAX_PLAYERS;
pub use error::SimError;
pub use input::{Button, InputSource, PlayerInput, ScriptedInput};
pub use math::{Lcg, Mat4, Quat, Vec3};
pub use player::Player;
pub use render::{EntityId, ModelId, RecordingRenderer, RenderCall, Renderer};
pub use scene::{Prop, Scene, SceneModels};
pub use transform::Transform;
pub use world::World;

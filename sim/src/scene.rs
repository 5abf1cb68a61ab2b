/*!
Scene lifecycle: binds the world, the renderable scenery and the players.

`Scene::load` spawns one hovercraft per connected controller and splits the
screen between them; `Scene::frame` polls controllers, steps the world and
renders every player's viewport before presenting.
*/

use serde::{Deserialize, Serialize};

use crate::{
    PlayerId, SimError,
    camera::Viewport,
    collision::{FloorPlane, TerrainQuery},
    config::SimConfig,
    constants::MAX_PLAYERS,
    input::{InputSource, PlayerInput},
    math::{Vec3, world_up},
    render::{EntityId, ModelId, Renderer},
    transform::Transform,
    world::World,
};

/// Beacon marking the map origin, standing on the water.
const BEACON_SCALE: [f32; 3] = [1.5, 4.0, 1.5];
const INNER_RING_SCALE: [f32; 3] = [1.4, 1.0, 1.4];
const OUTER_RING_SCALE: [f32; 3] = [1.7, 0.7, 1.7];
/// Ring spin rates in radians per second; the outer ring turns the other way.
const INNER_RING_SPIN: f32 = 0.3;
const OUTER_RING_SPIN: f32 = -0.2;

/// Models the renderer has already loaded for this scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SceneModels {
    pub hovercraft: ModelId,
    pub terrain: ModelId,
    pub floor: ModelId,
    pub beacon: ModelId,
    pub ring: ModelId,
}

/// Non-player renderable: terrain, water and decorations.
#[derive(Debug, Clone)]
pub struct Prop {
    pub entity: EntityId,
    pub transform: Transform,
    /// Yaw per frame (radians); zero for static scenery.
    pub spin: f32,
}

impl Prop {
    fn new(entity: EntityId, position: Vec3, scale: Vec3, spin: f32) -> Self {
        let mut transform = Transform::new(position);
        transform.scale_to(scale);
        transform.recompute();
        Self {
            entity,
            transform,
            spin,
        }
    }

    fn animate(&mut self) {
        if self.spin != 0.0 {
            self.transform.rotate_axis(&world_up(), self.spin);
            self.transform.recompute();
        }
    }
}

#[derive(Debug)]
pub struct Scene<T> {
    world: World<T>,
    scenery: Vec<Prop>,
}

impl<T: TerrainQuery> Scene<T> {
    /// Build the scene around `terrain`.
    ///
    /// `terrain` must already be in world units; `config.scene.terrain_scale`
    /// is only applied to the terrain's render matrix. Fails with
    /// [`SimError::NoControllers`] when no pad is connected after
    /// `wait_for_controllers` returns.
    pub fn load<I, R>(
        terrain: T,
        config: SimConfig,
        models: &SceneModels,
        input: &mut I,
        renderer: &mut R,
    ) -> Result<Self, SimError>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        input.wait_for_controllers();
        let connected: Vec<PlayerId> = (0..MAX_PLAYERS)
            .filter(|&id| input.is_connected(id))
            .collect();
        if connected.is_empty() {
            return Err(SimError::NoControllers);
        }

        let scene = config.scene.clone();
        let camera = config.camera.clone();
        let frame_time = config.frame_rate.frame_time();

        let floor = FloorPlane::centered(scene.floor_height, scene.floor_half_extent);
        let origin = Vec3::new(0.0, scene.floor_height, 0.0);
        let water_corner = Vec3::new(
            -scene.floor_half_extent,
            scene.floor_height,
            -scene.floor_half_extent,
        );

        let scenery = vec![
            Prop::new(
                renderer.create(models.terrain),
                Vec3::zeros(),
                Vec3::repeat(scene.terrain_scale),
                0.0,
            ),
            Prop::new(
                renderer.create(models.floor),
                water_corner,
                Vec3::repeat(scene.floor_half_extent * 2.0),
                0.0,
            ),
            Prop::new(
                renderer.create(models.beacon),
                origin,
                Vec3::from(BEACON_SCALE),
                0.0,
            ),
            Prop::new(
                renderer.create(models.ring),
                origin,
                Vec3::from(INNER_RING_SCALE),
                INNER_RING_SPIN * frame_time,
            ),
            Prop::new(
                renderer.create(models.ring),
                origin,
                Vec3::from(OUTER_RING_SCALE),
                OUTER_RING_SPIN * frame_time,
            ),
        ];

        let mut world = World::new(terrain, floor, config);
        let total = connected.len();
        for (index, &id) in connected.iter().enumerate() {
            let spawn = world.random_spawn();
            let entity = renderer.create(models.hovercraft);
            world.create_player(id, entity, spawn)?;

            let viewport =
                Viewport::split(camera.screen_width, camera.screen_height, total, index);
            world.player_mut(id).camera_mut().setup(viewport, &camera);
        }

        log::info!(
            "scene loaded: {total} player(s) in slots {connected:?}, seed {}",
            scene.seed
        );

        Ok(Self { world, scenery })
    }

    /// Run one frame: poll, simulate, draw every active viewport, present.
    pub fn frame<I, R>(&mut self, input: &I, renderer: &mut R)
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let world = &self.world;
        let inputs: [PlayerInput; MAX_PLAYERS] = std::array::from_fn(|id| {
            if world.player(id).is_active() {
                PlayerInput::poll(input, id)
            } else {
                PlayerInput::default()
            }
        });

        for prop in &mut self.scenery {
            prop.animate();
        }

        let scenery = &self.scenery;
        self.world
            .step(&inputs, |id, world| draw_view(id, world, scenery, renderer));

        renderer.present();
    }

    /// Release every renderable owned by the scene.
    pub fn unload<R: Renderer + ?Sized>(mut self, renderer: &mut R) {
        for id in 0..MAX_PLAYERS {
            if let Some(entity) = self.world.remove_player(id) {
                renderer.destroy(entity);
            }
        }
        for prop in self.scenery.drain(..) {
            renderer.destroy(prop.entity);
        }
        log::info!("scene unloaded after {} frame(s)", self.world.frame());
    }

    pub fn world(&self) -> &World<T> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<T> {
        &mut self.world
    }

    pub fn scenery(&self) -> &[Prop] {
        &self.scenery
    }
}

fn draw_view<T, R>(id: PlayerId, world: &World<T>, scenery: &[Prop], renderer: &mut R)
where
    T: TerrainQuery,
    R: Renderer + ?Sized,
{
    let camera = world.player(id).camera();
    renderer.begin_view(camera.viewport(), camera.projection(), camera.view());

    for prop in scenery {
        renderer.draw(prop.entity, &prop.transform.matrix());
    }
    for player in world.players().iter().filter(|p| p.is_active()) {
        if let Some(entity) = player.entity() {
            renderer.draw(entity, &player.transform().matrix());
        }
    }
}

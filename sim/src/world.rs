/*!
Simulation context: the player slot table and everything a frame reads.

One `World` per loaded scene. It owns the terrain query surface, the water
plane, the tuning config and the PRNG, so independent simulations can coexist
in one process.
*/

use crate::{
    PlayerId, SimError,
    collision::{FloorPlane, TerrainQuery, exchange_delta, resolve_pair},
    config::{CollisionOrder, SimConfig},
    constants::MAX_PLAYERS,
    input::PlayerInput,
    math::{Lcg, Mat4, Vec3},
    movement::{StepMovementResult, integrate_position, integrate_velocity},
    player::Player,
    render::EntityId,
};

#[derive(Debug)]
pub struct World<T> {
    terrain: T,
    floor: FloorPlane,
    players: [Player; MAX_PLAYERS],
    config: SimConfig,
    rng: Lcg,
    frame: u64,
}

impl<T: TerrainQuery> World<T> {
    /// Empty world: every slot inactive, PRNG seeded from `config.scene.seed`.
    pub fn new(terrain: T, floor: FloorPlane, config: SimConfig) -> Self {
        Self {
            terrain,
            floor,
            players: Default::default(),
            rng: Lcg::new(config.scene.seed),
            config,
            frame: 0,
        }
    }

    /// Activate slot `id`, bind its renderable and place it at `spawn`.
    /// The camera starts on the spawn point and eases out behind the hovercraft.
    pub fn create_player(
        &mut self,
        id: PlayerId,
        entity: EntityId,
        spawn: Vec3,
    ) -> Result<(), SimError> {
        assert_slot(id);
        if self.players[id].active {
            return Err(SimError::SlotOccupied(id));
        }

        let player = &mut self.players[id];
        *player = Player::default();
        player.active = true;
        player.entity = Some(entity);
        player.transform.move_to(spawn);
        player.transform.recompute();
        player.camera.reset(spawn);

        log::debug!("player {id} created at {spawn:?} (entity {entity})");
        Ok(())
    }

    /// Deactivate slot `id`, handing back its entity for the caller to destroy.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<EntityId> {
        assert_slot(id);
        let player = &mut self.players[id];
        if !player.active {
            return None;
        }
        player.active = false;
        log::debug!("player {id} removed");
        player.entity.take()
    }

    /// Per-frame global hook, run once before any player updates.
    pub fn update_world(&mut self) {
        self.frame += 1;
    }

    /// Full physics update of one player, colliding it against every active
    /// player in a later slot before it moves. Inactive slots are skipped.
    pub fn update_player(
        &mut self,
        id: PlayerId,
        input: &PlayerInput,
    ) -> Option<StepMovementResult> {
        assert_slot(id);
        if !self.players[id].active {
            return None;
        }

        integrate_velocity(&mut self.players[id], input, &self.config);
        self.collide_with_later(id);
        Some(self.finish_player(id))
    }

    /// Advance player `id`'s chase camera and return its view matrix.
    pub fn update_camera(&mut self, id: PlayerId) -> Mat4 {
        assert_slot(id);
        let player = &mut self.players[id];
        player
            .camera
            .follow(&player.transform, &self.terrain, &self.config.camera)
    }

    /// Run one frame for every active player in slot order.
    ///
    /// `on_view` is called once per active player right after its camera has
    /// moved, which is where the caller renders that player's viewport.
    pub fn step(
        &mut self,
        inputs: &[PlayerInput; MAX_PLAYERS],
        mut on_view: impl FnMut(PlayerId, &Self),
    ) {
        self.update_world();

        match self.config.collision_order {
            CollisionOrder::Sequential => {
                for id in 0..MAX_PLAYERS {
                    if self.update_player(id, &inputs[id]).is_some() {
                        self.update_camera(id);
                        on_view(id, self);
                    }
                }
            }
            CollisionOrder::Deferred => {
                for id in self.active_ids() {
                    integrate_velocity(&mut self.players[id], &inputs[id], &self.config);
                }
                self.collide_all_deferred();
                for id in self.active_ids() {
                    self.finish_player(id);
                    self.update_camera(id);
                    on_view(id, self);
                }
            }
        }
    }

    /// Uniform spawn point over the configured square, at spawn height.
    pub fn random_spawn(&mut self) -> Vec3 {
        let scene = &self.config.scene;
        let x = self.rng.next_range(0.0, scene.spawn_extent);
        let z = self.rng.next_range(0.0, scene.spawn_extent);
        Vec3::new(x, scene.spawn_height, z)
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        assert_slot(id);
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        assert_slot(id);
        &mut self.players[id]
    }

    pub fn players(&self) -> &[Player; MAX_PLAYERS] {
        &self.players
    }

    pub fn active_ids(&self) -> impl Iterator<Item = PlayerId> + use<T> {
        let mask = self.players.each_ref().map(|p| p.active);
        (0..MAX_PLAYERS).filter(move |&id| mask[id])
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    pub fn floor(&self) -> &FloorPlane {
        &self.floor
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut Lcg {
        &mut self.rng
    }

    /// Frames stepped since the world was built.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn finish_player(&mut self, id: PlayerId) -> StepMovementResult {
        let result = integrate_position(
            &mut self.players[id],
            &self.terrain,
            &self.floor,
            &self.config,
        );
        log::trace!(
            "frame {} player {id}: pos {:?} vel {:?} grounded {}",
            self.frame,
            self.players[id].position(),
            self.players[id].velocity,
            self.players[id].grounded
        );
        result
    }

    fn collide_with_later(&mut self, id: PlayerId) {
        let radius = self.config.physics.collision_radius;
        let (head, tail) = self.players.split_at_mut(id + 1);
        let a = &mut head[id];

        for (offset, b) in tail.iter_mut().enumerate() {
            if !b.active {
                continue;
            }
            let (pos_a, pos_b) = (a.position(), b.position());
            if resolve_pair(&pos_a, &mut a.velocity, &pos_b, &mut b.velocity, radius) {
                log::trace!("player {id} bounced off player {}", id + 1 + offset);
            }
        }
    }

    // All pair deltas come from the velocities as they stood after integration,
    // so the result does not depend on which slot each player occupies.
    fn collide_all_deferred(&mut self) {
        let radius = self.config.physics.collision_radius;
        let mut deltas = [Vec3::zeros(); MAX_PLAYERS];

        for i in 0..MAX_PLAYERS {
            for j in i + 1..MAX_PLAYERS {
                let (a, b) = (&self.players[i], &self.players[j]);
                if !a.active || !b.active {
                    continue;
                }
                let (pos_a, pos_b) = (a.position(), b.position());
                let delta = exchange_delta(&pos_a, &a.velocity, &pos_b, &b.velocity, radius);
                if let Some(delta) = delta {
                    deltas[i] += delta;
                    deltas[j] -= delta;
                    log::trace!("player {i} bounced off player {j}");
                }
            }
        }

        for (player, delta) in self.players.iter_mut().zip(deltas) {
            player.velocity += delta;
        }
    }
}

#[inline]
fn assert_slot(id: PlayerId) {
    assert!(id < MAX_PLAYERS, "player id {id} out of range (max {MAX_PLAYERS})");
}

use hover_sim::{
    MAX_PLAYERS, PlayerInput, RecordingRenderer, Scene, SceneModels, ScriptedInput, SimConfig,
    TerrainMesh, TerrainQuery, Vec3,
};

const MODELS: SceneModels = SceneModels {
    hovercraft: 0,
    terrain: 1,
    floor: 2,
    beacon: 3,
    ring: 4,
};

fn hills() -> TerrainMesh {
    TerrainMesh::heightfield(40, 40, 5.0, |x, z| {
        8.0 + 6.0 * (x * 0.05).sin() * (z * 0.04).cos()
    })
    .unwrap()
}

fn run(seed: u32, pads: usize, frames: u32, drive: bool) -> Scene<TerrainMesh> {
    let mut config = SimConfig::default();
    config.scene.seed = seed;

    let mut input = ScriptedInput::new();
    for id in 0..pads {
        input.connect(id);
    }
    let mut renderer = RecordingRenderer::new();
    let mut scene = Scene::load(hills(), config, &MODELS, &mut input, &mut renderer).unwrap();

    for frame in 0..frames {
        if drive {
            for id in 0..pads {
                input.set(
                    id,
                    PlayerInput {
                        turn: ((frame as f32 + id as f32 * 20.0) * 0.02).sin(),
                        accelerate: 0.8,
                        decelerate: 0.0,
                        jump: frame % 90 == 45,
                    },
                );
            }
        }
        renderer.clear();
        scene.frame(&input, &mut renderer);
    }
    scene
}

#[test]
fn idle_players_come_to_rest_on_terrain_or_water() {
    let scene = run(3, MAX_PLAYERS, 400, false);
    let world = scene.world();
    let floor = world.floor().height();

    for id in 0..MAX_PLAYERS {
        let player = world.player(id);
        let pos = player.position();
        assert!(player.is_grounded(), "player {id} still airborne at {pos:?}");
        assert!(pos.y >= floor - 1.0e-4, "player {id} sank below water: {pos:?}");

        // Nothing of the terrain is left above a resting player.
        let probe = world.terrain().raycast(pos + Vec3::new(0.0, 100.0, 0.0), -Vec3::y());
        if let Some(hit) = probe {
            assert!(hit.distance >= 100.0 - 1.0e-2, "player {id} buried at {pos:?}");
        }
    }
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let a = run(11, 3, 240, true);
    let b = run(11, 3, 240, true);

    for id in 0..3 {
        let (pa, pb) = (a.world().player(id), b.world().player(id));
        assert_eq!(pa.position(), pb.position());
        assert_eq!(pa.velocity(), pb.velocity());
        assert_eq!(pa.transform().rotation(), pb.transform().rotation());
        assert_eq!(pa.camera().position(), pb.camera().position());
    }
}

#[test]
fn seed_changes_spawn_points() {
    let a = run(1, 2, 0, false);
    let b = run(2, 2, 0, false);
    assert_ne!(a.world().player(0).position(), b.world().player(0).position());
}

#[test]
fn driven_players_keep_a_sane_state() {
    let scene = run(5, 2, 600, true);
    let world = scene.world();

    for id in 0..2 {
        let player = world.player(id);
        assert!(player.position().iter().all(|c| c.is_finite()));
        assert!(player.velocity().norm() < 5.0);

        let t = player.transform();
        assert!((t.forward().norm() - 1.0).abs() < 1.0e-4);
        assert!(t.forward().dot(&t.up()).abs() < 1.0e-4);
        assert!(t.forward().dot(&t.right()).abs() < 1.0e-4);
    }
    assert_eq!(world.frame(), 600);
}

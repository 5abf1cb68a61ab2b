use std::path::PathBuf;

use clap::Parser;
use hover_sim::{
    EntityId, InputSource, MAX_PLAYERS, Mat4, ModelId, PlayerId, PlayerInput, Renderer, Scene,
    SceneModels, ScriptedInput, SimConfig, TerrainMesh, Viewport,
};

#[derive(Parser)]
#[command(author, version, about = "Run the hovercraft simulation without a display", long_about = None)]
struct Args {
    /// JSON file overriding the built-in tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Connected controllers (1-4)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Heightfield cells per side
    #[arg(long, default_value_t = 64)]
    cells: u32,

    /// Log player positions every this many frames
    #[arg(long, default_value_t = 60)]
    report_every: u32,
}

/// Renderer that only counts and traces what it is asked to draw.
#[derive(Default)]
struct LogRenderer {
    next_entity: EntityId,
    draws: u64,
}

impl Renderer for LogRenderer {
    fn create(&mut self, model: ModelId) -> EntityId {
        let entity = self.next_entity;
        self.next_entity += 1;
        log::debug!("create entity {entity} from model {model}");
        entity
    }

    fn destroy(&mut self, entity: EntityId) {
        log::debug!("destroy entity {entity}");
    }

    fn begin_view(&mut self, viewport: &Viewport, _projection: &Mat4, _view: &Mat4) {
        log::trace!("view {viewport:?}");
    }

    fn draw(&mut self, entity: EntityId, model_matrix: &Mat4) {
        self.draws += 1;
        let at = (model_matrix[(0, 3)], model_matrix[(1, 3)], model_matrix[(2, 3)]);
        log::trace!("draw {entity} at {at:?}");
    }

    fn present(&mut self) {}
}

/// Each pad drives forward while weaving, with its own phase, and hops now and then.
fn drive(input: &mut ScriptedInput, frame: u32) {
    for id in 0..MAX_PLAYERS {
        if !input.is_connected(id) {
            continue;
        }
        let t = frame as f32 / 60.0 + id as f32;
        input.set(
            id,
            PlayerInput {
                turn: (t * 0.7).sin(),
                accelerate: 1.0,
                decelerate: 0.0,
                jump: (frame + id as u32 * 37) % 240 == 0,
            },
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };

    // Rolling hills spanning the spawn square, dipping under the water in places.
    let extent = config.scene.terrain_scale;
    let cell_size = extent / args.cells.max(1) as f32;
    let terrain = TerrainMesh::heightfield(args.cells, args.cells, cell_size, |x, z| {
        8.0 + 6.0 * (x * 0.05).sin() * (z * 0.04).cos()
    })?;
    log::info!("terrain: {terrain:?}, {extent} units square");

    let mut input = ScriptedInput::new();
    for id in 0..args.players.clamp(1, MAX_PLAYERS) {
        input.connect(id);
    }

    let models = SceneModels {
        hovercraft: 0,
        terrain: 1,
        floor: 2,
        beacon: 3,
        ring: 4,
    };
    let mut renderer = LogRenderer::default();
    let mut scene = Scene::load(terrain, config, &models, &mut input, &mut renderer)?;

    for frame in 0..args.frames {
        drive(&mut input, frame);
        scene.frame(&input, &mut renderer);

        if args.report_every > 0 && (frame + 1) % args.report_every == 0 {
            let world = scene.world();
            let ids: Vec<PlayerId> = world.active_ids().collect();
            for id in ids {
                let player = world.player(id);
                log::info!(
                    "frame {} player {id}: pos {:?} speed {:.3} grounded {}",
                    world.frame(),
                    player.position(),
                    player.velocity().norm(),
                    player.is_grounded()
                );
            }
        }
    }

    log::info!("{} frames, {} draws", args.frames, renderer.draws);
    scene.unload(&mut renderer);
    Ok(())
}

//! walkto: drives one pathing agent through a generated 64×64 world.
//!
//! The world has rolling hills, a lava pool, thorn bushes and a long fence
//! with a single gate-sized gap.  The agent walks to the far corner, then
//! engages the wild creatures and finally grooms the horse.
//!
//! ```text
//! RUST_LOG=debug cargo run -p walkto -- [config.json]
//! ```

mod host;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use pt_agent::{Agent, AgentBuilder, AgentConfig};
use pt_behavior::{BehaviorRequest, Entity};
use pt_core::{EntityId, TileCoord};
use pt_mobility::{Body, SimBody};
use pt_spatial::{GridTerrain, Structure, StructureIndex, StructureKind, TileKind, WallEdge};

use host::DemoHost;

// ── Constants ─────────────────────────────────────────────────────────────────

const SIDE:       u32 = 64;
const SEED:       u64 = 42;
const FENCE_X:    i32 = 32;
const GAP_Y:      i32 = 40;
const WALK_LIMIT: Duration = Duration::from_secs(60);

// ── World ─────────────────────────────────────────────────────────────────────

fn build_terrain(rng: &mut SmallRng) -> GridTerrain {
    let mut terrain = GridTerrain::flat(TileCoord::new(0, 0), SIDE, SIDE);

    // Gentle noise on every corner; steep enough in places to block.
    for y in 0..=SIDE as i32 {
        for x in 0..=SIDE as i32 {
            let hill = ((x as f32 / 9.0).sin() + (y as f32 / 7.0).cos()) * 2.0;
            terrain.set_corner_height(x, y, hill + rng.gen_range(-0.4..0.4));
        }
    }

    for y in 20..26 {
        for x in 10..18 {
            terrain.set_kind(TileCoord::new(x, y), TileKind::Lava);
        }
    }
    for _ in 0..60 {
        let tile = TileCoord::new(rng.gen_range(0..SIDE as i32), rng.gen_range(0..SIDE as i32));
        terrain.set_kind(tile, TileKind::ThornBush);
    }
    terrain
}

fn build_structures() -> StructureIndex {
    StructureIndex::from_structures(
        (0..SIDE as i32)
            .filter(|&y| y != GAP_Y)
            .map(|y| Structure::ground(TileCoord::new(FENCE_X, y), WallEdge::West, StructureKind::Fence)),
    )
}

fn build_host() -> DemoHost {
    let at = |x, y| TileCoord::new(x, y).center();
    let mut horse = Entity::creature(EntityId(4), "horse", at(50, 20));
    horse.groomable = true;
    let mut pet = Entity::creature(EntityId(5), "dog", at(47, 46));
    pet.hover_text = "dog, Alice's pet".into();

    DemoHost::new(vec![
        Entity::creature(EntityId(1), "rat", at(44, 50)),
        Entity::creature(EntityId(2), "wild boar", at(56, 36)),
        Entity::creature(EntityId(3), "preserved spider", at(52, 52)),
        horse,
        pet,
    ])
}

fn load_config() -> Result<AgentConfig> {
    let Some(path) = std::env::args().nth(1) else {
        let mut config = AgentConfig::default();
        config.cache.side = 128;
        config.movement.speed_kmh = 144.0;
        config.movement.tick = Duration::from_millis(50);
        config.behavior.action_poll = Duration::from_millis(250);
        config.behavior.action_timeout = Duration::from_secs(3);
        return Ok(config);
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    AgentConfig::from_json_str(&json).with_context(|| format!("parsing {path}"))
}

/// Forward host event lines until the behaviour ends or `limit` passes.
fn pump(agent: &Agent, host: &DemoHost, limit: Duration) {
    let started = Instant::now();
    while agent.active_behavior().is_some() && started.elapsed() < limit {
        for line in host.drain_lines() {
            agent.notify_event(&line);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    let terrain = Arc::new(build_terrain(&mut rng));
    let structures = Arc::new(build_structures());
    let body = Arc::new(SimBody::at_tile(TileCoord::new(4, 4)));
    let host = Arc::new(build_host());
    info!(side = SIDE, fence = structures.len(), "world generated");

    let agent = AgentBuilder::new(terrain, structures, body.clone(), host.clone())
        .config(config)
        .build()?;

    // 1. One-off path query.
    let goal = TileCoord::new(58, 58);
    match agent.find_path(goal) {
        Ok(path) => info!(tiles = path.len(), expanded = path.expanded, "path found"),
        Err(err) => info!(%err, "no route"),
    }

    // 2. Walk there.
    agent.start(BehaviorRequest::WalkTo(goal))?;
    pump(&agent, &host, WALK_LIMIT);
    info!(position = %body.position(), tile = %body.tile(), "walk done");

    // 3. Engage whatever is wild, then stop with a second toggle.
    agent.toggle(BehaviorRequest::Engage)?;
    pump(&agent, &host, Duration::from_secs(20));
    agent.toggle(BehaviorRequest::Engage)?;
    info!(remaining = host.nearby_count(), "engage stopped");

    // 4. Groom the horse.
    agent.start(BehaviorRequest::Groom)?;
    pump(&agent, &host, Duration::from_secs(15));
    agent.stop();

    let drained = agent.handle().block_on(agent.shutdown());
    info!(drained, actions = host.action_count(), "agent shut down");
    Ok(())
}

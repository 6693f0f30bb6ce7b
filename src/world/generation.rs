//! Initial world generation and resource placement
//!
//! Placement is rejection sampling: pick a random point on a tile the kind
//! accepts, and keep it only if it lies outside every existing resource.

use rand::Rng;
use tracing::{debug, info};

use crate::behavior::graph::BehaviorGraph;
use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Timestamp, Vec2};
use crate::data::resources::ResourceSettings;
use crate::data::GameData;
use crate::entity::Entity;
use crate::world::state::WorldState;
use crate::world::terrain::TerrainGrid;

/// Build a fresh world: terrain, initial resources and one starting actor
pub fn generate_world<R: Rng + ?Sized>(
    config: &SimulationConfig,
    data: &GameData,
    now: Timestamp,
    rng: &mut R,
) -> WorldState {
    let (width, height) = config.grid_dimensions();
    let terrain = TerrainGrid::generate(
        width,
        height,
        config.tile_size,
        config.terrain_zoom,
        config.terrain_seed,
    );
    let mut state = WorldState::new(terrain, now);

    for settings in data.resources() {
        let Some((min, max)) = settings.initial_generation else {
            continue;
        };
        let target = rng.gen_range(min..=max);
        let mut placed = 0;
        for _ in 0..target {
            if place_resource(&mut state, settings, config.placement_attempts, rng).is_some() {
                placed += 1;
            }
        }
        debug!(kind = %settings.kind, target, placed, "Generated resources");
    }

    let center = state.terrain.world_size() * 0.5;
    let mut actor = Entity::actor(EntityId::from_rng(rng), center, config);
    if let Some(a) = actor.as_actor_mut() {
        a.behavior = Some(BehaviorGraph::forager());
    }
    state.entities.push(actor);

    info!(
        entities = state.entities.len(),
        width, height, "Generated new world"
    );
    state
}

/// Try to place one resource of `settings.kind`. Returns the new entity id,
/// or `None` when every attempt collided or no tile accepts the kind.
pub fn place_resource<R: Rng + ?Sized>(
    state: &mut WorldState,
    settings: &ResourceSettings,
    attempts: u32,
    rng: &mut R,
) -> Option<EntityId> {
    let candidates = state.terrain.tiles_where(|t| settings.accepts_terrain(t));
    if candidates.is_empty() {
        return None;
    }
    let tile_size = state.terrain.tile_size;

    for _ in 0..attempts {
        let (tx, ty) = candidates[rng.gen_range(0..candidates.len())];
        let offset = Vec2::new(rng.gen::<f32>() * tile_size, rng.gen::<f32>() * tile_size);
        let position = state.terrain.tile_origin(tx, ty) + offset;

        if is_clear(state, position) {
            let entity = Entity::resource(EntityId::from_rng(rng), position, settings);
            let id = entity.id;
            state.entities.push(entity);
            return Some(id);
        }
    }
    None
}

/// True if `position` lies strictly outside every resource's radius
fn is_clear(state: &WorldState, position: Vec2) -> bool {
    state
        .resources()
        .all(|r| r.position.distance(&position) > r.size)
}

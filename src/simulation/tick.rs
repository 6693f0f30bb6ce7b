//! Tick system - advance the world to a target timestamp
//!
//! One call is one tick. The input snapshot is never modified; a new
//! snapshot is built and returned.
//!
//! Order within a tick:
//! 1. Apply queued world commands (build, update actor)
//! 2. Compute elapsed time since the last reconciliation
//! 3. Run blueprint countdowns
//! 4. Per actor: vitals, decision, intent
//! 5. Declare game over when no actor is left; a finished game stops here
//! 6. Regrow resources
//! 7. Roll for a spawned base resource
//! 8. Stamp the new timestamp and tick

use rand::Rng;
use tracing::{debug, info};

use crate::behavior::decide;
use crate::command::{apply_world_commands, WorldCommand};
use crate::construction;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{ms_to_secs, Timestamp};
use crate::data::GameData;
use crate::entity::Entity;
use crate::simulation::intent::apply_intent;
use crate::simulation::regrowth;
use crate::world::generation::place_resource;
use crate::world::state::WorldState;

/// Advance `state` to `target`, returning the next snapshot.
///
/// Fails only with `SimError::TimeReversal` when `target` precedes the
/// state's timestamp.
pub fn advance<R: Rng + ?Sized>(
    state: &WorldState,
    data: &GameData,
    config: &SimulationConfig,
    target: Timestamp,
    commands: &[WorldCommand],
    rng: &mut R,
) -> Result<WorldState> {
    let delta_ms = target - state.timestamp;
    if delta_ms < 0 {
        return Err(SimError::TimeReversal {
            target,
            last: state.timestamp,
        });
    }

    let mut next = state.clone();

    apply_world_commands(&mut next, data, commands, rng);

    let dt = ms_to_secs(delta_ms);
    for id in construction::advance_countdowns(&mut next, data, dt) {
        debug!(blueprint = %id, "Blueprint finished without deliveries");
    }

    // Resources stay frozen once the game is over
    if next.is_game_over {
        finish_tick(&mut next, target);
        return Ok(next);
    }

    for id in next.actor_ids() {
        let Some(actor) = next.get_mut(id).and_then(Entity::as_actor_mut) else {
            continue;
        };
        if actor.is_dead() {
            next.remove(id);
            continue;
        }

        let report = actor.vitals.update(dt, &mut actor.inventory, config);
        if actor.is_dead() {
            info!(actor = %id, tick = next.tick, "Actor died");
            next.remove(id);
            continue;
        }
        if report.ate || report.drank {
            debug!(actor = %id, ate = report.ate, drank = report.drank, "Actor consumed supplies");
        }

        let intent = match next.get(id) {
            Some(entity) => decide(entity, &next, data),
            None => continue,
        };
        apply_intent(&mut next, data, id, &intent, dt, target, rng);
    }

    if next.actor_count() == 0 {
        next.is_game_over = true;
        info!(tick = next.tick, "Last actor is gone, game over");
        finish_tick(&mut next, target);
        return Ok(next);
    }

    regrowth::regrow_all(&mut next, data, target);

    if config.spawn_chance_per_tick > 0.0 && rng.gen_bool(config.spawn_chance_per_tick.min(1.0)) {
        if let Some(settings) = data.resource(config.spawn_resource_kind) {
            if let Some(id) = place_resource(&mut next, settings, config.placement_attempts, rng) {
                debug!(kind = %settings.kind, resource = %id, "Spawned resource");
            }
        }
    }

    finish_tick(&mut next, target);
    Ok(next)
}

fn finish_tick(state: &mut WorldState, target: Timestamp) {
    state.timestamp = target;
    state.tick += 1;
}

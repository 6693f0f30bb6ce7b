//! Command execution - apply queued world commands at the start of a tick

use rand::Rng;
use tracing::warn;

use crate::command::WorldCommand;
use crate::construction;
use crate::core::types::EntityId;
use crate::data::GameData;
use crate::entity::Entity;
use crate::world::state::WorldState;

/// Apply every command in order. Invalid commands are logged and skipped.
pub fn apply_world_commands<R: Rng + ?Sized>(
    state: &mut WorldState,
    data: &GameData,
    commands: &[WorldCommand],
    rng: &mut R,
) {
    for command in commands {
        match command {
            WorldCommand::BuildAction { kind, location } => {
                construction::place_blueprint(state, data, EntityId::from_rng(rng), *kind, *location);
            }
            WorldCommand::UpdateActor { id, actor } => {
                update_actor(state, *id, actor);
            }
        }
    }
}

/// Replace the actor with `id`. The replacement keeps the original id.
/// Returns false if the command was rejected.
pub fn update_actor(state: &mut WorldState, id: EntityId, replacement: &Entity) -> bool {
    let Some(actor) = replacement.as_actor() else {
        warn!(actor = %id, "UpdateActor rejected: replacement is not an actor");
        return false;
    };
    if let Some(graph) = &actor.behavior {
        if let Err(e) = graph.validate() {
            warn!(actor = %id, error = %e, "UpdateActor rejected");
            return false;
        }
    }

    let Some(slot) = state.get_mut(id).filter(|e| e.is_actor()) else {
        warn!(actor = %id, "UpdateActor names no existing actor");
        return false;
    };
    *slot = Entity {
        id,
        ..replacement.clone()
    };
    true
}

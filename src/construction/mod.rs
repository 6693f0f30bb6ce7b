//! Construction pipeline - blueprint item intake, build-time gating and the
//! blueprint to structure/resource transition

use tracing::{debug, info, warn};

use crate::core::types::{EntityId, Vec2};
use crate::data::blueprints::{BlueprintKind, CompletionRecipe};
use crate::data::items::ItemKind;
use crate::data::GameData;
use crate::entity::{Entity, EntityKind, Structure};
use crate::world::state::WorldState;

/// Outcome of one insert attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryResult {
    /// Countdown still running; nothing was transferred
    Waiting { remaining: f32 },
    /// One item transferred, more are still required
    Delivered,
    /// Last item transferred; the blueprint became a new entity
    Completed { entity: EntityId },
    /// The blueprint already has enough of this item
    NotNeeded,
    /// The actor holds none of the item
    MissingItem,
    /// Blueprint or actor no longer exists
    NotFound,
}

/// Add a new empty blueprint of `kind` at `location`
pub fn place_blueprint(
    state: &mut WorldState,
    data: &GameData,
    id: EntityId,
    kind: BlueprintKind,
    location: Vec2,
) -> Option<EntityId> {
    let Some(settings) = data.blueprint(kind) else {
        warn!(%kind, "No settings for blueprint kind");
        return None;
    };
    state.entities.push(Entity::blueprint(id, location, settings));
    debug!(%kind, x = location.x, y = location.y, "Placed blueprint");
    Some(id)
}

/// Run every blueprint's countdown down by `dt` seconds, floored at zero.
///
/// A blueprint that has nothing left to receive completes once its
/// countdown reaches zero. Returns the ids of blueprints completed here.
pub fn advance_countdowns(state: &mut WorldState, data: &GameData, dt: f32) -> Vec<EntityId> {
    let mut satisfied = Vec::new();
    for entity in state.entities.iter_mut() {
        let id = entity.id;
        if let Some(blueprint) = entity.as_blueprint_mut() {
            blueprint.remaining_build_time = (blueprint.remaining_build_time - dt).max(0.0);
            if blueprint.remaining_build_time <= 0.0 && blueprint.is_complete() {
                satisfied.push(id);
            }
        }
    }

    satisfied
        .into_iter()
        .filter_map(|id| complete_blueprint(state, data, id))
        .collect()
}

/// Move one `item` from the actor into the blueprint if its countdown has
/// elapsed, completing the blueprint when nothing else is required
pub fn insert_item(
    state: &mut WorldState,
    data: &GameData,
    actor_id: EntityId,
    blueprint_id: EntityId,
    item: ItemKind,
) -> DeliveryResult {
    let Some(blueprint) = state.get(blueprint_id).and_then(Entity::as_blueprint) else {
        return DeliveryResult::NotFound;
    };
    if blueprint.needed(item) == 0 {
        return DeliveryResult::NotNeeded;
    }
    if blueprint.remaining_build_time > 0.0 {
        return DeliveryResult::Waiting {
            remaining: blueprint.remaining_build_time,
        };
    }

    let Some(actor) = state.get_mut(actor_id).and_then(Entity::as_actor_mut) else {
        return DeliveryResult::NotFound;
    };
    if actor.inventory.remove(item, 1) == 0 {
        return DeliveryResult::MissingItem;
    }

    let Some(blueprint) = state.get_mut(blueprint_id).and_then(Entity::as_blueprint_mut) else {
        return DeliveryResult::NotFound;
    };
    blueprint.record_delivery(item);
    debug!(blueprint = %blueprint_id, %item, progress = blueprint.progress(), "Delivered item");

    if blueprint.is_complete() {
        match complete_blueprint(state, data, blueprint_id) {
            Some(entity) => DeliveryResult::Completed { entity },
            None => DeliveryResult::NotFound,
        }
    } else {
        blueprint.remaining_build_time = blueprint.build_time_per_item;
        DeliveryResult::Delivered
    }
}

/// Replace a blueprint with its completion entity, reusing the blueprint's
/// id and position. Returns the new entity's id.
pub fn complete_blueprint(
    state: &mut WorldState,
    data: &GameData,
    blueprint_id: EntityId,
) -> Option<EntityId> {
    let idx = state.index_of(blueprint_id)?;
    let entity = &state.entities[idx];
    let blueprint = entity.as_blueprint()?;

    let replacement = match blueprint.completion {
        CompletionRecipe::Structure => Entity {
            id: entity.id,
            position: entity.position,
            size: entity.size,
            icon: entity.icon.clone(),
            kind: EntityKind::Structure(Structure {
                kind: blueprint.kind,
            }),
        },
        CompletionRecipe::Resource(kind) => {
            let Some(settings) = data.resource(kind) else {
                warn!(%kind, blueprint = %blueprint_id, "Completion resource kind has no settings");
                return None;
            };
            Entity::resource(entity.id, entity.position, settings)
        }
    };

    info!(
        blueprint = %blueprint_id,
        kind = %blueprint.kind,
        completion = ?blueprint.completion,
        "Blueprint completed"
    );
    state.entities[idx] = replacement;
    Some(blueprint_id)
}

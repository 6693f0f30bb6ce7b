//! Intents and their effects on the world

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::construction::{self, DeliveryResult};
use crate::core::types::{EntityId, Timestamp, Vec2};
use crate::data::items::ItemKind;
use crate::data::GameData;
use crate::entity::Entity;
use crate::simulation::harvest::{self, HarvestOutcome};
use crate::world::state::WorldState;

/// How an actor moves this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    /// Walk along a direction vector, scaled by speed
    Direction(Vec2),
    /// Walk towards a point, stopping on arrival
    Destination(Vec2),
}

/// The single action an actor performs in a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    Idle,
    Move(Movement),
    Collect { resource: EntityId },
    InsertItem { blueprint: EntityId, item: ItemKind },
    CraftItem { recipe_id: String },
}

/// Apply one actor's intent. Targets that vanished earlier in the tick are
/// silently ignored.
pub fn apply_intent<R: Rng + ?Sized>(
    state: &mut WorldState,
    data: &GameData,
    actor_id: EntityId,
    intent: &Intent,
    dt: f32,
    now: Timestamp,
    rng: &mut R,
) {
    match intent {
        Intent::Idle => {}

        Intent::Move(movement) => {
            let Some(entity) = state.get_mut(actor_id) else {
                return;
            };
            let Some(speed) = entity.as_actor().map(|a| a.speed) else {
                return;
            };
            entity.position = match *movement {
                Movement::Direction(direction) => entity.position + direction * (speed * dt),
                Movement::Destination(target) => entity.position.move_towards(target, speed * dt),
            };
        }

        Intent::Collect { resource } => {
            if let HarvestOutcome::Harvested { depleted: true, .. } =
                harvest::collect(state, data, actor_id, *resource, dt, now, rng)
            {
                debug!(actor = %actor_id, resource = %resource, "Resource depleted");
            }
        }

        Intent::InsertItem { blueprint, item } => {
            match construction::insert_item(state, data, actor_id, *blueprint, *item) {
                DeliveryResult::Completed { entity } => {
                    debug!(actor = %actor_id, %entity, "Delivered final item");
                }
                DeliveryResult::MissingItem | DeliveryResult::NotNeeded => {
                    trace!(actor = %actor_id, blueprint = %blueprint, %item, "Delivery skipped");
                }
                DeliveryResult::Waiting { .. }
                | DeliveryResult::Delivered
                | DeliveryResult::NotFound => {}
            }
        }

        Intent::CraftItem { recipe_id } => {
            let Some(recipe) = data.recipe(recipe_id) else {
                return;
            };
            let Some(actor) = state.get_mut(actor_id).and_then(Entity::as_actor_mut) else {
                return;
            };
            if actor.inventory.consume_items(&recipe.required_items) {
                actor
                    .inventory
                    .add(recipe.output.item, recipe.output.quantity);
                debug!(actor = %actor_id, recipe = %recipe.id, "Crafted item");
            }
        }
    }
}

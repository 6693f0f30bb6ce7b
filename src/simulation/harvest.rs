//! Harvest interaction - progress gauge, drop rolls and depletion

use rand::Rng;
use tracing::debug;

use crate::core::types::{EntityId, Timestamp};
use crate::data::items::ItemStack;
use crate::data::resources::{InteractionStrategy, InteractionType, ResourceSettings};
use crate::data::GameData;
use crate::entity::Entity;
use crate::world::state::WorldState;

#[derive(Debug, Clone, PartialEq)]
pub enum HarvestOutcome {
    /// Gauge advanced, harvest not finished
    Progressing { progress: f32 },
    /// One unit harvested
    Harvested { drops: Vec<ItemStack>, depleted: bool },
    /// Target gone, depleted, or not harvestable
    Unavailable,
}

/// Advance `actor_id`'s harvest of `resource_id` by `dt` seconds
pub fn collect<R: Rng + ?Sized>(
    state: &mut WorldState,
    data: &GameData,
    actor_id: EntityId,
    resource_id: EntityId,
    dt: f32,
    now: Timestamp,
    rng: &mut R,
) -> HarvestOutcome {
    let Some(resource) = state.get(resource_id).and_then(Entity::as_resource) else {
        return HarvestOutcome::Unavailable;
    };
    if resource.quantity_remaining == 0 {
        return HarvestOutcome::Unavailable;
    }
    let Some(settings) = data.resource(resource.kind) else {
        return HarvestOutcome::Unavailable;
    };
    let Some(strategy) = settings.strategy_for(InteractionType::Harvest) else {
        return HarvestOutcome::Unavailable;
    };
    let step = if resource.harvest_time > 0.0 {
        dt / resource.harvest_time
    } else {
        1.0
    };

    let Some(actor) = state.get_mut(actor_id).and_then(Entity::as_actor_mut) else {
        return HarvestOutcome::Unavailable;
    };
    actor.harvest_progress = (actor.harvest_progress + step).min(1.0);
    if actor.harvest_progress < 1.0 {
        return HarvestOutcome::Progressing {
            progress: actor.harvest_progress,
        };
    }
    actor.harvest_progress = 0.0;

    let drops = match strategy {
        InteractionStrategy::RollDrops => roll_drops(settings, rng),
    };
    for stack in &drops {
        actor.inventory.add(stack.item, stack.quantity);
    }

    let destroy = settings.destroy_on_depleted;
    let Some(resource) = state.get_mut(resource_id).and_then(Entity::as_resource_mut) else {
        return HarvestOutcome::Unavailable;
    };
    resource.quantity_remaining -= 1;
    resource.last_harvested = Some(now);
    let depleted = resource.quantity_remaining == 0;

    debug!(
        actor = %actor_id,
        resource = %resource_id,
        kind = %resource.kind,
        remaining = resource.quantity_remaining,
        drops = drops.len(),
        "Harvested resource"
    );

    if depleted && destroy {
        state.remove(resource_id);
    }

    HarvestOutcome::Harvested { drops, depleted }
}

/// Roll every drop entry independently against its chance
pub fn roll_drops<R: Rng + ?Sized>(settings: &ResourceSettings, rng: &mut R) -> Vec<ItemStack> {
    settings
        .drops
        .iter()
        .filter(|drop| drop.amount > 0 && rng.gen::<f32>() < drop.chance)
        .map(|drop| ItemStack::new(drop.item, drop.amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Vec2;
    use crate::data::items::ItemKind;
    use crate::data::resources::ResourceKind;
    use crate::world::terrain::{TerrainGrid, TerrainType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(kind: ResourceKind) -> (WorldState, GameData, EntityId, EntityId) {
        let data = GameData::with_defaults();
        let mut state = WorldState::new(TerrainGrid::uniform(4, 4, 10.0, TerrainType::Soil), 0);
        let actor = Entity::actor(EntityId::new(), Vec2::ZERO, &SimulationConfig::default());
        let resource = Entity::resource(EntityId::new(), Vec2::ZERO, data.resource(kind).unwrap());
        let ids = (actor.id, resource.id);
        state.entities.push(actor);
        state.entities.push(resource);
        (state, data, ids.0, ids.1)
    }

    fn progress(state: &WorldState, actor: EntityId) -> f32 {
        state.get(actor).unwrap().as_actor().unwrap().harvest_progress
    }

    #[test]
    fn test_progress_accumulates_then_harvests() {
        let (mut state, data, actor, stone) = setup(ResourceKind::Stone);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // Stone takes 10s per harvest
        let out = collect(&mut state, &data, actor, stone, 4.0, 4_000, &mut rng);
        assert_eq!(out, HarvestOutcome::Progressing { progress: 0.4 });

        let out = collect(&mut state, &data, actor, stone, 7.0, 11_000, &mut rng);
        assert!(matches!(out, HarvestOutcome::Harvested { depleted: false, .. }));
        assert_eq!(progress(&state, actor), 0.0);

        let inv = &state.get(actor).unwrap().as_actor().unwrap().inventory;
        assert_eq!(inv.quantity(ItemKind::Stone), 1);

        let res = state.get(stone).unwrap().as_resource().unwrap();
        assert_eq!(res.quantity_remaining, 49);
        assert_eq!(res.last_harvested, Some(11_000));
    }

    #[test]
    fn test_depleted_destroyable_resource_is_removed() {
        let (mut state, data, actor, stick) = setup(ResourceKind::Stick);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        if let Some(r) = state.get_mut(stick).and_then(Entity::as_resource_mut) {
            r.quantity_remaining = 1;
        }

        let out = collect(&mut state, &data, actor, stick, 5.0, 5_000, &mut rng);
        assert!(matches!(out, HarvestOutcome::Harvested { depleted: true, .. }));
        assert!(state.get(stick).is_none());

        let out = collect(&mut state, &data, actor, stick, 5.0, 10_000, &mut rng);
        assert_eq!(out, HarvestOutcome::Unavailable);
    }

    #[test]
    fn test_depleted_regrowing_resource_is_kept() {
        let (mut state, data, actor, grass) = setup(ResourceKind::Grass);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        if let Some(r) = state.get_mut(grass).and_then(Entity::as_resource_mut) {
            r.quantity_remaining = 1;
        }

        collect(&mut state, &data, actor, grass, 1.0, 1_000, &mut rng);
        let res = state.get(grass).unwrap().as_resource().unwrap();
        assert_eq!(res.quantity_remaining, 0);

        // An empty resource cannot be harvested until it regrows
        let out = collect(&mut state, &data, actor, grass, 1.0, 2_000, &mut rng);
        assert_eq!(out, HarvestOutcome::Unavailable);
    }

    #[test]
    fn test_guaranteed_and_impossible_drops() {
        let mut settings = ResourceSettings::new(ResourceKind::Tree, 1, 1.0, 1.0)
            .with_drop(ItemKind::Log, 1.0, 2)
            .with_drop(ItemKind::Leaf, 0.0, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..50 {
            assert_eq!(roll_drops(&settings, &mut rng), vec![ItemStack::new(ItemKind::Log, 2)]);
        }
        settings.drops.clear();
        assert!(roll_drops(&settings, &mut rng).is_empty());
    }
}

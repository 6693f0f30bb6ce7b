//! Time-based resource regrowth
//!
//! Regrowth is computed from timestamps, not accumulated per tick, so a
//! world advanced in one large step regrows exactly as much as one advanced
//! in many small ones.

use crate::core::types::{secs_to_ms, Timestamp};
use crate::data::resources::ResourceSettings;
use crate::data::GameData;
use crate::entity::{Entity, Resource};
use crate::world::state::WorldState;

/// Apply whole regrowth cycles elapsed by `now`. Returns the number of
/// cycles consumed (quantity gained may be lower when capped).
pub fn regrow(resource: &mut Resource, settings: &ResourceSettings, now: Timestamp) -> u32 {
    let Some(interval_secs) = settings.regrowth_interval else {
        return 0;
    };
    let interval_ms = secs_to_ms(interval_secs);
    if interval_ms <= 0 {
        return 0;
    }

    let base = match (resource.last_harvested, resource.last_regrown) {
        (Some(h), Some(r)) => h.max(r),
        (Some(t), None) | (None, Some(t)) => t,
        (None, None) => return 0,
    };
    let elapsed = now - base;
    if elapsed < interval_ms {
        return 0;
    }

    let cycles = elapsed / interval_ms;
    let gained = u32::try_from(cycles).unwrap_or(u32::MAX);
    resource.quantity_remaining = resource
        .quantity_remaining
        .saturating_add(gained)
        .min(settings.initial_quantity);
    resource.last_regrown = Some(base + cycles * interval_ms);
    gained
}

/// Regrow every resource in the world
pub fn regrow_all(state: &mut WorldState, data: &GameData, now: Timestamp) {
    for resource in state.entities.iter_mut().filter_map(Entity::as_resource_mut) {
        if let Some(settings) = data.resource(resource.kind) {
            regrow(resource, settings, now);
        }
    }
}

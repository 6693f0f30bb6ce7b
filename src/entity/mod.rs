//! Placed world entities
//!
//! Every entity shares an id, a position, a size and an icon; the variant
//! carries everything else.

pub mod actor;
pub mod inventory;
pub mod vitals;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Timestamp, Vec2};
use crate::data::blueprints::{BlueprintKind, BlueprintSettings, CompletionRecipe};
use crate::data::items::{quantity_of, ItemKind, ItemStack};
use crate::data::resources::{ResourceKind, ResourceSettings};

pub use actor::Actor;
pub use inventory::Inventory;
pub use vitals::Vitals;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    pub size: f32,
    pub icon: String,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Actor(Actor),
    Resource(Resource),
    Structure(Structure),
    Blueprint(Blueprint),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub quantity_remaining: u32,
    /// Seconds of work per harvest
    pub harvest_time: f32,
    pub last_harvested: Option<Timestamp>,
    pub last_regrown: Option<Timestamp>,
}

/// A finished, inert building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: BlueprintKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub kind: BlueprintKind,
    pub required_items: Vec<ItemStack>,
    pub delivered_items: Vec<ItemStack>,
    /// Seconds between two deliveries
    pub build_time_per_item: f32,
    /// Seconds until the next delivery is accepted
    pub remaining_build_time: f32,
    pub completion: CompletionRecipe,
}

impl Entity {
    pub fn actor(id: EntityId, position: Vec2, config: &SimulationConfig) -> Self {
        Self {
            id,
            position,
            size: config.actor_size,
            icon: "🧍".into(),
            kind: EntityKind::Actor(Actor::new(config)),
        }
    }

    /// A fresh resource at full quantity
    pub fn resource(id: EntityId, position: Vec2, settings: &ResourceSettings) -> Self {
        Self {
            id,
            position,
            size: settings.size,
            icon: settings.icon.clone(),
            kind: EntityKind::Resource(Resource {
                kind: settings.kind,
                quantity_remaining: settings.initial_quantity,
                harvest_time: settings.harvest_time,
                last_harvested: None,
                last_regrown: None,
            }),
        }
    }

    /// An empty blueprint; the first delivery waits one full build interval
    pub fn blueprint(id: EntityId, position: Vec2, settings: &BlueprintSettings) -> Self {
        Self {
            id,
            position,
            size: settings.size,
            icon: settings.icon.clone(),
            kind: EntityKind::Blueprint(Blueprint {
                kind: settings.kind,
                required_items: settings.required_items.clone(),
                delivered_items: Vec::new(),
                build_time_per_item: settings.build_time_per_item,
                remaining_build_time: settings.build_time_per_item,
                completion: settings.completion,
            }),
        }
    }

    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor(_))
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match &self.kind {
            EntityKind::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn as_resource_mut(&mut self) -> Option<&mut Resource> {
        match &mut self.kind {
            EntityKind::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn as_blueprint(&self) -> Option<&Blueprint> {
        match &self.kind {
            EntityKind::Blueprint(blueprint) => Some(blueprint),
            _ => None,
        }
    }

    pub fn as_blueprint_mut(&mut self) -> Option<&mut Blueprint> {
        match &mut self.kind {
            EntityKind::Blueprint(blueprint) => Some(blueprint),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match &self.kind {
            EntityKind::Structure(structure) => Some(structure),
            _ => None,
        }
    }
}

impl Blueprint {
    /// Units of `item` still missing
    pub fn needed(&self, item: ItemKind) -> u32 {
        quantity_of(&self.required_items, item)
            .saturating_sub(quantity_of(&self.delivered_items, item))
    }

    /// Required stacks that are not yet fully delivered, with the missing amount
    pub fn remaining_required(&self) -> Vec<ItemStack> {
        self.required_items
            .iter()
            .filter_map(|req| {
                let missing = self.needed(req.item);
                (missing > 0).then(|| ItemStack::new(req.item, missing))
            })
            .collect()
    }

    /// Still-needed item kinds that `inventory` holds, in requirement order
    pub fn providable_items(&self, inventory: &Inventory) -> Vec<ItemKind> {
        self.required_items
            .iter()
            .map(|req| req.item)
            .filter(|&item| self.needed(item) > 0 && inventory.contains(item))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_required().is_empty()
    }

    pub fn record_delivery(&mut self, item: ItemKind) {
        match self.delivered_items.iter_mut().find(|s| s.item == item) {
            Some(stack) => stack.quantity += 1,
            None => self.delivered_items.push(ItemStack::new(item, 1)),
        }
    }

    /// Delivered fraction of all required units (1.0 when nothing is required)
    pub fn progress(&self) -> f32 {
        let required: u32 = self.required_items.iter().map(|s| s.quantity).sum();
        if required == 0 {
            return 1.0;
        }
        let delivered: u32 = self
            .required_items
            .iter()
            .map(|req| quantity_of(&self.delivered_items, req.item).min(req.quantity))
            .sum();
        delivered as f32 / required as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::blueprints::default_blueprints;

    fn stockpile() -> Blueprint {
        let settings = default_blueprints()
            .into_iter()
            .find(|b| b.kind == BlueprintKind::Stockpile)
            .unwrap();
        let entity = Entity::blueprint(EntityId::new(), Vec2::ZERO, &settings);
        entity.as_blueprint().unwrap().clone()
    }

    #[test]
    fn test_new_blueprint_waits_one_interval() {
        let bp = stockpile();
        assert_eq!(bp.remaining_build_time, bp.build_time_per_item);
        assert!(bp.delivered_items.is_empty());
        assert_eq!(bp.progress(), 0.0);
    }

    #[test]
    fn test_blueprint_needed_and_progress() {
        let mut bp = stockpile();
        for _ in 0..10 {
            bp.record_delivery(ItemKind::Stick);
        }
        assert_eq!(bp.needed(ItemKind::Stick), 0);
        assert_eq!(bp.needed(ItemKind::Stone), 10);
        assert_eq!(bp.remaining_required(), vec![ItemStack::new(ItemKind::Stone, 10)]);
        assert!((bp.progress() - 0.5).abs() < 1e-6);
        assert!(!bp.is_complete());
    }

    #[test]
    fn test_providable_items_skips_satisfied_kinds() {
        let mut bp = stockpile();
        for _ in 0..10 {
            bp.record_delivery(ItemKind::Stick);
        }
        let mut inv = Inventory::new(3);
        inv.add(ItemKind::Stick, 4);
        assert!(bp.providable_items(&inv).is_empty());

        inv.add(ItemKind::Stone, 1);
        assert_eq!(bp.providable_items(&inv), vec![ItemKind::Stone]);
    }

    #[test]
    fn test_progress_with_no_requirements() {
        let mut bp = stockpile();
        bp.required_items.clear();
        assert_eq!(bp.progress(), 1.0);
        assert!(bp.is_complete());
    }

    #[test]
    fn test_entity_round_trips_through_json() {
        let config = SimulationConfig::default();
        let entity = Entity::actor(EntityId::new(), Vec2::new(3.0, 4.0), &config);
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains(r#""type":"actor""#));
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
    }
}

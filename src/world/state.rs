//! The authoritative world snapshot

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Timestamp, Vec2};
use crate::entity::Entity;
use crate::world::terrain::TerrainGrid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Number of completed advances
    pub tick: Tick,
    /// Wall-clock ms the world was last reconciled to
    pub timestamp: Timestamp,
    pub terrain: TerrainGrid,
    /// All placed entities in insertion order
    pub entities: Vec<Entity>,
    pub is_game_over: bool,
}

impl WorldState {
    pub fn new(terrain: TerrainGrid, timestamp: Timestamp) -> Self {
        Self {
            tick: 0,
            timestamp,
            terrain,
            entities: Vec::new(),
            is_game_over: false,
        }
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.index_of(id)?;
        Some(self.entities.remove(idx))
    }

    pub fn actors(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_actor())
    }

    pub fn actor_ids(&self) -> Vec<EntityId> {
        self.actors().map(|e| e.id).collect()
    }

    pub fn actor_count(&self) -> usize {
        self.actors().count()
    }

    pub fn resources(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.as_resource().is_some())
    }

    pub fn blueprints(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.as_blueprint().is_some())
    }

    pub fn structures(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.as_structure().is_some())
    }

    /// Actor whose body covers `point` (distance strictly below its size)
    pub fn actor_at(&self, point: Vec2) -> Option<&Entity> {
        self.actors()
            .find(|e| e.position.distance(&point) < e.size)
    }
}

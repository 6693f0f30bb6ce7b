//! Autonomous actors

use serde::{Deserialize, Serialize};

use crate::behavior::graph::BehaviorGraph;
use crate::core::config::SimulationConfig;
use crate::entity::inventory::Inventory;
use crate::entity::vitals::Vitals;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// World units per second
    pub speed: f32,
    /// Harvest gauge in [0, 1]
    pub harvest_progress: f32,
    pub vitals: Vitals,
    pub inventory: Inventory,
    /// Decision graph; `None` leaves the actor idle
    #[serde(default)]
    pub behavior: Option<BehaviorGraph>,
}

impl Actor {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            speed: config.actor_speed,
            harvest_progress: 0.0,
            vitals: Vitals::new(config.actor_max_health),
            inventory: Inventory::new(config.inventory_slots),
            behavior: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }
}

//! Hunger, thirst and health
//!
//! Hunger and thirst run from 1.0 (satisfied) down to 0.0 (empty). Health
//! runs from `max_health` down to zero, where the actor dies.

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::entity::inventory::Inventory;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hunger: f32,
    pub thirst: f32,
    pub health: f32,
    pub max_health: f32,
}

/// What happened during one vitals update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VitalsUpdate {
    pub ate: bool,
    pub drank: bool,
    pub starving: bool,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            hunger: 1.0,
            thirst: 1.0,
            health: max_health,
            max_health,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Health as a fraction of max health (0 when max health is zero)
    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    /// Advance vitals by `dt` seconds, eating or drinking from `inventory`
    /// when a gauge runs empty
    pub fn update(
        &mut self,
        dt: f32,
        inventory: &mut Inventory,
        config: &SimulationConfig,
    ) -> VitalsUpdate {
        let mut report = VitalsUpdate::default();

        self.hunger = (self.hunger - config.hunger_decay_per_sec * dt).max(0.0);
        self.thirst = (self.thirst - config.thirst_decay_per_sec * dt).max(0.0);

        if self.hunger <= 0.0 && inventory.remove(config.food_item, 1) == 1 {
            self.hunger = (self.hunger + config.food_restore).min(1.0);
            report.ate = true;
        }
        if self.thirst <= 0.0 && inventory.remove(config.drink_item, 1) == 1 {
            self.thirst = (self.thirst + config.drink_restore).min(1.0);
            report.drank = true;
        }

        if self.hunger <= 0.0 || self.thirst <= 0.0 {
            self.health = (self.health - config.starvation_damage_per_sec * dt).max(0.0);
            report.starving = true;
        } else {
            self.health = (self.health + config.health_regen_per_sec * dt).min(self.max_health);
        }

        report
    }
}

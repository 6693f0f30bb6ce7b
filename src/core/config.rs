//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every field has a default, so a
//! TOML file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::data::items::ItemKind;
use crate::data::resources::ResourceKind;

/// Configuration for the simulation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === VITALS ===
    /// Hunger lost per simulated second (hunger is 1.0 when fed, 0.0 when starving)
    ///
    /// At the default 0.002 a fed actor reaches zero after roughly 8 minutes.
    pub hunger_decay_per_sec: f32,

    /// Thirst lost per simulated second
    ///
    /// Faster than hunger so that drinking is the more frequent errand.
    pub thirst_decay_per_sec: f32,

    /// Health lost per second while hunger or thirst is empty and nothing
    /// in the inventory can restore it
    pub starvation_damage_per_sec: f32,

    /// Health regained per second while both hunger and thirst are above zero
    pub health_regen_per_sec: f32,

    /// Item auto-consumed when hunger reaches zero
    pub food_item: ItemKind,

    /// Hunger restored by one unit of `food_item`
    pub food_restore: f32,

    /// Item auto-consumed when thirst reaches zero
    pub drink_item: ItemKind,

    /// Thirst restored by one unit of `drink_item`
    pub drink_restore: f32,

    // === WORLD ===
    /// World extent in world units
    pub world_width: f32,
    pub world_height: f32,

    /// Edge length of one terrain tile in world units
    pub tile_size: f32,

    /// Noise stretch factor in tiles; larger gives broader biomes
    pub terrain_zoom: f64,

    /// Seed for the terrain noise
    pub terrain_seed: u32,

    /// Fixed number of inventory slots per actor
    pub inventory_slots: usize,

    /// Movement speed of new actors in world units per second
    pub actor_speed: f32,

    /// Visual and selection radius of new actors
    pub actor_size: f32,

    pub actor_max_health: f32,

    // === SPAWNING ===
    /// Chance per tick that one base resource spawns somewhere in the world
    pub spawn_chance_per_tick: f64,

    /// Resource kind spawned by the per-tick roll
    pub spawn_resource_kind: ResourceKind,

    /// Rejection-sampling attempts per placed resource during generation
    pub placement_attempts: u32,

    // === TIME ===
    /// Scheduling pulse interval while running normally
    pub tick_interval_ms: u64,

    /// A gap larger than this between wall clock and world time pauses the
    /// simulation and asks whether to fast-forward
    pub fast_forward_threshold_ms: i64,

    /// Largest slice of simulated time a single advance may consume
    ///
    /// Also caps normal ticks, so a stalled pulse never produces a
    /// larger step than fast-forward would.
    pub catch_up_increment_ms: i64,

    /// Random seed. `None` draws from OS entropy; `Some` makes drops,
    /// spawns and placement reproducible.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Vitals (thirst > hunger)
            hunger_decay_per_sec: 0.002,
            thirst_decay_per_sec: 0.003,
            starvation_damage_per_sec: 1.0,
            health_regen_per_sec: 0.5,
            food_item: ItemKind::Berry,
            food_restore: 0.5,
            drink_item: ItemKind::Water,
            drink_restore: 0.5,

            // World (1000 x 1000 units, 50 x 50 tiles)
            world_width: 1000.0,
            world_height: 1000.0,
            tile_size: 20.0,
            terrain_zoom: 10.0,
            terrain_seed: 0,
            inventory_slots: 10,
            actor_speed: 50.0,
            actor_size: 20.0,
            actor_max_health: 100.0,

            // Spawning
            spawn_chance_per_tick: 0.01,
            spawn_resource_kind: ResourceKind::Stick,
            placement_attempts: 100,

            // Time
            tick_interval_ms: 100,
            fast_forward_threshold_ms: 5_000,
            catch_up_increment_ms: 5_000,

            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed random seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(SimError::ConfigError)?;
        Ok(config)
    }

    /// Terrain grid dimensions in tiles
    pub fn grid_dimensions(&self) -> (usize, usize) {
        let w = (self.world_width / self.tile_size).ceil().max(1.0) as usize;
        let h = (self.world_height / self.tile_size).ceil().max(1.0) as usize;
        (w, h)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.catch_up_increment_ms <= 0 {
            return Err(format!(
                "catch_up_increment_ms ({}) must be positive",
                self.catch_up_increment_ms
            ));
        }

        if self.fast_forward_threshold_ms < 0 {
            return Err(format!(
                "fast_forward_threshold_ms ({}) must not be negative",
                self.fast_forward_threshold_ms
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".into());
        }

        if self.world_width <= 0.0 || self.world_height <= 0.0 || self.tile_size <= 0.0 {
            return Err("World and tile dimensions must be positive".into());
        }

        if self.inventory_slots == 0 {
            return Err("Actors need at least one inventory slot".into());
        }

        if self.actor_max_health <= 0.0 {
            return Err(format!(
                "actor_max_health ({}) must be positive",
                self.actor_max_health
            ));
        }

        if !(0.0..=1.0).contains(&self.spawn_chance_per_tick) {
            return Err(format!(
                "spawn_chance_per_tick ({}) must be within [0, 1]",
                self.spawn_chance_per_tick
            ));
        }

        if self.hunger_decay_per_sec < 0.0 || self.thirst_decay_per_sec < 0.0 {
            return Err("Decay rates must not be negative".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert_eq!(SimulationConfig::default().grid_dimensions(), (50, 50));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::parse_toml(
            r#"
            catch_up_increment_ms = 2000
            seed = 42
            food_item = "berry"
            "#,
        )
        .unwrap();
        assert_eq!(config.catch_up_increment_ms, 2000);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.spawn_resource_kind, ResourceKind::Stick);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = SimulationConfig::parse_toml(include_str!("../../data/simulation.toml")).unwrap();
        assert_eq!(shipped, SimulationConfig::default());
    }

    #[test]
    fn test_invalid_increment_rejected() {
        let err = SimulationConfig::parse_toml("catch_up_increment_ms = 0").unwrap_err();
        assert!(matches!(err, SimError::ConfigError(_)));
    }

    #[test]
    fn test_spawn_chance_bounds() {
        let config = SimulationConfig {
            spawn_chance_per_tick: 1.5,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

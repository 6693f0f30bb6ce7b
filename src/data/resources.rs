//! Resource kinds and their static settings
//!
//! A resource kind carries data only: harvest time, drop table, regrowth
//! interval, terrain affinity, and which interaction strategy runs when an
//! actor interacts with it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::items::ItemKind;
use crate::world::terrain::TerrainType;

/// Kinds of harvestable resources placed in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Stick,
    Stone,
    Tree,
    Grass,
    FallenTree,
    BerryBush,
    Pond,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Stick,
        ResourceKind::Stone,
        ResourceKind::Tree,
        ResourceKind::Grass,
        ResourceKind::FallenTree,
        ResourceKind::BerryBush,
        ResourceKind::Pond,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name.to_lowercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Stick => "stick",
            ResourceKind::Stone => "stone",
            ResourceKind::Tree => "tree",
            ResourceKind::Grass => "grass",
            ResourceKind::FallenTree => "fallen_tree",
            ResourceKind::BerryBush => "berry_bush",
            ResourceKind::Pond => "pond",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ways an actor can interact with a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Harvest,
}

/// Finite set of interaction behaviors a resource kind can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStrategy {
    /// Roll each drop independently, take one unit of quantity
    RollDrops,
}

/// One entry of a drop table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceDrop {
    pub item: ItemKind,
    /// Probability in [0, 1] that this entry drops on a completed harvest
    pub chance: f32,
    pub amount: u32,
}

impl ResourceDrop {
    pub fn new(item: ItemKind, chance: f32, amount: u32) -> Self {
        Self { item, chance, amount }
    }
}

/// Static settings for one resource kind
#[derive(Debug, Clone)]
pub struct ResourceSettings {
    pub kind: ResourceKind,
    pub icon: String,
    pub size: f32,
    /// Quantity at spawn; also the regrowth ceiling
    pub initial_quantity: u32,
    /// Seconds of work per harvest
    pub harvest_time: f32,
    pub drops: Vec<ResourceDrop>,
    /// Inclusive instance-count range for initial world generation
    pub initial_generation: Option<(u32, u32)>,
    /// Seconds per regrown unit of quantity
    pub regrowth_interval: Option<f32>,
    pub destroy_on_depleted: bool,
    /// Terrain types this kind may be placed on (empty = anywhere)
    pub terrain_affinity: Vec<TerrainType>,
    pub interactions: AHashMap<InteractionType, InteractionStrategy>,
}

impl ResourceSettings {
    /// Settings with the default harvest interaction and no generation/regrowth
    pub fn new(kind: ResourceKind, initial_quantity: u32, harvest_time: f32, size: f32) -> Self {
        let mut interactions = AHashMap::new();
        interactions.insert(InteractionType::Harvest, InteractionStrategy::RollDrops);
        Self {
            kind,
            icon: String::new(),
            size,
            initial_quantity,
            harvest_time,
            drops: Vec::new(),
            initial_generation: None,
            regrowth_interval: None,
            destroy_on_depleted: true,
            terrain_affinity: Vec::new(),
            interactions,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn with_drop(mut self, item: ItemKind, chance: f32, amount: u32) -> Self {
        self.drops.push(ResourceDrop::new(item, chance, amount));
        self
    }

    pub fn with_generation(mut self, min: u32, max: u32) -> Self {
        self.initial_generation = Some((min, max));
        self
    }

    /// Regrows one unit every `interval` seconds and is kept when depleted
    pub fn with_regrowth(mut self, interval: f32) -> Self {
        self.regrowth_interval = Some(interval);
        self.destroy_on_depleted = false;
        self
    }

    pub fn with_affinity(mut self, terrain: &[TerrainType]) -> Self {
        self.terrain_affinity = terrain.to_vec();
        self
    }

    pub fn accepts_terrain(&self, terrain: TerrainType) -> bool {
        self.terrain_affinity.is_empty() || self.terrain_affinity.contains(&terrain)
    }

    pub fn strategy_for(&self, interaction: InteractionType) -> Option<InteractionStrategy> {
        self.interactions.get(&interaction).copied()
    }
}

/// The default resource table
pub fn default_resources() -> Vec<ResourceSettings> {
    use TerrainType::*;

    vec![
        ResourceSettings::new(ResourceKind::Stick, 5, 5.0, 20.0)
            .with_icon("🪵")
            .with_drop(ItemKind::Stick, 1.0, 1)
            .with_affinity(&[Soil, Sand]),
        ResourceSettings::new(ResourceKind::Stone, 50, 10.0, 20.0)
            .with_icon("🪨")
            .with_drop(ItemKind::Stone, 1.0, 1)
            .with_generation(10, 20)
            .with_affinity(&[Rock, Sand]),
        ResourceSettings::new(ResourceKind::Tree, 5, 30.0, 40.0)
            .with_icon("🌲")
            .with_drop(ItemKind::Stick, 1.0, 1)
            .with_drop(ItemKind::Stick, 0.5, 1)
            .with_drop(ItemKind::Stick, 0.25, 1)
            .with_drop(ItemKind::Leaf, 1.0, 3)
            .with_drop(ItemKind::TreeSeed, 1.0, 1)
            .with_drop(ItemKind::TreeSeed, 0.5, 1)
            .with_generation(3, 8)
            .with_regrowth(60.0)
            .with_affinity(&[Soil]),
        ResourceSettings::new(ResourceKind::Grass, 10, 1.0, 20.0)
            .with_icon("🌿")
            .with_drop(ItemKind::GrassSeed, 1.0, 1)
            .with_drop(ItemKind::GrassSeed, 0.5, 1)
            .with_drop(ItemKind::FreshGrass, 1.0, 1)
            .with_generation(10, 20)
            .with_regrowth(10.0)
            .with_affinity(&[Soil]),
        ResourceSettings::new(ResourceKind::FallenTree, 1, 20.0, 40.0)
            .with_icon("🪵")
            .with_drop(ItemKind::Log, 1.0, 3)
            .with_drop(ItemKind::Log, 0.5, 2)
            .with_drop(ItemKind::Log, 0.5, 1)
            .with_generation(1, 3)
            .with_affinity(&[Soil]),
        ResourceSettings::new(ResourceKind::BerryBush, 5, 3.0, 25.0)
            .with_icon("🫐")
            .with_drop(ItemKind::Berry, 1.0, 1)
            .with_drop(ItemKind::Berry, 0.5, 1)
            .with_generation(4, 8)
            .with_regrowth(30.0)
            .with_affinity(&[Soil]),
        ResourceSettings::new(ResourceKind::Pond, 20, 2.0, 30.0)
            .with_icon("💧")
            .with_drop(ItemKind::Water, 1.0, 1)
            .with_generation(3, 6)
            .with_regrowth(5.0)
            .with_affinity(&[Sand]),
    ]
}

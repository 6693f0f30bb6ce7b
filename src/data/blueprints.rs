//! Buildable blueprint kinds
//!
//! What a blueprint turns into is data (`CompletionRecipe`), resolved by the
//! construction pipeline against `GameData` when the last item is delivered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::items::{ItemKind, ItemStack};
use crate::data::resources::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlueprintKind {
    Stockpile,
    TreeSeed,
    GrassSeed,
}

impl BlueprintKind {
    pub const ALL: [BlueprintKind; 3] = [
        BlueprintKind::Stockpile,
        BlueprintKind::TreeSeed,
        BlueprintKind::GrassSeed,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name.to_lowercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlueprintKind::Stockpile => "stockpile",
            BlueprintKind::TreeSeed => "tree_seed",
            BlueprintKind::GrassSeed => "grass_seed",
        }
    }
}

impl fmt::Display for BlueprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The entity a completed blueprint becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum CompletionRecipe {
    /// An inert structure with the blueprint's position, size and icon
    Structure,
    /// A fresh resource of the given kind at the blueprint's position
    Resource(ResourceKind),
}

#[derive(Debug, Clone)]
pub struct BlueprintSettings {
    pub kind: BlueprintKind,
    pub icon: String,
    pub size: f32,
    pub required_items: Vec<ItemStack>,
    /// Seconds that must pass between two item deliveries
    pub build_time_per_item: f32,
    pub completion: CompletionRecipe,
}

pub fn default_blueprints() -> Vec<BlueprintSettings> {
    vec![
        BlueprintSettings {
            kind: BlueprintKind::Stockpile,
            icon: "🏠".into(),
            size: 50.0,
            required_items: vec![
                ItemStack::new(ItemKind::Stick, 10),
                ItemStack::new(ItemKind::Stone, 10),
            ],
            build_time_per_item: 20.0,
            completion: CompletionRecipe::Structure,
        },
        BlueprintSettings {
            kind: BlueprintKind::TreeSeed,
            icon: "🌱".into(),
            size: 30.0,
            required_items: vec![ItemStack::new(ItemKind::TreeSeed, 1)],
            build_time_per_item: 10.0,
            completion: CompletionRecipe::Resource(ResourceKind::Tree),
        },
        BlueprintSettings {
            kind: BlueprintKind::GrassSeed,
            icon: "🌱".into(),
            size: 30.0,
            required_items: vec![ItemStack::new(ItemKind::GrassSeed, 1)],
            build_time_per_item: 10.0,
            completion: CompletionRecipe::Resource(ResourceKind::Grass),
        },
    ]
}

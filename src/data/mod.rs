//! Static reference data supplied alongside the world state to every
//! simulation call: resource kinds, blueprint kinds and crafting recipes.

pub mod blueprints;
pub mod items;
pub mod loader;
pub mod recipes;
pub mod resources;

use ahash::AHashMap;
use std::path::Path;

use crate::core::error::Result;

pub use blueprints::{BlueprintKind, BlueprintSettings, CompletionRecipe};
pub use items::{ItemKind, ItemStack};
pub use recipes::{CraftingRecipe, RecipeCatalog};
pub use resources::{
    InteractionStrategy, InteractionType, ResourceDrop, ResourceKind, ResourceSettings,
};

/// Read-only game configuration data
#[derive(Debug, Clone, Default)]
pub struct GameData {
    resources: AHashMap<ResourceKind, ResourceSettings>,
    blueprints: AHashMap<BlueprintKind, BlueprintSettings>,
    pub recipes: RecipeCatalog,
}

impl GameData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in data set
    pub fn with_defaults() -> Self {
        let mut data = Self::new();
        for settings in resources::default_resources() {
            data.add_resource(settings);
        }
        for settings in blueprints::default_blueprints() {
            data.add_blueprint(settings);
        }
        data.recipes = RecipeCatalog::with_defaults();
        data
    }

    /// Load game data from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse game data from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        loader::parse_game_data(content)
    }

    pub fn add_resource(&mut self, settings: ResourceSettings) {
        self.resources.insert(settings.kind, settings);
    }

    pub fn add_blueprint(&mut self, settings: BlueprintSettings) {
        self.blueprints.insert(settings.kind, settings);
    }

    pub fn resource(&self, kind: ResourceKind) -> Option<&ResourceSettings> {
        self.resources.get(&kind)
    }

    pub fn blueprint(&self, kind: BlueprintKind) -> Option<&BlueprintSettings> {
        self.blueprints.get(&kind)
    }

    pub fn recipe(&self, id: &str) -> Option<&CraftingRecipe> {
        self.recipes.get(id)
    }

    /// All resource settings in a stable (declaration) order
    pub fn resources(&self) -> impl Iterator<Item = &ResourceSettings> {
        ResourceKind::ALL
            .into_iter()
            .filter_map(move |kind| self.resources.get(&kind))
    }

    pub fn blueprints(&self) -> impl Iterator<Item = &BlueprintSettings> {
        BlueprintKind::ALL
            .into_iter()
            .filter_map(move |kind| self.blueprints.get(&kind))
    }
}

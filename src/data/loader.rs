//! Load game data from TOML
//!
//! Kind names are snake_case strings in the file and are mapped onto the
//! crate's enums here, so a typo is reported with the offending name.

use serde::Deserialize;

use crate::core::error::{Result, SimError};
use crate::data::blueprints::{BlueprintKind, BlueprintSettings, CompletionRecipe};
use crate::data::items::{ItemKind, ItemStack};
use crate::data::recipes::CraftingRecipe;
use crate::data::resources::{
    InteractionStrategy, InteractionType, ResourceDrop, ResourceKind, ResourceSettings,
};
use crate::data::GameData;
use crate::world::terrain::TerrainType;

#[derive(Debug, Deserialize)]
struct TomlGameData {
    #[serde(default)]
    resources: Vec<TomlResource>,
    #[serde(default)]
    blueprints: Vec<TomlBlueprint>,
    #[serde(default)]
    recipes: Vec<TomlRecipe>,
}

#[derive(Debug, Deserialize)]
struct TomlResource {
    kind: String,
    #[serde(default)]
    icon: String,
    size: f32,
    initial_quantity: u32,
    harvest_time: f32,
    #[serde(default)]
    drops: Vec<TomlDrop>,
    #[serde(default)]
    generation: Option<[u32; 2]>,
    #[serde(default)]
    regrowth_interval: Option<f32>,
    #[serde(default)]
    destroy_on_depleted: Option<bool>,
    #[serde(default)]
    terrain: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlDrop {
    item: String,
    chance: f32,
    #[serde(default = "default_amount")]
    amount: u32,
}

#[derive(Debug, Deserialize)]
struct TomlBlueprint {
    kind: String,
    #[serde(default)]
    icon: String,
    size: f32,
    build_time_per_item: f32,
    required: Vec<TomlItemAmount>,
    /// "structure" or "resource"
    completion: String,
    /// Target resource kind when `completion = "resource"`
    #[serde(default)]
    becomes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlRecipe {
    id: String,
    name: String,
    required: Vec<TomlItemAmount>,
    output: TomlItemAmount,
}

#[derive(Debug, Deserialize)]
struct TomlItemAmount {
    item: String,
    #[serde(default = "default_amount")]
    quantity: u32,
}

fn default_amount() -> u32 {
    1
}

pub fn parse_game_data(content: &str) -> Result<GameData> {
    let raw: TomlGameData = toml::from_str(content)?;

    let mut data = GameData::new();
    for resource in raw.resources {
        data.add_resource(resource.into_settings()?);
    }
    for blueprint in raw.blueprints {
        data.add_blueprint(blueprint.into_settings()?);
    }
    for recipe in raw.recipes {
        data.recipes.add(recipe.into_recipe()?);
    }
    Ok(data)
}

fn item(name: &str) -> Result<ItemKind> {
    ItemKind::parse(name).ok_or_else(|| SimError::ConfigError(format!("Unknown item '{}'", name)))
}

fn resource_kind(name: &str) -> Result<ResourceKind> {
    ResourceKind::parse(name)
        .ok_or_else(|| SimError::ConfigError(format!("Unknown resource kind '{}'", name)))
}

fn terrain(name: &str) -> Result<TerrainType> {
    TerrainType::parse(name)
        .ok_or_else(|| SimError::ConfigError(format!("Unknown terrain '{}'", name)))
}

impl TomlItemAmount {
    fn into_stack(self) -> Result<ItemStack> {
        Ok(ItemStack::new(item(&self.item)?, self.quantity))
    }
}

impl TomlResource {
    fn into_settings(self) -> Result<ResourceSettings> {
        let kind = resource_kind(&self.kind)?;
        if self.harvest_time <= 0.0 {
            return Err(SimError::ConfigError(format!(
                "{}: harvest_time must be positive",
                self.kind
            )));
        }

        let drops = self
            .drops
            .into_iter()
            .map(|d| Ok(ResourceDrop::new(item(&d.item)?, d.chance.clamp(0.0, 1.0), d.amount)))
            .collect::<Result<Vec<_>>>()?;

        let terrain_affinity = self
            .terrain
            .iter()
            .map(|t| terrain(t))
            .collect::<Result<Vec<_>>>()?;

        let initial_generation = match self.generation {
            Some([min, max]) if min > max => {
                return Err(SimError::ConfigError(format!(
                    "{}: generation range [{}, {}] is inverted",
                    self.kind, min, max
                )))
            }
            Some([min, max]) => Some((min, max)),
            None => None,
        };

        let regrowth_interval = match self.regrowth_interval {
            Some(interval) if interval <= 0.0 => {
                return Err(SimError::ConfigError(format!(
                    "{}: regrowth_interval must be positive",
                    self.kind
                )))
            }
            other => other,
        };

        let mut settings =
            ResourceSettings::new(kind, self.initial_quantity, self.harvest_time, self.size);
        settings.icon = self.icon;
        settings.drops = drops;
        settings.initial_generation = initial_generation;
        settings.regrowth_interval = regrowth_interval;
        settings.destroy_on_depleted = self
            .destroy_on_depleted
            .unwrap_or(regrowth_interval.is_none());
        settings.terrain_affinity = terrain_affinity;
        settings
            .interactions
            .insert(InteractionType::Harvest, InteractionStrategy::RollDrops);
        Ok(settings)
    }
}

impl TomlBlueprint {
    fn into_settings(self) -> Result<BlueprintSettings> {
        let kind = BlueprintKind::parse(&self.kind)
            .ok_or_else(|| SimError::ConfigError(format!("Unknown blueprint kind '{}'", self.kind)))?;

        let completion = match self.completion.to_lowercase().as_str() {
            "structure" => CompletionRecipe::Structure,
            "resource" => {
                let target = self.becomes.as_deref().ok_or_else(|| {
                    SimError::ConfigError(format!(
                        "{}: resource completion needs 'becomes'",
                        self.kind
                    ))
                })?;
                CompletionRecipe::Resource(resource_kind(target)?)
            }
            other => {
                return Err(SimError::ConfigError(format!(
                    "{}: unknown completion '{}'",
                    self.kind, other
                )))
            }
        };

        if self.required.is_empty() {
            return Err(SimError::ConfigError(format!(
                "{}: blueprint requires no items",
                self.kind
            )));
        }
        if let Some(empty) = self.required.iter().find(|r| r.quantity == 0) {
            return Err(SimError::ConfigError(format!(
                "{}: required quantity of '{}' is zero",
                self.kind, empty.item
            )));
        }

        let required_items = self
            .required
            .into_iter()
            .map(TomlItemAmount::into_stack)
            .collect::<Result<Vec<_>>>()?;

        Ok(BlueprintSettings {
            kind,
            icon: self.icon,
            size: self.size,
            required_items,
            build_time_per_item: self.build_time_per_item.max(0.0),
            completion,
        })
    }
}

impl TomlRecipe {
    fn into_recipe(self) -> Result<CraftingRecipe> {
        let required_items = self
            .required
            .into_iter()
            .map(TomlItemAmount::into_stack)
            .collect::<Result<Vec<_>>>()?;
        Ok(CraftingRecipe {
            id: self.id,
            name: self.name,
            required_items,
            output: self.output.into_stack()?,
        })
    }
}

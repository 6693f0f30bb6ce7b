//! Crafting recipes - turn inventory items into other items
//!
//! Recipes specify consumed items and the produced item. Crafting is
//! instant and all-or-nothing.

use serde::{Deserialize, Serialize};

use crate::data::items::{ItemKind, ItemStack};

/// A crafting recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftingRecipe {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Items consumed
    pub required_items: Vec<ItemStack>,
    /// Item produced
    pub output: ItemStack,
}

/// Catalog of all available recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<CraftingRecipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(CraftingRecipe {
            id: "rope".into(),
            name: "Twist Rope".into(),
            required_items: vec![ItemStack::new(ItemKind::FreshGrass, 3)],
            output: ItemStack::new(ItemKind::Rope, 1),
        });

        catalog.add(CraftingRecipe {
            id: "stone_axe".into(),
            name: "Stone Axe".into(),
            required_items: vec![
                ItemStack::new(ItemKind::Stick, 1),
                ItemStack::new(ItemKind::Stone, 1),
                ItemStack::new(ItemKind::Rope, 1),
            ],
            output: ItemStack::new(ItemKind::StoneAxe, 1),
        });

        catalog
    }

    /// Add a recipe, replacing any recipe with the same id
    pub fn add(&mut self, recipe: CraftingRecipe) {
        self.recipes.retain(|r| r.id != recipe.id);
        self.recipes.push(recipe);
    }

    pub fn get(&self, id: &str) -> Option<&CraftingRecipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[CraftingRecipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

//! Item kinds carried in inventories and delivered to blueprints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of item an actor can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Stick,
    Stone,
    Leaf,
    TreeSeed,
    GrassSeed,
    FreshGrass,
    Log,
    Berry,
    Water,
    Rope,
    StoneAxe,
}

impl ItemKind {
    pub const ALL: [ItemKind; 11] = [
        ItemKind::Stick,
        ItemKind::Stone,
        ItemKind::Leaf,
        ItemKind::TreeSeed,
        ItemKind::GrassSeed,
        ItemKind::FreshGrass,
        ItemKind::Log,
        ItemKind::Berry,
        ItemKind::Water,
        ItemKind::Rope,
        ItemKind::StoneAxe,
    ];

    /// Parse a snake_case item name (as used in data files and the console)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name.to_lowercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Stick => "stick",
            ItemKind::Stone => "stone",
            ItemKind::Leaf => "leaf",
            ItemKind::TreeSeed => "tree_seed",
            ItemKind::GrassSeed => "grass_seed",
            ItemKind::FreshGrass => "fresh_grass",
            ItemKind::Log => "log",
            ItemKind::Berry => "berry",
            ItemKind::Water => "water",
            ItemKind::Rope => "rope",
            ItemKind::StoneAxe => "stone_axe",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A quantity of one item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemKind,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item: ItemKind, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// Quantity of `item` inside a list of stacks (0 when absent)
pub fn quantity_of(stacks: &[ItemStack], item: ItemKind) -> u32 {
    stacks
        .iter()
        .filter(|s| s.item == item)
        .map(|s| s.quantity)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::parse(kind.name()), Some(kind));
        }
        assert_eq!(ItemKind::parse("Tree_Seed"), Some(ItemKind::TreeSeed));
        assert_eq!(ItemKind::parse("diamond"), None);
    }

    #[test]
    fn test_quantity_of_sums_matching_stacks() {
        let stacks = vec![
            ItemStack::new(ItemKind::Stick, 3),
            ItemStack::new(ItemKind::Stone, 2),
            ItemStack::new(ItemKind::Stick, 1),
        ];
        assert_eq!(quantity_of(&stacks, ItemKind::Stick), 4);
        assert_eq!(quantity_of(&stacks, ItemKind::Log), 0);
    }
}

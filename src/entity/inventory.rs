//! Actor inventory - a fixed number of slots, each empty or holding one stack

use serde::{Deserialize, Serialize};

use crate::data::items::{ItemKind, ItemStack};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Total quantity of an item across all slots
    pub fn quantity(&self, item: ItemKind) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item == item)
            .map(|stack| stack.quantity)
            .sum()
    }

    pub fn contains(&self, item: ItemKind) -> bool {
        self.quantity(item) > 0
    }

    /// Add items, stacking onto an existing slot of the same item first and
    /// falling back to the first empty slot. Returns the amount actually
    /// added (0 when the item has no stack and every slot is taken).
    pub fn add(&mut self, item: ItemKind, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }

        if let Some(stack) = self.slots.iter_mut().flatten().find(|s| s.item == item) {
            stack.quantity += amount;
            return amount;
        }

        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(ItemStack::new(item, amount));
                amount
            }
            None => 0,
        }
    }

    /// Remove up to `amount` of an item, emptying slots that reach zero.
    /// Returns the amount actually removed.
    pub fn remove(&mut self, item: ItemKind, amount: u32) -> u32 {
        let mut left = amount;
        for slot in self.slots.iter_mut() {
            if left == 0 {
                break;
            }
            if let Some(stack) = slot {
                if stack.item != item {
                    continue;
                }
                let taken = left.min(stack.quantity);
                stack.quantity -= taken;
                left -= taken;
                if stack.quantity == 0 {
                    *slot = None;
                }
            }
        }
        amount - left
    }

    /// Check if every stack in `requirements` is held
    pub fn has_items(&self, requirements: &[ItemStack]) -> bool {
        requirements
            .iter()
            .all(|req| self.quantity(req.item) >= req.quantity)
    }

    /// Consume all of `requirements` or nothing. Returns true on success.
    pub fn consume_items(&mut self, requirements: &[ItemStack]) -> bool {
        if !self.has_items(requirements) {
            return false;
        }
        for req in requirements {
            self.remove(req.item, req.quantity);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_stacks_same_item() {
        let mut inv = Inventory::new(3);
        assert_eq!(inv.add(ItemKind::Stick, 2), 2);
        assert_eq!(inv.add(ItemKind::Stick, 3), 3);
        assert_eq!(inv.quantity(ItemKind::Stick), 5);
        assert_eq!(inv.slots().iter().flatten().count(), 1);
    }

    #[test]
    fn test_add_to_full_inventory_is_dropped() {
        let mut inv = Inventory::new(1);
        inv.add(ItemKind::Stone, 1);
        assert_eq!(inv.add(ItemKind::Berry, 1), 0);
        assert!(!inv.contains(ItemKind::Berry));
        // Existing stacks still grow when full
        assert_eq!(inv.add(ItemKind::Stone, 4), 4);
    }

    #[test]
    fn test_remove_frees_slot() {
        let mut inv = Inventory::new(2);
        inv.add(ItemKind::Leaf, 2);
        assert_eq!(inv.remove(ItemKind::Leaf, 5), 2);
        assert!(inv.slots().iter().all(|s| s.is_none()));
        assert_eq!(inv.remove(ItemKind::Leaf, 1), 0);
    }

    #[test]
    fn test_consume_is_all_or_nothing() {
        let mut inv = Inventory::new(4);
        inv.add(ItemKind::Stick, 1);
        inv.add(ItemKind::Stone, 1);

        let axe = [
            ItemStack::new(ItemKind::Stick, 1),
            ItemStack::new(ItemKind::Stone, 1),
            ItemStack::new(ItemKind::Rope, 1),
        ];
        assert!(!inv.consume_items(&axe));
        assert_eq!(inv.quantity(ItemKind::Stick), 1);
        assert_eq!(inv.quantity(ItemKind::Stone), 1);

        inv.add(ItemKind::Rope, 1);
        assert!(inv.consume_items(&axe));
        assert!(inv.slots().iter().all(|s| s.is_none()));
    }
}

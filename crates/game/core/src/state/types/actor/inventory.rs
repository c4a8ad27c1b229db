//! Inventory storage for entities.
//!
//! Mutation goes through the pure functions in [`crate::items`]; this module only
//! defines the value types and read accessors.

use crate::env::ItemId;

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// Ordered item slots bounded by `capacity`.
///
/// Invariant: `slots.len() <= capacity` and every slot has `quantity >= 1`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub capacity: usize,
    pub slots: Vec<ItemStack>,
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.slots.len())
    }

    /// Total quantity of `item_id` across all slots.
    pub fn count(&self, item_id: &ItemId) -> u32 {
        self.slots
            .iter()
            .filter(|slot| &slot.item_id == item_id)
            .map(|slot| slot.quantity)
            .sum()
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.slots.iter().any(|slot| &slot.item_id == item_id)
    }
}

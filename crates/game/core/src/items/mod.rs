//! Inventory and equipment transformations.
//!
//! Every operation takes its input by reference and returns a new value, so a
//! failed request leaves the caller's inventory or equipment untouched.
use crate::env::{ItemDefinition, ItemId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquipSlot, Equipment, Inventory, ItemStack};

/// Inventory mutation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("no room for {quantity} x {item_id}: {free} free slot(s)")]
    NoRoom {
        item_id: ItemId,
        quantity: u32,
        free: usize,
    },

    #[error("cannot remove {requested} x {item_id}: only {available} present")]
    InsufficientQuantity {
        item_id: ItemId,
        requested: u32,
        available: u32,
    },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidQuantity => ErrorSeverity::Validation,
            Self::NoRoom { .. } | Self::InsufficientQuantity { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity => "INVENTORY_INVALID_QUANTITY",
            Self::NoRoom { .. } => "INVENTORY_NO_ROOM",
            Self::InsufficientQuantity { .. } => "INVENTORY_INSUFFICIENT_QUANTITY",
        }
    }
}

/// Equipment mutation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{item_id} cannot be equipped in the {slot} slot")]
    IncompatibleSlot { item_id: ItemId, slot: EquipSlot },
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IncompatibleSlot { .. } => "EQUIP_INCOMPATIBLE_SLOT",
        }
    }
}

/// Adds `quantity` units of `item`.
///
/// Stackable items merge into the first slot already holding them, or take one
/// new slot. Non-stackable items take one slot per unit. Either the whole
/// quantity fits or nothing changes.
pub fn add_item(
    inventory: &Inventory,
    item: &ItemDefinition,
    quantity: u32,
) -> Result<Inventory, InventoryError> {
    if quantity == 0 {
        return Err(InventoryError::InvalidQuantity);
    }

    let mut next = inventory.clone();
    if item.stackable {
        if let Some(slot) = next.slots.iter_mut().find(|slot| slot.item_id == item.id) {
            slot.quantity = slot.quantity.saturating_add(quantity);
            return Ok(next);
        }
        if next.is_full() {
            return Err(no_room(inventory, item, quantity));
        }
        next.slots.push(ItemStack::new(item.id.clone(), quantity));
        return Ok(next);
    }

    if (quantity as usize) > next.free_slots() {
        return Err(no_room(inventory, item, quantity));
    }
    next.slots
        .extend((0..quantity).map(|_| ItemStack::new(item.id.clone(), 1)));
    Ok(next)
}

fn no_room(inventory: &Inventory, item: &ItemDefinition, quantity: u32) -> InventoryError {
    InventoryError::NoRoom {
        item_id: item.id.clone(),
        quantity,
        free: inventory.free_slots(),
    }
}

/// Removes `quantity` units of `item_id`, draining slots front to back.
///
/// Slots that reach zero are deleted.
pub fn remove_item(
    inventory: &Inventory,
    item_id: &ItemId,
    quantity: u32,
) -> Result<Inventory, InventoryError> {
    if quantity == 0 {
        return Err(InventoryError::InvalidQuantity);
    }
    let available = inventory.count(item_id);
    if quantity > available {
        return Err(InventoryError::InsufficientQuantity {
            item_id: item_id.clone(),
            requested: quantity,
            available,
        });
    }

    let mut next = inventory.clone();
    let mut remaining = quantity;
    for slot in next.slots.iter_mut().filter(|slot| &slot.item_id == item_id) {
        if remaining == 0 {
            break;
        }
        let taken = remaining.min(slot.quantity);
        slot.quantity -= taken;
        remaining -= taken;
    }
    next.slots.retain(|slot| slot.quantity > 0);
    Ok(next)
}

/// Puts `item` in `slot`, returning the new equipment and whatever was displaced.
pub fn equip_item(
    equipment: &Equipment,
    slot: EquipSlot,
    item: &ItemDefinition,
) -> Result<(Equipment, Option<ItemId>), EquipError> {
    if !slot.accepts(item.kind) {
        return Err(EquipError::IncompatibleSlot {
            item_id: item.id.clone(),
            slot,
        });
    }
    let mut next = equipment.clone();
    let previous = next.slots.insert(slot, item.id.clone());
    Ok((next, previous))
}

/// Clears `slot`. Unequipping an empty slot returns an unchanged copy.
pub fn unequip_item(equipment: &Equipment, slot: EquipSlot) -> (Equipment, Option<ItemId>) {
    let mut next = equipment.clone();
    let removed = next.slots.remove(&slot);
    (next, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ItemKind;

    fn potion() -> ItemDefinition {
        ItemDefinition::new("core:potion", "Potion", ItemKind::Consumable)
    }

    fn sword() -> ItemDefinition {
        ItemDefinition::new("core:sword", "Sword", ItemKind::Weapon)
    }

    fn helm() -> ItemDefinition {
        ItemDefinition::new("core:helm", "Helm", ItemKind::Armor)
    }

    #[test]
    fn stackables_merge_into_one_slot() {
        let bag = Inventory::with_capacity(2);
        let bag = add_item(&bag, &potion(), 2).unwrap();
        let bag = add_item(&bag, &potion(), 3).unwrap();
        assert_eq!(bag.slots, vec![ItemStack::new(ItemId::from("core:potion"), 5)]);
    }

    #[test]
    fn non_stackables_take_a_slot_each() {
        let bag = add_item(&Inventory::with_capacity(3), &sword(), 2).unwrap();
        assert_eq!(bag.slots.len(), 2);
        assert!(bag.slots.iter().all(|slot| slot.quantity == 1));
    }

    #[test]
    fn stack_behaviour_holds_for_any_order() {
        let items = [potion(), sword(), potion(), helm(), sword(), potion()];
        let mut bag = Inventory::with_capacity(10);
        for item in &items {
            bag = add_item(&bag, item, 1).unwrap();
        }
        let potion_slots = bag
            .slots
            .iter()
            .filter(|slot| slot.item_id.as_str() == "core:potion")
            .count();
        assert_eq!(potion_slots, 1);
        assert_eq!(bag.count(&ItemId::from("core:potion")), 3);
        assert_eq!(bag.count(&ItemId::from("core:sword")), 2);
        assert_eq!(bag.slots.len(), 4);
        assert!(bag.slots.len() <= bag.capacity);
    }

    #[test]
    fn full_inventory_rejects_and_keeps_input() {
        let bag = add_item(&Inventory::with_capacity(1), &sword(), 1).unwrap();
        let err = add_item(&bag, &helm(), 1).unwrap_err();
        assert_eq!(err.error_code(), "INVENTORY_NO_ROOM");
        assert!(err.severity().is_recoverable());
        assert_eq!(bag.slots.len(), 1);
    }

    #[test]
    fn full_inventory_still_grows_existing_stack() {
        let bag = add_item(&Inventory::with_capacity(1), &potion(), 1).unwrap();
        let bag = add_item(&bag, &potion(), 4).unwrap();
        assert_eq!(bag.count(&ItemId::from("core:potion")), 5);
    }

    #[test]
    fn partial_fit_is_all_or_nothing() {
        let err = add_item(&Inventory::with_capacity(2), &sword(), 3).unwrap_err();
        assert!(matches!(err, InventoryError::NoRoom { free: 2, .. }));
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let bag = Inventory::with_capacity(2);
        assert_eq!(add_item(&bag, &potion(), 0), Err(InventoryError::InvalidQuantity));
        assert_eq!(
            remove_item(&bag, &ItemId::from("core:potion"), 0),
            Err(InventoryError::InvalidQuantity)
        );
    }

    #[test]
    fn remove_decrements_then_deletes() {
        let bag = add_item(&Inventory::with_capacity(2), &potion(), 3).unwrap();
        let id = ItemId::from("core:potion");
        let bag = remove_item(&bag, &id, 2).unwrap();
        assert_eq!(bag.count(&id), 1);
        let bag = remove_item(&bag, &id, 1).unwrap();
        assert!(bag.slots.is_empty());
    }

    #[test]
    fn remove_spans_non_stackable_slots() {
        let bag = add_item(&Inventory::with_capacity(3), &sword(), 3).unwrap();
        let bag = remove_item(&bag, &ItemId::from("core:sword"), 2).unwrap();
        assert_eq!(bag.slots.len(), 1);
    }

    #[test]
    fn remove_more_than_present_fails() {
        let bag = add_item(&Inventory::with_capacity(2), &potion(), 1).unwrap();
        let err = remove_item(&bag, &ItemId::from("core:potion"), 2).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientQuantity {
                item_id: ItemId::from("core:potion"),
                requested: 2,
                available: 1,
            }
        );
    }

    #[test]
    fn equip_swaps_and_reports_previous() {
        let axe = ItemDefinition::new("core:axe", "Axe", ItemKind::Weapon);
        let (gear, previous) = equip_item(&Equipment::empty(), EquipSlot::Weapon, &sword()).unwrap();
        assert_eq!(previous, None);
        let (gear, previous) = equip_item(&gear, EquipSlot::Weapon, &axe).unwrap();
        assert_eq!(previous, Some(ItemId::from("core:sword")));
        assert_eq!(gear.get(EquipSlot::Weapon), Some(&ItemId::from("core:axe")));
    }

    #[test]
    fn equip_rejects_wrong_slot() {
        let err = equip_item(&Equipment::empty(), EquipSlot::Weapon, &helm()).unwrap_err();
        assert_eq!(err.error_code(), "EQUIP_INCOMPATIBLE_SLOT");
        assert!(equip_item(&Equipment::empty(), EquipSlot::Head, &helm()).is_ok());
    }

    #[test]
    fn unequip_clears_slot() {
        let (gear, _) = equip_item(&Equipment::empty(), EquipSlot::Head, &helm()).unwrap();
        let (gear, removed) = unequip_item(&gear, EquipSlot::Head);
        assert_eq!(removed, Some(ItemId::from("core:helm")));
        assert!(gear.is_empty());
        let (_, removed) = unequip_item(&gear, EquipSlot::Head);
        assert_eq!(removed, None);
    }
}

//! Equipment slots for entities.
//!
//! Equipment references items by id; the item definitions (and therefore the stat
//! bonuses) live in an [`crate::env::ItemCatalog`]. Bonuses are aggregated on read
//! by [`crate::stats`] and never cached here.

use std::collections::BTreeMap;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::env::{ItemId, ItemKind};

/// Equipment slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Body,
    Head,
    Hands,
    Accessory,
}

impl EquipSlot {
    /// Item-kind to slot compatibility rule.
    ///
    /// Weapons go in the weapon slot, armour in body/head/hands, accessories in the
    /// accessory slot. Consumables and misc items are never equippable.
    pub fn accepts(self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::Weapon => self == EquipSlot::Weapon,
            ItemKind::Armor => matches!(self, EquipSlot::Body | EquipSlot::Head | EquipSlot::Hands),
            ItemKind::Accessory => self == EquipSlot::Accessory,
            ItemKind::Consumable | ItemKind::Misc => false,
        }
    }
}

/// Currently equipped items, keyed by slot. Empty slots are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub slots: BTreeMap<EquipSlot, ItemId>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&ItemId> {
        self.slots.get(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Equipped item ids in slot order.
    pub fn items(&self) -> impl Iterator<Item = (EquipSlot, &ItemId)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn armour_fits_three_slots() {
        let accepting: Vec<_> = EquipSlot::iter()
            .filter(|slot| slot.accepts(ItemKind::Armor))
            .collect();
        assert_eq!(
            accepting,
            vec![EquipSlot::Body, EquipSlot::Head, EquipSlot::Hands]
        );
    }

    #[test]
    fn consumables_fit_nowhere() {
        assert!(EquipSlot::iter().all(|slot| !slot.accepts(ItemKind::Consumable)));
    }

    #[test]
    fn slot_names_are_snake_case() {
        assert_eq!(EquipSlot::Accessory.to_string(), "accessory");
        let name: &'static str = EquipSlot::Weapon.into();
        assert_eq!(name, "weapon");
    }
}

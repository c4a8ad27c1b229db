//! Read-time stat aggregation.
//!
//! Equipment contributes through the closed [`StatModifier`] set. Totals are
//! recomputed on every read and never written back to the entity; turn
//! resolution keeps using the base `attack` field.
use crate::env::{ItemCatalog, StatModifier};
use crate::state::{Entity, Equipment};

/// Summed equipment contributions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonuses {
    pub attack: i32,
    pub defense: i32,
    pub max_hp: i32,
}

impl StatBonuses {
    pub fn apply(&mut self, modifier: StatModifier) {
        match modifier {
            StatModifier::Damage(value) => self.attack = self.attack.saturating_add(value),
            StatModifier::Defense(value) => self.defense = self.defense.saturating_add(value),
            StatModifier::MaxHp(value) => self.max_hp = self.max_hp.saturating_add(value),
        }
    }
}

/// Base stats plus equipment bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

/// Sums the modifiers of every equipped item the catalog knows.
///
/// Unknown item ids contribute nothing.
pub fn equipment_bonuses(equipment: &Equipment, catalog: &dyn ItemCatalog) -> StatBonuses {
    let mut bonuses = StatBonuses::default();
    for (_, item_id) in equipment.items() {
        let Some(item) = catalog.item(item_id) else {
            continue;
        };
        for modifier in &item.modifiers {
            bonuses.apply(*modifier);
        }
    }
    bonuses
}

pub fn effective_stats(entity: &Entity, catalog: &dyn ItemCatalog) -> EffectiveStats {
    let bonuses = entity
        .equipment
        .as_ref()
        .map(|equipment| equipment_bonuses(equipment, catalog))
        .unwrap_or_default();

    let max_hp = entity.max_hp.saturating_add(bonuses.max_hp).max(1);
    EffectiveStats {
        hp: entity.hp.min(max_hp),
        max_hp,
        attack: entity.attack.saturating_add(bonuses.attack),
        defense: entity
            .defense
            .unwrap_or(0)
            .saturating_add(bonuses.defense),
    }
}

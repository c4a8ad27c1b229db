//! Entity-related state types.
//!
//! This module contains the live entity record and the per-entity collections it
//! may carry:
//! - Entity: position, hit points, combat stats, lifecycle
//! - Inventory: stacked item slots with a fixed capacity
//! - Equipment: slot → item map
//! - Status: status effects attached by content

pub mod equipment;
pub mod inventory;
pub mod status;

pub use equipment::{EquipSlot, Equipment};
pub use inventory::{Inventory, ItemStack};
pub use status::{StatusEffect, StatusEffectKind};

use super::{EntityId, Position};
use crate::config::EntityStats;

/// Which side an entity fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityKind {
    Player,
    Enemy,
}

impl EntityKind {
    /// Players fight enemies and vice versa; same-kind entities never attack each other.
    pub fn opposes(self, other: EntityKind) -> bool {
        self != other
    }
}

/// Lifecycle of an entity within a single turn.
///
/// The third stage, *removed*, is the absence of the entity from
/// `GameState::entities` after end-of-turn cleanup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Lifecycle {
    #[default]
    Alive,
    /// Dropped to 0 hp this turn. Ignored by occupancy and targeting, removed at cleanup.
    PendingRemoval,
}

/// Shape of the area an entity can see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
pub enum VisionShape {
    #[default]
    Circle,
}

/// Per-entity sight parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisionProfile {
    pub range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: VisionShape,
    pub blocks_through_walls: bool,
}

impl VisionProfile {
    pub const fn circle(range: u32) -> Self {
        Self {
            range,
            shape: VisionShape::Circle,
            blocks_through_walls: true,
        }
    }
}

/// Result of applying damage to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub hp_before: i32,
    pub hp_after: i32,
    pub killed: bool,
}

/// A player or enemy on the active level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Option<Inventory>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Option<Equipment>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vision: Option<VisionProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effects: Vec<StatusEffect>,
    /// Namespaced content template this entity was built from, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub template: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    lifecycle: Lifecycle,
}

impl Entity {
    /// Creates a full-health entity from base stats.
    pub fn new(id: EntityId, kind: EntityKind, position: Position, stats: EntityStats) -> Self {
        let max_hp = stats.max_hp.max(1);
        Self {
            id,
            kind,
            position,
            hp: max_hp,
            max_hp,
            attack: stats.attack,
            defense: stats.defense,
            inventory: None,
            equipment: None,
            vision: None,
            status_effects: Vec::new(),
            template: None,
            lifecycle: Lifecycle::Alive,
        }
    }

    pub fn player(id: EntityId, position: Position, stats: EntityStats) -> Self {
        Self::new(id, EntityKind::Player, position, stats)
    }

    pub fn enemy(id: EntityId, position: Position, stats: EntityStats) -> Self {
        Self::new(id, EntityKind::Enemy, position, stats)
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_vision(mut self, vision: VisionProfile) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_status(mut self, effect: StatusEffect) -> Self {
        self.status_effects.push(effect);
        self
    }

    /// Sets current hp, clamped to `max_hp`. Zero or below marks the entity dead.
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.min(self.max_hp);
        self.sync_lifecycle();
        self
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    pub fn is_enemy(&self) -> bool {
        self.kind == EntityKind::Enemy
    }

    /// Re-derives the lifecycle from hp (used for states that arrive from outside).
    pub(crate) fn sync_lifecycle(&mut self) {
        self.hp = self.hp.min(self.max_hp);
        self.lifecycle = if self.hp > 0 {
            Lifecycle::Alive
        } else {
            Lifecycle::PendingRemoval
        };
    }

    /// Subtracts `amount` (negative amounts count as zero) from hp.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        let hp_before = self.hp;
        self.hp = self.hp.saturating_sub(amount.max(0));
        let killed = self.is_alive() && self.hp <= 0;
        if killed {
            self.lifecycle = Lifecycle::PendingRemoval;
        }
        DamageOutcome {
            hp_before,
            hp_after: self.hp,
            killed,
        }
    }

    /// Restores hp without exceeding `max_hp`. Dead entities are not revived.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    pub fn has_status(&self, kind: StatusEffectKind) -> bool {
        self.status_effects.iter().any(|effect| effect.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Entity {
        Entity::enemy(EntityId(2), Position::new(1, 1), EntityStats::new(10, 3))
    }

    #[test]
    fn damage_marks_pending_removal_once() {
        let mut entity = goblin();
        let first = entity.apply_damage(7);
        assert_eq!((first.hp_before, first.hp_after, first.killed), (10, 3, false));

        let second = entity.apply_damage(5);
        assert!(second.killed);
        assert_eq!(entity.lifecycle(), Lifecycle::PendingRemoval);

        let third = entity.apply_damage(5);
        assert!(!third.killed, "already-dead entities are not killed twice");
    }

    #[test]
    fn heal_never_exceeds_max_hp() {
        let mut entity = goblin();
        entity.apply_damage(4);
        assert_eq!(entity.heal(100), 4);
        assert_eq!(entity.hp, entity.max_hp);
    }

    #[test]
    fn with_hp_clamps_and_tracks_death() {
        assert_eq!(goblin().with_hp(50).hp, 10);
        assert!(!goblin().with_hp(0).is_alive());
    }

    #[test]
    fn kinds_oppose_only_each_other() {
        assert!(EntityKind::Player.opposes(EntityKind::Enemy));
        assert!(!EntityKind::Enemy.opposes(EntityKind::Enemy));
    }
}

pub mod actor;
pub mod common;
pub mod world;

// Re-export all actor-related types
pub use actor::{
    DamageOutcome, Entity, EntityKind, EquipSlot, Equipment, Inventory, ItemStack, Lifecycle,
    StatusEffect, StatusEffectKind, VisionProfile, VisionShape,
};

// Re-export common types
pub use common::{EntityId, IdAllocator, Position};

// Re-export world types
pub use world::{Dungeon, Tile, TileKind};

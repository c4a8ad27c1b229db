//! Deterministic dungeon simulation shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical rules (actions, turn resolution, level
//! generation, stairs, vision, inventory) as pure functions over value types.
//! All state evolution flows through [`engine::TurnResolver`]; the crate performs
//! no I/O and draws every random number from the state's own seed.
pub mod action;
pub mod config;
pub mod dungeon;
pub mod engine;
pub mod env;
pub mod error;
pub mod items;
pub mod state;
pub mod stats;
pub mod vision;

pub use action::{Action, GameEvent, StairDirection};
pub use config::{EntityStats, GameConfig, GeneratorConfig};
pub use dungeon::{
    GeneratedLevel, GenerationError, LevelLayout, Room, generate_level, generate_levels,
};
pub use engine::{TurnRecord, TurnResolver, resolve_turn};
pub use env::{
    EnemySpawner, ItemCatalog, ItemDefinition, ItemId, ItemKind, Mulberry32, StatModifier,
    StatSpawner, advance_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use items::{EquipError, InventoryError, add_item, equip_item, remove_item, unequip_item};
pub use state::{
    Dungeon, Entity, EntityId, EntityKind, EquipSlot, Equipment, GameState, IdAllocator,
    Inventory, ItemStack, LevelSet, Lifecycle, Position, Rules, StatusEffect, StatusEffectKind,
    Tile, TileKind, VisionProfile, VisionShape,
};
pub use stats::{EffectiveStats, StatBonuses, effective_stats, equipment_bonuses};
pub use vision::{
    Perception, TileVisibility, VisibilityMap, compute_visibility, compute_visible_tiles,
    perceive, update_seen_tiles,
};

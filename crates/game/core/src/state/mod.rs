//! Authoritative game state representation.
//!
//! [`GameState`] is a plain value: the resolver never mutates the caller's copy,
//! it returns a successor. Level grids sit behind [`Arc`] so that a successor
//! shares every grid it does not touch with its predecessor.
pub mod types;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub use types::{
    DamageOutcome, Dungeon, Entity, EntityId, EntityKind, EquipSlot, Equipment, IdAllocator,
    Inventory, ItemStack, Lifecycle, Position, StatusEffect, StatusEffectKind, Tile, TileKind,
    VisionProfile, VisionShape,
};

use crate::config::{EntityStats, GameConfig};
use crate::dungeon::{GenerationError, LevelLayout, generate_level, generate_levels};
use crate::env::{EnemySpawner, Mulberry32};

/// Rules fixed at session start that turn resolution still needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    /// Stats given to players created by `join`.
    pub player: EntityStats,
    /// Stats used by the built-in spawner.
    pub enemy: EntityStats,
    pub vision_range: u32,
    pub inventory_capacity: usize,
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        Self {
            player: config.player,
            enemy: config.enemy,
            vision_range: config.vision_range,
            inventory_capacity: config.inventory_capacity,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

/// Multi-level bookkeeping.
///
/// Only the active level's entities live in [`GameState::entities`]; every level
/// that has been left keeps its population in `rosters` until it is revisited.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSet {
    pub current: usize,
    pub layouts: Vec<LevelLayout>,
    pub rosters: BTreeMap<usize, Vec<Entity>>,
}

impl LevelSet {
    pub fn max_levels(&self) -> usize {
        self.layouts.len()
    }

    pub fn current_layout(&self) -> Option<&LevelLayout> {
        self.layouts.get(self.current)
    }

    /// Whether the level has been populated before (visited or cached).
    pub fn has_roster(&self, level: usize) -> bool {
        self.rosters.contains_key(&level)
    }
}

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Active level grid.
    pub dungeon: Arc<Dungeon>,
    /// Entities on the active level, sorted by id.
    pub entities: Vec<Entity>,
    /// Starts at 1 and increases by exactly one per resolved turn.
    pub turn: u64,
    /// Current generator state; advanced by one draw per turn.
    pub seed: u32,
    /// Where joining players are placed on the active level.
    pub spawn: Position,
    pub rules: Rules,
    #[cfg_attr(feature = "serde", serde(default))]
    pub levels: Option<LevelSet>,
    /// Sequential entity id allocator (monotonically increasing, never reused).
    ids: IdAllocator,
}

impl GameState {
    /// Creates a turn-1 state on a hand-built grid with no entities.
    pub fn new(dungeon: Dungeon, spawn: Position, seed: u32) -> Self {
        Self::from_shared(Arc::new(dungeon), spawn, seed)
    }

    fn from_shared(dungeon: Arc<Dungeon>, spawn: Position, seed: u32) -> Self {
        Self {
            dungeon,
            entities: Vec::new(),
            turn: 1,
            seed,
            spawn,
            rules: Rules::default(),
            levels: None,
            ids: IdAllocator::default(),
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Adds an entity, keeping the list sorted and the allocator ahead of its id.
    ///
    /// An entity whose id is already present replaces the existing record.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.insert_entity(entity);
        self
    }

    /// Generates a single level from `seed` and populates its enemy spawns.
    ///
    /// # Errors
    ///
    /// Propagates [`GenerationError`] when no room can be placed.
    pub fn new_single_level(
        config: &GameConfig,
        seed: u32,
        width: u32,
        height: u32,
        spawner: &dyn EnemySpawner,
    ) -> Result<Self, GenerationError> {
        let mut rng = Mulberry32::new(seed);
        let level = generate_level(&mut rng, width, height, &config.generator)?;

        let mut state = Self::new(level.dungeon, level.spawn, rng.state());
        state.rules = Rules::from(config);
        state.entities = spawner.spawn(0, &level.enemy_spawns, &mut state.ids);
        state.normalize_entities();
        Ok(state)
    }

    /// Generates `config.generator.levels` levels from `seed` and activates the entrance.
    ///
    /// Only the entrance is populated; deeper levels are populated on first visit.
    ///
    /// # Errors
    ///
    /// Propagates [`GenerationError`] from level generation.
    pub fn new_multi_level(
        config: &GameConfig,
        seed: u32,
        width: u32,
        height: u32,
        spawner: &dyn EnemySpawner,
    ) -> Result<Self, GenerationError> {
        let mut rng = Mulberry32::new(seed);
        let layouts = generate_levels(&mut rng, width, height, &config.generator)?;
        let entrance = layouts.first().ok_or(GenerationError::NoLevels)?;

        let mut state =
            Self::from_shared(Arc::clone(&entrance.dungeon), entrance.spawn, rng.state());
        state.rules = Rules::from(config);
        state.entities = spawner.spawn(0, &entrance.enemy_spawns, &mut state.ids);
        state.normalize_entities();
        state.levels = Some(LevelSet {
            current: 0,
            layouts,
            rosters: BTreeMap::new(),
        });
        Ok(state)
    }

    // ===== queries =====

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |entity| entity.id)
            .ok()
            .map(|index| &self.entities[index])
    }

    /// Live entity standing on `position`, if any.
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.is_alive() && entity.position == position)
    }

    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.is_player())
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.is_enemy())
    }

    /// Whether `id` exists on the active level or in any cached level roster.
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
            || self.levels.as_ref().is_some_and(|levels| {
                levels
                    .rosters
                    .values()
                    .any(|roster| roster.iter().any(|entity| entity.id == id))
            })
    }

    pub fn current_level(&self) -> usize {
        self.levels.as_ref().map_or(0, |levels| levels.current)
    }

    pub fn max_levels(&self) -> usize {
        self.levels.as_ref().map_or(1, LevelSet::max_levels)
    }

    /// True when `id` stands on the final level's exit.
    pub fn is_at_exit(&self, id: EntityId) -> bool {
        let (Some(entity), Some(layout)) = (
            self.entity(id),
            self.levels.as_ref().and_then(LevelSet::current_layout),
        ) else {
            return false;
        };
        layout.exit == Some(entity.position)
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    // ===== mutation helpers =====

    /// Hands out a fresh entity id.
    pub fn allocate_id(&mut self) -> EntityId {
        self.ids.allocate()
    }

    pub(crate) fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub(crate) fn insert_entity(&mut self, entity: Entity) {
        self.ids.reserve(entity.id);
        match self
            .entities
            .binary_search_by_key(&entity.id, |existing| existing.id)
        {
            Ok(index) => self.entities[index] = entity,
            Err(index) => self.entities.insert(index, entity),
        }
    }

    /// Sorts by id and re-derives lifecycles from hp.
    pub(crate) fn normalize_entities(&mut self) {
        self.entities.sort_by_key(|entity| entity.id);
        for entity in &mut self.entities {
            entity.sync_lifecycle();
            self.ids.reserve(entity.id);
        }
    }

    /// Folds `positions` into the active grid's `seen` flags.
    ///
    /// The grid is copied only if at least one flag actually changes.
    pub fn record_seen(&mut self, positions: &BTreeSet<Position>) -> usize {
        let unseen: Vec<Position> = positions
            .iter()
            .copied()
            .filter(|&position| self.dungeon.tile(position).is_some_and(|tile| !tile.seen))
            .collect();
        if unseen.is_empty() {
            return 0;
        }
        Arc::make_mut(&mut self.dungeon).mark_seen(&unseen)
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two processes that agree on the root agree on every committed field.
    ///
    /// # Errors
    ///
    /// Returns the bincode error if the state cannot be encoded.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

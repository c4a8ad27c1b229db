/// Game configuration constants and tunable parameters.
///
/// Generation parameters are read once at session initialisation. Everything that
/// turn resolution needs afterwards (join stats, vision range) is copied into
/// [`crate::state::Rules`] so that a committed state is self-describing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub generator: GeneratorConfig,
    /// Stats of a player entity created by a `join` action.
    pub player: EntityStats,
    /// Stats of enemies created by the built-in spawner.
    pub enemy: EntityStats,
    /// Default sight radius for entities without an explicit vision profile.
    pub vision_range: u32,
    /// Inventory capacity given to joining players.
    pub inventory_capacity: usize,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VISION_RANGE: u32 = 8;
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            player: EntityStats::DEFAULT_PLAYER,
            enemy: EntityStats::DEFAULT_ENEMY,
            vision_range: Self::DEFAULT_VISION_RANGE,
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Room-placement parameters for the dungeon generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Number of placement attempts per level (rejected candidates count too).
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    /// Number of levels in multi-level play.
    pub levels: u32,
}

impl GeneratorConfig {
    pub const DEFAULT_MAX_ROOMS: u32 = 30;
    pub const DEFAULT_ROOM_MIN_SIZE: i32 = 6;
    pub const DEFAULT_ROOM_MAX_SIZE: i32 = 10;
    pub const DEFAULT_LEVELS: u32 = 3;
    /// Smallest room side that still carves a floor tile at its centre.
    pub const MIN_ROOM_SIZE: i32 = 2;
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_rooms: Self::DEFAULT_MAX_ROOMS,
            room_min_size: Self::DEFAULT_ROOM_MIN_SIZE,
            room_max_size: Self::DEFAULT_ROOM_MAX_SIZE,
            levels: Self::DEFAULT_LEVELS,
        }
    }
}

/// Base combat stats used when an entity is created without a content template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityStats {
    pub max_hp: i32,
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: Option<i32>,
}

impl EntityStats {
    pub const DEFAULT_PLAYER: Self = Self::new(30, 5);
    pub const DEFAULT_ENEMY: Self = Self::new(10, 3);

    pub const fn new(max_hp: i32, attack: i32) -> Self {
        Self {
            max_hp,
            attack,
            defense: None,
        }
    }
}

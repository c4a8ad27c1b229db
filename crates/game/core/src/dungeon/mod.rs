//! Seeded procedural level generation.
//!
//! Levels are built by random room placement: every tile starts as wall, a fixed
//! number of candidate rooms is drawn from the generator, overlapping candidates
//! are rejected, and each accepted room is carved and joined to the previously
//! accepted one with an L-shaped tunnel. The tunnel's leg order is a coin flip.
//!
//! The generator stream is borrowed, never re-seeded, so a sequence of levels is
//! reproducible from the one root seed.
mod levels;
mod room;

pub use levels::{LevelLayout, generate_levels};
pub use room::Room;

use std::collections::{BTreeSet, VecDeque};

use crate::config::GeneratorConfig;
use crate::env::Mulberry32;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Dungeon, Position, TileKind};

/// Generation failures. All of them indicate parameters that cannot produce a
/// playable level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("dungeon dimensions {width}x{height} are out of range")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("level {level} has no rooms, so there is no spawn point")]
    NoRooms { level: usize },

    #[error("level {level} placed {placed} room(s) but needs at least {required}")]
    NotEnoughRooms {
        level: usize,
        placed: usize,
        required: usize,
    },

    #[error("multi-level generation needs at least one level")]
    NoLevels,
}

impl GameError for GenerationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "GENERATION_INVALID_DIMENSIONS",
            Self::NoRooms { .. } => "GENERATION_NO_ROOMS",
            Self::NotEnoughRooms { .. } => "GENERATION_NOT_ENOUGH_ROOMS",
            Self::NoLevels => "GENERATION_NO_LEVELS",
        }
    }
}

/// Output of single-level generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub dungeon: Dungeon,
    /// Accepted rooms in placement order.
    pub rooms: Vec<Room>,
    /// Centre of the first room.
    pub spawn: Position,
    /// Centres of every room after the first.
    pub enemy_spawns: Vec<Position>,
}

/// Generates one level, consuming draws from `rng`.
///
/// # Errors
///
/// Candidates narrower or shorter than [`GeneratorConfig::MIN_ROOM_SIZE`] are
/// discarded like overlapping ones.
///
/// Returns [`GenerationError::NoRooms`] if no candidate room fit, and
/// [`GenerationError::InvalidDimensions`] if the grid cannot be addressed with
/// `i32` coordinates.
pub fn generate_level(
    rng: &mut Mulberry32,
    width: u32,
    height: u32,
    config: &GeneratorConfig,
) -> Result<GeneratedLevel, GenerationError> {
    generate_indexed(rng, width, height, config, 0)
}

pub(crate) fn generate_indexed(
    rng: &mut Mulberry32,
    width: u32,
    height: u32,
    config: &GeneratorConfig,
    level: usize,
) -> Result<GeneratedLevel, GenerationError> {
    let invalid = || GenerationError::InvalidDimensions { width, height };
    let w = i32::try_from(width).map_err(|_| invalid())?;
    let h = i32::try_from(height).map_err(|_| invalid())?;

    let mut dungeon = Dungeon::filled(width, height);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..config.max_rooms {
        let room_max = config.room_max_size.saturating_add(1);
        let room_w = rng.random_int(config.room_min_size, room_max);
        let room_h = rng.random_int(config.room_min_size, room_max);
        let x = rng.random_int(0, w.saturating_sub(room_w).saturating_sub(1));
        let y = rng.random_int(0, h.saturating_sub(room_h).saturating_sub(1));

        // A thinner room has no interior, so its centre would stay wall.
        if room_w < GeneratorConfig::MIN_ROOM_SIZE || room_h < GeneratorConfig::MIN_ROOM_SIZE {
            continue;
        }
        if i64::from(x) + i64::from(room_w) >= i64::from(w)
            || i64::from(y) + i64::from(room_h) >= i64::from(h)
        {
            continue;
        }
        let candidate = Room::new(x, y, room_w, room_h);
        if rooms.iter().any(|room| candidate.intersects(room)) {
            continue;
        }

        carve_room(&mut dungeon, &candidate);
        if let Some(previous) = rooms.last() {
            let from = previous.center();
            let to = candidate.center();
            if rng.coin_flip() {
                carve_h_tunnel(&mut dungeon, from.x, to.x, from.y);
                carve_v_tunnel(&mut dungeon, from.y, to.y, to.x);
            } else {
                carve_v_tunnel(&mut dungeon, from.y, to.y, from.x);
                carve_h_tunnel(&mut dungeon, from.x, to.x, to.y);
            }
        }
        rooms.push(candidate);
    }

    let Some(first) = rooms.first() else {
        return Err(GenerationError::NoRooms { level });
    };
    let spawn = first.center();
    let enemy_spawns = rooms.iter().skip(1).map(Room::center).collect();

    Ok(GeneratedLevel {
        dungeon,
        rooms,
        spawn,
        enemy_spawns,
    })
}

fn carve_room(dungeon: &mut Dungeon, room: &Room) {
    for position in room.interior() {
        dungeon.set_kind(position, TileKind::Floor);
    }
}

fn carve_h_tunnel(dungeon: &mut Dungeon, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        dungeon.set_kind(Position::new(x, y), TileKind::Floor);
    }
}

fn carve_v_tunnel(dungeon: &mut Dungeon, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        dungeon.set_kind(Position::new(x, y), TileKind::Floor);
    }
}

/// Walkable tiles reachable from `start` (4-connected), including `start`.
pub fn reachable_from(dungeon: &Dungeon, start: Position) -> BTreeSet<Position> {
    let mut visited = BTreeSet::new();
    if !dungeon.is_walkable(start) {
        return visited;
    }
    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(current) = queue.pop_front() {
        for next in current.neighbours() {
            if dungeon.is_walkable(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

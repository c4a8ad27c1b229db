use std::sync::Arc;

use super::{GenerationError, generate_indexed};
use crate::config::GeneratorConfig;
use crate::env::Mulberry32;
use crate::state::{Dungeon, Position, TileKind};

/// One level of a multi-level dungeon together with its stair linkage.
///
/// The first room of every level holds its arrival point (the entrance spawn on
/// level 0, the up stairs elsewhere) and the last room holds its departure point
/// (the down stairs, or the exit on the final level). Rooms in between provide
/// the enemy spawns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelLayout {
    pub index: usize,
    pub is_entrance: bool,
    pub is_final: bool,
    pub dungeon: Arc<Dungeon>,
    pub spawn: Position,
    pub enemy_spawns: Vec<Position>,
    pub stairs_up: Option<Position>,
    pub stairs_down: Option<Position>,
    pub exit: Option<Position>,
}

impl LevelLayout {
    /// Rooms a level needs so that arrival and departure points differ.
    pub const MIN_ROOMS: usize = 2;
}

/// Generates `config.levels` levels from one continuous generator stream.
///
/// # Errors
///
/// Fails with [`GenerationError::NoLevels`] when zero levels are requested and
/// with [`GenerationError::NotEnoughRooms`] when a level cannot hold both of its
/// stair points.
pub fn generate_levels(
    rng: &mut Mulberry32,
    width: u32,
    height: u32,
    config: &GeneratorConfig,
) -> Result<Vec<LevelLayout>, GenerationError> {
    let count = config.levels as usize;
    if count == 0 {
        return Err(GenerationError::NoLevels);
    }

    let mut layouts = Vec::with_capacity(count);
    for index in 0..count {
        let generated = generate_indexed(rng, width, height, config, index)?;
        let rooms = generated.rooms;
        if rooms.len() < LevelLayout::MIN_ROOMS {
            return Err(GenerationError::NotEnoughRooms {
                level: index,
                placed: rooms.len(),
                required: LevelLayout::MIN_ROOMS,
            });
        }

        let is_entrance = index == 0;
        let is_final = index + 1 == count;
        let arrival = rooms[0].center();
        let departure = rooms[rooms.len() - 1].center();

        let mut dungeon = generated.dungeon;
        let stairs_up = (!is_entrance).then(|| {
            dungeon.set_kind(arrival, TileKind::StairsUp);
            arrival
        });
        let stairs_down = (!is_final).then(|| {
            dungeon.set_kind(departure, TileKind::StairsDown);
            departure
        });
        let exit = is_final.then_some(departure);

        let enemy_spawns = rooms[1..rooms.len() - 1]
            .iter()
            .map(|room| room.center())
            .collect();

        layouts.push(LevelLayout {
            index,
            is_entrance,
            is_final,
            dungeon: Arc::new(dungeon),
            spawn: arrival,
            enemy_spawns,
            stairs_up,
            stairs_down,
            exit,
        });
    }
    Ok(layouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::reachable_from;

    fn three_levels(seed: u32) -> Vec<LevelLayout> {
        let mut rng = Mulberry32::new(seed);
        generate_levels(&mut rng, 60, 40, &GeneratorConfig::default()).expect("levels")
    }

    #[test]
    fn entrance_and_final_are_tagged() {
        let levels = three_levels(12345);
        assert_eq!(levels.len(), 3);
        assert!(levels[0].is_entrance && !levels[0].is_final);
        assert!(!levels[1].is_entrance && !levels[1].is_final);
        assert!(levels[2].is_final);

        assert_eq!(levels[0].stairs_up, None);
        assert!(levels[0].stairs_down.is_some());
        assert!(levels[1].stairs_up.is_some() && levels[1].stairs_down.is_some());
        assert!(levels[2].stairs_down.is_none() && levels[2].exit.is_some());
    }

    #[test]
    fn stairs_are_marked_and_reachable() {
        for level in three_levels(7) {
            let reachable = reachable_from(&level.dungeon, level.spawn);
            if let Some(up) = level.stairs_up {
                assert_eq!(level.dungeon.kind(up), Some(TileKind::StairsUp));
                assert_eq!(up, level.spawn);
            }
            if let Some(down) = level.stairs_down {
                assert_eq!(level.dungeon.kind(down), Some(TileKind::StairsDown));
                assert!(reachable.contains(&down));
                assert!(!level.enemy_spawns.contains(&down));
            }
            if let Some(exit) = level.exit {
                assert!(reachable.contains(&exit));
                assert!(!level.enemy_spawns.contains(&exit));
            }
        }
    }

    #[test]
    fn stream_continuity_makes_levels_reproducible() {
        assert_eq!(three_levels(555), three_levels(555));
        let levels = three_levels(555);
        assert_ne!(levels[0].dungeon, levels[1].dungeon);
    }

    #[test]
    fn zero_levels_is_an_error() {
        let mut rng = Mulberry32::new(1);
        let config = GeneratorConfig {
            levels: 0,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            generate_levels(&mut rng, 50, 50, &config),
            Err(GenerationError::NoLevels)
        );
    }

    #[test]
    fn single_room_levels_are_rejected() {
        let mut rng = Mulberry32::new(3);
        let config = GeneratorConfig {
            max_rooms: 1,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            generate_levels(&mut rng, 50, 50, &config),
            Err(GenerationError::NotEnoughRooms {
                level: 0,
                placed: 1,
                required: 2
            })
        );
    }
}

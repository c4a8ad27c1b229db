//! Field of view and fog of war.
//!
//! Visibility is derived, never stored: [`compute_visibility`] classifies every
//! tile of the active grid from geometry alone, and callers keep the set of
//! previously seen tiles themselves (or fold it into the grid's `seen` flags
//! with [`GameState::record_seen`]).
//!
//! Rays are cast every 2° out to the viewer's range. With wall blocking enabled
//! each cell a ray reaches must also pass a Bresenham line-of-sight check; the
//! first wall on a ray is visible and ends the ray.
mod line;
mod perception;

pub use line::{bresenham, has_line_of_sight};
pub use perception::{Perception, perceive};

use std::collections::BTreeSet;

use crate::state::{Dungeon, Entity, GameState, Position, VisionProfile, VisionShape};

/// Angular step between rays, in degrees.
pub const RAY_STEP_DEGREES: u32 = 2;

/// Fog-of-war classification of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TileVisibility {
    VisibleNow,
    SeenPreviously,
    Unseen,
}

/// Per-tile classification of a whole grid, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMap {
    width: u32,
    height: u32,
    tiles: Vec<TileVisibility>,
}

impl VisibilityMap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Classification at `position`; out-of-bounds positions are unseen.
    pub fn get(&self, position: Position) -> TileVisibility {
        if position.x < 0 || position.y < 0 {
            return TileVisibility::Unseen;
        }
        let (x, y) = (position.x as u32, position.y as u32);
        if x >= self.width || y >= self.height {
            return TileVisibility::Unseen;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    /// Positions with the given classification, row-major.
    pub fn positions(&self, visibility: TileVisibility) -> impl Iterator<Item = Position> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| **tile == visibility)
            .map(move |(index, _)| {
                let index = index as u32;
                Position::new((index % width) as i32, (index / width) as i32)
            })
    }

    pub fn count(&self, visibility: TileVisibility) -> usize {
        self.tiles.iter().filter(|tile| **tile == visibility).count()
    }
}

/// Tiles visible from `center` within `range`.
///
/// The origin is always visible, even inside a wall or out of bounds.
pub fn compute_visible_tiles(
    center: Position,
    range: u32,
    dungeon: &Dungeon,
    block_through_walls: bool,
) -> BTreeSet<Position> {
    let mut visible = BTreeSet::from([center]);
    for degrees in (0..360).step_by(RAY_STEP_DEGREES as usize) {
        let angle = f64::from(degrees).to_radians();
        let (sin, cos) = angle.sin_cos();
        for distance in 1..=range {
            let reach = f64::from(distance);
            let cell = Position::new(
                center.x + (cos * reach).round() as i32,
                center.y + (sin * reach).round() as i32,
            );
            if !dungeon.contains(cell) {
                break;
            }
            if block_through_walls && !has_line_of_sight(dungeon, center, cell) {
                break;
            }
            visible.insert(cell);
            if block_through_walls && dungeon.is_opaque(cell) {
                break;
            }
        }
    }
    visible
}

/// Sight parameters of `entity`, falling back to a circle of the session's default range.
pub fn vision_profile(state: &GameState, entity: &Entity) -> VisionProfile {
    entity
        .vision
        .unwrap_or_else(|| VisionProfile::circle(state.rules.vision_range))
}

/// Classifies every tile of the active grid for `entity`.
///
/// A tile is `SeenPreviously` when it is in `previously_seen` or carries the
/// grid's `seen` flag, and is not visible now.
pub fn compute_visibility(
    state: &GameState,
    entity: &Entity,
    previously_seen: &BTreeSet<Position>,
) -> VisibilityMap {
    let profile = vision_profile(state, entity);
    let visible = match profile.shape {
        VisionShape::Circle => compute_visible_tiles(
            entity.position,
            profile.range,
            &state.dungeon,
            profile.blocks_through_walls,
        ),
    };

    let tiles = state
        .dungeon
        .iter()
        .map(|(position, tile)| {
            if visible.contains(&position) {
                TileVisibility::VisibleNow
            } else if tile.seen || previously_seen.contains(&position) {
                TileVisibility::SeenPreviously
            } else {
                TileVisibility::Unseen
            }
        })
        .collect();

    VisibilityMap {
        width: state.dungeon.width(),
        height: state.dungeon.height(),
        tiles,
    }
}

/// Returns `seen` extended with every tile that is visible now.
pub fn update_seen_tiles(seen: &BTreeSet<Position>, map: &VisibilityMap) -> BTreeSet<Position> {
    let mut next = seen.clone();
    next.extend(map.positions(TileVisibility::VisibleNow));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityStats;
    use crate::state::EntityId;

    fn corridor_state() -> GameState {
        GameState::new(
            Dungeon::from_rows(&[
                "###########",
                "#.........#",
                "#.....#...#",
                "#.........#",
                "###########",
            ]),
            Position::new(1, 1),
            0,
        )
    }

    #[test]
    fn origin_is_always_visible() {
        let dungeon = Dungeon::from_rows(&["###", "###", "###"]);
        let visible = compute_visible_tiles(Position::new(1, 1), 5, &dungeon, true);
        assert!(visible.contains(&Position::new(1, 1)));
        assert!(visible.iter().all(|p| p.manhattan(Position::new(1, 1)) <= 2));
    }

    #[test]
    fn zero_range_sees_only_the_origin() {
        let state = corridor_state();
        let visible = compute_visible_tiles(Position::new(3, 2), 0, &state.dungeon, true);
        assert_eq!(visible, BTreeSet::from([Position::new(3, 2)]));
    }

    #[test]
    fn wall_is_visible_but_hides_what_is_behind() {
        let state = corridor_state();
        let visible = compute_visible_tiles(Position::new(4, 2), 8, &state.dungeon, true);
        assert!(visible.contains(&Position::new(6, 2)), "the wall itself");
        assert!(!visible.contains(&Position::new(7, 2)), "directly behind the wall");
        assert!(visible.contains(&Position::new(5, 2)));
    }

    #[test]
    fn without_blocking_rays_pass_through_walls() {
        let state = corridor_state();
        let visible = compute_visible_tiles(Position::new(4, 2), 8, &state.dungeon, false);
        assert!(visible.contains(&Position::new(7, 2)));
    }

    #[test]
    fn classification_is_exhaustive() {
        let state = corridor_state();
        let viewer = Entity::player(EntityId(1), Position::new(2, 2), EntityStats::new(5, 1))
            .with_vision(VisionProfile::circle(3));
        let remembered = BTreeSet::from([Position::new(9, 3)]);
        let map = compute_visibility(&state, &viewer, &remembered);

        let total = map.count(TileVisibility::VisibleNow)
            + map.count(TileVisibility::SeenPreviously)
            + map.count(TileVisibility::Unseen);
        assert_eq!(total, 11 * 5);
        assert_eq!(map.get(Position::new(9, 3)), TileVisibility::SeenPreviously);
        assert_eq!(map.get(Position::new(2, 2)), TileVisibility::VisibleNow);
        assert_eq!(map.get(Position::new(-1, 0)), TileVisibility::Unseen);
    }

    #[test]
    fn fog_of_war_never_forgets() {
        let state = corridor_state();
        let mut seen = BTreeSet::new();
        let mut ever_visible = BTreeSet::new();
        for x in [1, 4, 8, 9, 2] {
            let viewer = Entity::player(EntityId(1), Position::new(x, 1), EntityStats::new(5, 1))
                .with_vision(VisionProfile::circle(2));
            let map = compute_visibility(&state, &viewer, &seen);
            for position in &ever_visible {
                assert_ne!(map.get(*position), TileVisibility::Unseen);
            }
            ever_visible.extend(map.positions(TileVisibility::VisibleNow));
            seen = update_seen_tiles(&seen, &map);
        }
        assert_eq!(seen, ever_visible);
    }

    #[test]
    fn recorded_flags_count_as_seen() {
        let mut state = corridor_state();
        state.record_seen(&BTreeSet::from([Position::new(9, 1)]));
        let viewer = Entity::player(EntityId(1), Position::new(1, 3), EntityStats::new(5, 1))
            .with_vision(VisionProfile::circle(1));
        let map = compute_visibility(&state, &viewer, &BTreeSet::new());
        assert_eq!(map.get(Position::new(9, 1)), TileVisibility::SeenPreviously);
    }
}

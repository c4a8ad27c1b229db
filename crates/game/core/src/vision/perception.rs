use std::collections::{BTreeMap, BTreeSet};

use super::{TileVisibility, compute_visibility, update_seen_tiles};
use crate::state::{Entity, EntityId, GameState, Position, TileKind};

/// What one entity knows about the world this turn.
///
/// This is the only view automated players receive; it never exposes tiles or
/// entities the entity cannot currently see or remember.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Perception {
    pub turn: u64,
    pub level: usize,
    pub me: Entity,
    /// Tiles in view right now.
    pub visible: BTreeSet<Position>,
    /// Visible and remembered tiles with their terrain.
    pub known_tiles: BTreeMap<Position, TileKind>,
    /// Other live entities standing on visible tiles, in id order.
    pub visible_entities: Vec<Entity>,
    /// `seen` folded with everything visible now; feed it into the next call.
    pub remembered: BTreeSet<Position>,
}

impl Perception {
    pub fn is_walkable(&self, position: Position) -> bool {
        self.known_tiles
            .get(&position)
            .is_some_and(|kind| kind.is_walkable())
    }

    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.visible_entities
            .iter()
            .find(|entity| entity.position == position)
    }
}

/// Builds the read-only view of `entity_id`. Unknown or dead entities perceive nothing.
pub fn perceive(
    state: &GameState,
    entity_id: EntityId,
    seen: &BTreeSet<Position>,
) -> Option<Perception> {
    let me = state.entity(entity_id).filter(|entity| entity.is_alive())?;
    let map = compute_visibility(state, me, seen);
    let visible: BTreeSet<Position> = map.positions(TileVisibility::VisibleNow).collect();
    let remembered = update_seen_tiles(seen, &map);

    let known_tiles = state
        .dungeon
        .iter()
        .filter(|(position, _)| map.get(*position) != TileVisibility::Unseen)
        .map(|(position, tile)| (position, tile.kind))
        .collect();

    let visible_entities = state
        .entities
        .iter()
        .filter(|other| other.id != entity_id && other.is_alive())
        .filter(|other| visible.contains(&other.position))
        .cloned()
        .collect();

    Some(Perception {
        turn: state.turn,
        level: state.current_level(),
        me: me.clone(),
        visible,
        known_tiles,
        visible_entities,
        remembered,
    })
}

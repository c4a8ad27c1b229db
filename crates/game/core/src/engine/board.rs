//! Indexed working copy of the active level's entities.
//!
//! The board lives for one resolution. It keeps the entity list sorted by id and
//! maintains an id → slot map and a position → live-occupant map alongside it, so
//! every lookup the rules perform is O(1). Dead entities keep their slot (and
//! can still be read) but leave the occupancy map immediately.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::state::{DamageOutcome, Dungeon, Entity, EntityId, Position};

#[derive(Debug, Default)]
pub(crate) struct Board {
    entities: Vec<Entity>,
    by_id: HashMap<EntityId, usize>,
    occupied: HashMap<Position, EntityId>,
}

impl Board {
    /// Builds a board, sorting by id and re-deriving lifecycles from hp.
    ///
    /// Duplicate ids keep their first record.
    pub(crate) fn new(mut entities: Vec<Entity>) -> Self {
        entities.sort_by_key(|entity| entity.id);
        entities.dedup_by_key(|entity| entity.id);
        for entity in &mut entities {
            entity.sync_lifecycle();
        }
        let mut board = Self {
            entities,
            ..Self::default()
        };
        board.reindex();
        board
    }

    fn reindex(&mut self) {
        self.by_id.clear();
        self.occupied.clear();
        for (index, entity) in self.entities.iter().enumerate() {
            self.by_id.insert(entity.id, index);
            if entity.is_alive() {
                self.occupied.entry(entity.position).or_insert(entity.id);
            }
        }
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        self.by_id.get(&id).map(|&index| &self.entities[index])
    }

    /// The entity with `id`, only while it is alive.
    pub(crate) fn live(&self, id: EntityId) -> Option<&Entity> {
        self.get(id).filter(|entity| entity.is_alive())
    }

    /// Live entity standing on `position`.
    pub(crate) fn occupant(&self, position: Position) -> Option<&Entity> {
        self.occupied.get(&position).and_then(|&id| self.get(id))
    }

    /// Walkable, in bounds, and not occupied by a live entity.
    pub(crate) fn is_free(&self, dungeon: &Dungeon, position: Position) -> bool {
        dungeon.is_walkable(position) && !self.occupied.contains_key(&position)
    }

    /// Ids matching `predicate`, in id order.
    pub(crate) fn ids_where(&self, predicate: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| predicate(entity))
            .map(|entity| entity.id)
            .collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Moves a live entity, keeping the occupancy map in step. Returns the old position.
    pub(crate) fn relocate(&mut self, id: EntityId, to: Position) -> Option<Position> {
        let index = *self.by_id.get(&id)?;
        let entity = &mut self.entities[index];
        if !entity.is_alive() {
            return None;
        }
        let from = entity.position;
        entity.position = to;
        if self.occupied.get(&from) == Some(&id) {
            self.occupied.remove(&from);
        }
        self.occupied.insert(to, id);
        Some(from)
    }

    /// Applies damage; a kill vacates the cell for the rest of the turn.
    pub(crate) fn damage(&mut self, id: EntityId, amount: i32) -> Option<DamageOutcome> {
        let index = *self.by_id.get(&id)?;
        let entity = &mut self.entities[index];
        let position = entity.position;
        let outcome = entity.apply_damage(amount);
        if outcome.killed && self.occupied.get(&position) == Some(&id) {
            self.occupied.remove(&position);
        }
        Some(outcome)
    }

    pub(crate) fn insert(&mut self, entity: Entity) {
        match self
            .entities
            .binary_search_by_key(&entity.id, |existing| existing.id)
        {
            Ok(index) => self.entities[index] = entity,
            Err(index) => self.entities.insert(index, entity),
        }
        self.reindex();
    }

    /// Removes and returns every entity matching `predicate`, in id order.
    pub(crate) fn take_where(&mut self, predicate: impl Fn(&Entity) -> bool) -> Vec<Entity> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|entity| predicate(entity));
        self.entities = kept;
        self.reindex();
        taken
    }

    /// Nearest free tile to `start` by breadth-first search over walkable tiles.
    ///
    /// Neighbours are expanded in a fixed order, so the result is deterministic.
    pub(crate) fn nearest_free(&self, dungeon: &Dungeon, start: Position) -> Option<Position> {
        if !dungeon.is_walkable(start) {
            return None;
        }
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            if !self.occupied.contains_key(&current) {
                return Some(current);
            }
            for next in current.neighbours() {
                if dungeon.is_walkable(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// End-of-turn cleanup: drops every entity that is no longer alive.
    pub(crate) fn into_live(self) -> Vec<Entity> {
        self.entities
            .into_iter()
            .filter(Entity::is_alive)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityStats;

    fn board() -> Board {
        Board::new(vec![
            Entity::enemy(EntityId(3), Position::new(2, 1), EntityStats::new(4, 1)),
            Entity::player(EntityId(1), Position::new(1, 1), EntityStats::new(10, 5)),
        ])
    }

    #[test]
    fn kill_vacates_cell_but_keeps_record() {
        let mut board = board();
        let outcome = board.damage(EntityId(3), 5).unwrap();
        assert!(outcome.killed);
        assert!(board.occupant(Position::new(2, 1)).is_none());
        assert!(board.get(EntityId(3)).is_some());
        assert!(board.live(EntityId(3)).is_none());
        assert_eq!(board.into_live().len(), 1);
    }

    #[test]
    fn relocate_updates_occupancy() {
        let mut board = board();
        assert_eq!(
            board.relocate(EntityId(1), Position::new(1, 2)),
            Some(Position::new(1, 1))
        );
        assert!(board.occupant(Position::new(1, 1)).is_none());
        assert_eq!(
            board.occupant(Position::new(1, 2)).map(|e| e.id),
            Some(EntityId(1))
        );
    }

    #[test]
    fn nearest_free_skips_occupied_cells() {
        let dungeon = Dungeon::from_rows(&["#####", "#...#", "#####"]);
        let board = board();
        assert_eq!(
            board.nearest_free(&dungeon, Position::new(1, 1)),
            Some(Position::new(3, 1))
        );
        assert_eq!(board.nearest_free(&dungeon, Position::new(0, 0)), None);
    }

    #[test]
    fn entities_are_sorted_by_id() {
        let ids: Vec<_> = board().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(3)]);
    }
}

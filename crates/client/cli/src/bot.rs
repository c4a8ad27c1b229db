//! A deliberately simple automated player.
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use game_core::{Action, Entity, Perception, Position, TileKind};
use runtime::{ActionProvider, RuntimeError};

/// Eight step directions, tried in this order on ties.
const STEPS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Chases the nearest visible enemy, otherwise heads for known stairs down,
/// otherwise wanders towards the tiles it has stood on least.
#[derive(Default)]
pub struct ChaseBot {
    visits: Mutex<BTreeMap<Position, u32>>,
}

impl ChaseBot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionProvider for ChaseBot {
    async fn provide_action(&self, perception: &Perception) -> runtime::Result<Action> {
        let mut visits = self
            .visits
            .lock()
            .map_err(|_| RuntimeError::Provider("visit map lock poisoned".into()))?;
        *visits.entry(perception.me.position).or_default() += 1;
        Ok(decide(perception, &visits))
    }
}

fn decide(perception: &Perception, visits: &BTreeMap<Position, u32>) -> Action {
    let me = &perception.me;

    if let Some(target) = nearest_enemy(perception)
        && let Some((dx, dy)) = step_towards(perception, me.position, target.position, true)
    {
        return Action::move_by(me.id, dx, dy);
    }

    if perception.known_tiles.get(&me.position) == Some(&TileKind::StairsDown) {
        return Action::take_stairs(me.id);
    }

    if let Some(stairs) = perception
        .known_tiles
        .iter()
        .filter(|(_, kind)| **kind == TileKind::StairsDown)
        .map(|(position, _)| *position)
        .min_by_key(|position| position.manhattan(me.position))
        && let Some((dx, dy)) = step_towards(perception, me.position, stairs, false)
    {
        return Action::move_by(me.id, dx, dy);
    }

    STEPS
        .iter()
        .copied()
        .filter(|&(dx, dy)| is_free(perception, me.position.offset(dx, dy)))
        .min_by_key(|&(dx, dy)| {
            visits
                .get(&me.position.offset(dx, dy))
                .copied()
                .unwrap_or(0)
        })
        .map_or(Action::wait(me.id), |(dx, dy)| Action::move_by(me.id, dx, dy))
}

fn nearest_enemy(perception: &Perception) -> Option<&Entity> {
    let me = perception.me.position;
    perception
        .visible_entities
        .iter()
        .filter(|entity| entity.is_enemy())
        .min_by_key(|entity| (entity.position.manhattan(me), entity.id))
}

/// Greedy step: diagonal first, then the horizontal and vertical components.
fn step_towards(
    perception: &Perception,
    from: Position,
    to: Position,
    attack: bool,
) -> Option<(i32, i32)> {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    [(dx, dy), (dx, 0), (0, dy)]
        .into_iter()
        .filter(|&step| step != (0, 0))
        .find(|&(sx, sy)| {
            let next = from.offset(sx, sy);
            (attack && next == to) || is_free(perception, next)
        })
}

fn is_free(perception: &Perception, position: Position) -> bool {
    perception.is_walkable(position) && perception.entity_at(position).is_none()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use game_core::{Dungeon, EntityId, EntityStats, GameState, VisionProfile, perceive};

    use super::*;

    fn view(rows: &[&str], me: Position, enemies: &[Position]) -> Perception {
        let mut state = GameState::new(Dungeon::from_rows(rows), me, 0).with_entity(
            Entity::player(EntityId(1), me, EntityStats::new(20, 3))
                .with_vision(VisionProfile::circle(8)),
        );
        for (index, &position) in enemies.iter().enumerate() {
            state = state.with_entity(Entity::enemy(
                EntityId(10 + index as u32),
                position,
                EntityStats::new(5, 1),
            ));
        }
        perceive(&state, EntityId(1), &BTreeSet::new()).unwrap()
    }

    #[test]
    fn attacks_an_adjacent_enemy() {
        let perception = view(
            &["#####", "#...#", "#####"],
            Position::new(1, 1),
            &[Position::new(2, 1)],
        );
        assert_eq!(
            decide(&perception, &BTreeMap::new()),
            Action::move_by(EntityId(1), 1, 0)
        );
    }

    #[test]
    fn chases_the_nearest_enemy() {
        let perception = view(
            &["#########", "#.......#", "#########"],
            Position::new(4, 1),
            &[Position::new(1, 1), Position::new(6, 1)],
        );
        assert_eq!(
            decide(&perception, &BTreeMap::new()),
            Action::move_by(EntityId(1), 1, 0)
        );
    }

    #[test]
    fn takes_stairs_when_standing_on_them() {
        let perception = view(&["#####", "#.>.#", "#####"], Position::new(2, 1), &[]);
        assert_eq!(
            decide(&perception, &BTreeMap::new()),
            Action::take_stairs(EntityId(1))
        );
    }

    #[test]
    fn walks_towards_known_stairs() {
        let perception = view(&["######", "#...>#", "######"], Position::new(1, 1), &[]);
        assert_eq!(
            decide(&perception, &BTreeMap::new()),
            Action::move_by(EntityId(1), 1, 0)
        );
    }

    #[test]
    fn wanders_to_the_least_visited_tile() {
        let perception = view(&["#####", "#...#", "#####"], Position::new(2, 1), &[]);
        let mut visits = BTreeMap::new();
        visits.insert(Position::new(3, 1), 4);
        assert_eq!(
            decide(&perception, &visits),
            Action::move_by(EntityId(1), -1, 0)
        );
    }

    #[test]
    fn boxed_in_waits() {
        let perception = view(&["###", "#.#", "###"], Position::new(1, 1), &[]);
        assert_eq!(decide(&perception, &BTreeMap::new()), Action::wait(EntityId(1)));
    }
}

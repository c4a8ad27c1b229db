//! Enemy phase of a turn.
//!
//! Every live enemy acts once, in id order: attack the chosen player when
//! orthogonally adjacent, otherwise take one step toward it, trying the
//! horizontal axis before the vertical one. There is no pathfinding.

use super::board::Board;
use super::combat::melee;
use crate::action::GameEvent;
use crate::state::{Dungeon, Entity, Position};

pub(crate) fn run_enemy_phase(board: &mut Board, dungeon: &Dungeon, events: &mut Vec<GameEvent>) {
    let enemies = board.ids_where(|entity| entity.is_alive() && entity.is_enemy());
    for enemy_id in enemies {
        let Some(enemy) = board.live(enemy_id) else {
            continue;
        };
        let position = enemy.position;
        let Some((target_id, target_position)) =
            choose_target(board, position).map(|target| (target.id, target.position))
        else {
            break;
        };

        if position.manhattan(target_position) == 1 {
            melee(board, enemy_id, target_id, events);
            continue;
        }

        if let Some(to) = step_toward(board, dungeon, position, target_position)
            && let Some(from) = board.relocate(enemy_id, to)
        {
            events.push(GameEvent::Moved {
                entity_id: enemy_id,
                from,
                to,
            });
        }
    }
}

/// Nearest live player by Manhattan distance; ties go to the lowest id.
fn choose_target(board: &Board, from: Position) -> Option<&Entity> {
    board
        .iter()
        .filter(|entity| entity.is_alive() && entity.is_player())
        .min_by_key(|entity| (from.manhattan(entity.position), entity.id))
}

fn step_toward(board: &Board, dungeon: &Dungeon, from: Position, to: Position) -> Option<Position> {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    let horizontal = from.offset(dx, 0);
    if dx != 0 && board.is_free(dungeon, horizontal) {
        return Some(horizontal);
    }
    let vertical = from.offset(0, dy);
    if dy != 0 && board.is_free(dungeon, vertical) {
        return Some(vertical);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityStats;
    use crate::state::EntityId;

    fn open_room() -> Dungeon {
        Dungeon::from_rows(&["#######", "#.....#", "#.....#", "#.....#", "#######"])
    }

    #[test]
    fn prefers_horizontal_step() {
        let mut board = Board::new(vec![
            Entity::player(EntityId(1), Position::new(1, 1), EntityStats::new(10, 1)),
            Entity::enemy(EntityId(2), Position::new(4, 3), EntityStats::new(5, 1)),
        ]);
        let mut events = Vec::new();
        run_enemy_phase(&mut board, &open_room(), &mut events);
        assert_eq!(
            events,
            vec![GameEvent::Moved {
                entity_id: EntityId(2),
                from: Position::new(4, 3),
                to: Position::new(3, 3),
            }]
        );
    }

    #[test]
    fn falls_back_to_vertical_when_blocked() {
        let dungeon = Dungeon::from_rows(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        let mut board = Board::new(vec![
            Entity::player(EntityId(1), Position::new(1, 1), EntityStats::new(10, 1)),
            Entity::enemy(EntityId(2), Position::new(3, 2), EntityStats::new(5, 1)),
        ]);
        let mut events = Vec::new();
        run_enemy_phase(&mut board, &dungeon, &mut events);
        assert_eq!(board.get(EntityId(2)).unwrap().position, Position::new(3, 1));
    }

    #[test]
    fn stays_put_when_both_axes_blocked() {
        let dungeon = Dungeon::from_rows(&["#####", "#.#.#", "#####", "#...#", "#####"]);
        let mut board = Board::new(vec![
            Entity::player(EntityId(1), Position::new(1, 1), EntityStats::new(10, 1)),
            Entity::enemy(EntityId(2), Position::new(3, 3), EntityStats::new(5, 1)),
            Entity::enemy(EntityId(3), Position::new(2, 3), EntityStats::new(5, 1)),
        ]);
        let mut events = Vec::new();
        run_enemy_phase(&mut board, &dungeon, &mut events);
        // #2 acts first, boxed in by #3 (west) and a wall (north); #3 then steps west.
        assert_eq!(board.get(EntityId(2)).unwrap().position, Position::new(3, 3));
        assert_eq!(board.get(EntityId(3)).unwrap().position, Position::new(1, 3));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn adjacent_enemy_attacks_and_phase_stops_without_targets() {
        let mut board = Board::new(vec![
            Entity::player(EntityId(1), Position::new(2, 2), EntityStats::new(3, 1)),
            Entity::enemy(EntityId(2), Position::new(3, 2), EntityStats::new(5, 3)),
            Entity::enemy(EntityId(3), Position::new(5, 3), EntityStats::new(5, 3)),
        ]);
        let mut events = Vec::new();
        run_enemy_phase(&mut board, &open_room(), &mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::Attacked {
                    attacker_id: EntityId(2),
                    defender_id: EntityId(1),
                    damage: 3,
                    hp_before: 3,
                    hp_after: 0,
                },
                GameEvent::Killed {
                    entity_id: EntityId(1),
                    killer_id: EntityId(2),
                    position: Position::new(2, 2),
                },
            ]
        );
        assert_eq!(board.get(EntityId(3)).unwrap().position, Position::new(5, 3));
    }

    #[test]
    fn ties_break_toward_lowest_player_id() {
        let board = Board::new(vec![
            Entity::player(EntityId(4), Position::new(1, 2), EntityStats::new(5, 1)),
            Entity::player(EntityId(1), Position::new(5, 2), EntityStats::new(5, 1)),
        ]);
        let target = choose_target(&board, Position::new(3, 2)).unwrap();
        assert_eq!(target.id, EntityId(1));
    }
}

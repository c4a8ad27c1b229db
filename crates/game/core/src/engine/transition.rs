//! Level transitions through stairs.
//!
//! Taking the stairs swaps the active grid and entity set. The departing level's
//! grid (with its `seen` flags) is written back to its layout and its remaining
//! population is cached as a roster; the destination's roster is restored, or
//! produced by the injected spawner on the first visit. Every other live player
//! follows the actor and is placed as close to the arrival stair as possible.

use std::sync::Arc;

use super::board::Board;
use crate::action::{GameEvent, StairDirection};
use crate::dungeon::LevelLayout;
use crate::env::EnemySpawner;
use crate::state::{EntityId, GameState, Position, TileKind};

struct Destination {
    direction: StairDirection,
    from_level: usize,
    layout: LevelLayout,
    arrival: Position,
}

/// Works out where the actor's stairs lead, without changing anything.
fn plan(state: &GameState, board: &Board, actor_id: EntityId) -> Option<Destination> {
    let levels = state.levels.as_ref()?;
    let actor = board.live(actor_id)?;
    let from_level = levels.current;

    let (direction, to_level) = match state.dungeon.kind(actor.position)? {
        TileKind::StairsDown => (StairDirection::Down, from_level.checked_add(1)?),
        TileKind::StairsUp => (StairDirection::Up, from_level.checked_sub(1)?),
        TileKind::Floor | TileKind::Wall => return None,
    };
    let layout = levels.layouts.get(to_level)?;
    let arrival = match direction {
        StairDirection::Down => layout.stairs_up?,
        StairDirection::Up => layout.stairs_down?,
    };

    let blocked = levels.rosters.get(&to_level).is_some_and(|roster| {
        roster
            .iter()
            .any(|entity| entity.hp > 0 && entity.position == arrival)
    });
    if blocked {
        return None;
    }

    Some(Destination {
        direction,
        from_level,
        layout: layout.clone(),
        arrival,
    })
}

/// Moves the actor (and following players) to the adjacent level.
///
/// Returns `None`, leaving `state` and `board` untouched, when the actor is not
/// on stairs, the stairs lead nowhere, or the arrival stair is occupied.
pub(crate) fn apply_stairs(
    state: &mut GameState,
    board: &mut Board,
    actor_id: EntityId,
    spawner: &dyn EnemySpawner,
) -> Option<Vec<GameEvent>> {
    let destination = plan(state, board, actor_id)?;
    let Destination {
        direction,
        from_level,
        layout,
        arrival,
    } = destination;
    let to_level = layout.index;

    let travellers = board.take_where(|entity| entity.is_alive() && entity.is_player());
    let departing = std::mem::take(board).into_live();

    let cached = state.levels.as_mut().and_then(|levels| {
        if let Some(slot) = levels.layouts.get_mut(from_level) {
            slot.dungeon = Arc::clone(&state.dungeon);
        }
        levels.current = to_level;
        levels.rosters.remove(&to_level)
    });
    let arrivals = match cached {
        Some(roster) => roster,
        None => spawner.spawn(to_level, &layout.enemy_spawns, state.ids_mut()),
    };
    state.dungeon = Arc::clone(&layout.dungeon);
    state.spawn = layout.spawn;
    *board = Board::new(arrivals);

    let mut events = Vec::with_capacity(travellers.len());
    let mut left_behind = Vec::new();
    // The actor is placed first so it claims the stair tile itself.
    let (actor, followers): (Vec<_>, Vec<_>) = travellers
        .into_iter()
        .partition(|entity| entity.id == actor_id);

    for mut traveller in actor.into_iter().chain(followers) {
        let Some(to) = board.nearest_free(&state.dungeon, arrival) else {
            left_behind.push(traveller);
            continue;
        };
        events.push(GameEvent::LevelTransition {
            entity_id: traveller.id,
            direction,
            from_level,
            to_level,
            from: traveller.position,
            to,
        });
        traveller.position = to;
        board.insert(traveller);
    }

    if let Some(levels) = state.levels.as_mut() {
        let mut roster = departing;
        roster.extend(left_behind);
        roster.sort_by_key(|entity| entity.id);
        levels.rosters.insert(from_level, roster);
    }
    Some(events)
}

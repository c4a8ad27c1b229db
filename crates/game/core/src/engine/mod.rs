//! Turn resolution.
//!
//! [`TurnResolver`] is the single reducer for [`GameState`]: given a state and one
//! action it returns the successor state and the events of that turn, without
//! touching the input. A turn always runs the same pipeline, whether or not the
//! submitted action did anything:
//!
//! 1. player action (move / attack, wait, join, take stairs)
//! 2. enemy phase, in id order
//! 3. cleanup of entities killed this turn
//! 4. `turn += 1`, seed advanced by one draw
mod board;
mod combat;
mod join;
mod npc;
mod replay;
mod transition;


pub use replay::TurnRecord;

use board::Board;

use crate::action::{Action, GameEvent, is_step};
use crate::env::{EnemySpawner, StatSpawner, advance_seed};
use crate::state::{EntityId, GameState};

/// Deterministic turn reducer.
///
/// The spawner is consulted only when stairs lead to a level that has never
/// been populated.
#[derive(Clone, Copy)]
pub struct TurnResolver<'a> {
    spawner: &'a dyn EnemySpawner,
}

impl<'a> TurnResolver<'a> {
    pub fn new(spawner: &'a dyn EnemySpawner) -> Self {
        Self { spawner }
    }

    /// Resolves one turn.
    ///
    /// Illegal actions (walls, occupied cells, unknown or dead actors, stairs that
    /// lead nowhere) resolve as no-ops; the enemy phase, turn increment and seed
    /// advance still happen.
    pub fn resolve_turn(&self, state: &GameState, action: &Action) -> (GameState, Vec<GameEvent>) {
        let mut next = state.clone();
        let mut board = Board::new(std::mem::take(&mut next.entities));
        let mut events = Vec::new();

        match *action {
            Action::Move { actor_id, dx, dy } => {
                apply_move(&next, &mut board, actor_id, dx, dy, &mut events);
            }
            Action::Wait { actor_id } => {
                if board.live(actor_id).is_some() {
                    events.push(GameEvent::Wait {
                        entity_id: actor_id,
                    });
                }
            }
            Action::Join { actor_id } => {
                events.extend(join::apply_join(&mut next, &mut board, actor_id));
            }
            Action::TakeStairs { actor_id } => {
                if let Some(moved) =
                    transition::apply_stairs(&mut next, &mut board, actor_id, self.spawner)
                {
                    events.extend(moved);
                }
            }
        }

        npc::run_enemy_phase(&mut board, &next.dungeon, &mut events);

        next.entities = board.into_live();
        next.turn = next.turn.saturating_add(1);
        next.seed = advance_seed(next.seed);
        (next, events)
    }

    /// Applies a stairs transition on its own, outside the turn pipeline.
    ///
    /// An invalid transition returns the input unchanged with no events. Turn
    /// and seed are never advanced here.
    pub fn transition_level(
        &self,
        state: &GameState,
        actor_id: EntityId,
    ) -> (GameState, Vec<GameEvent>) {
        let mut next = state.clone();
        let mut board = Board::new(std::mem::take(&mut next.entities));
        match transition::apply_stairs(&mut next, &mut board, actor_id, self.spawner) {
            Some(events) => {
                next.entities = board.into_live();
                (next, events)
            }
            None => (state.clone(), Vec::new()),
        }
    }
}

/// Resolves one turn with a [`StatSpawner`] built from the state's own rules.
pub fn resolve_turn(state: &GameState, action: &Action) -> (GameState, Vec<GameEvent>) {
    let spawner = StatSpawner::new(state.rules.enemy);
    TurnResolver::new(&spawner).resolve_turn(state, action)
}

fn apply_move(
    state: &GameState,
    board: &mut Board,
    actor_id: EntityId,
    dx: i32,
    dy: i32,
    events: &mut Vec<GameEvent>,
) {
    if !is_step(dx, dy) {
        return;
    }
    let Some(actor) = board.live(actor_id) else {
        return;
    };
    let kind = actor.kind;
    let target = actor.position.offset(dx, dy);

    if let Some(occupant) = board.occupant(target) {
        if kind.opposes(occupant.kind) {
            let defender_id = occupant.id;
            combat::melee(board, actor_id, defender_id, events);
        }
        return;
    }

    if board.is_free(&state.dungeon, target)
        && let Some(from) = board.relocate(actor_id, target)
    {
        events.push(GameEvent::Moved {
            entity_id: actor_id,
            from,
            to: target,
        });
    }
}

use super::TurnResolver;
use crate::action::{Action, GameEvent};
use crate::state::GameState;

/// One resolved turn of a replay.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    /// Turn number the action was resolved on.
    pub turn: u64,
    pub action: Action,
    pub events: Vec<GameEvent>,
}

impl TurnResolver<'_> {
    /// Folds `actions` over `initial`, one turn per action.
    ///
    /// Identical inputs always produce an identical final state and identical
    /// records.
    pub fn replay<'a>(
        &self,
        initial: &GameState,
        actions: impl IntoIterator<Item = &'a Action>,
    ) -> (GameState, Vec<TurnRecord>) {
        let mut state = initial.clone();
        let mut records = Vec::new();
        for action in actions {
            let turn = state.turn;
            let (next, events) = self.resolve_turn(&state, action);
            records.push(TurnRecord {
                turn,
                action: action.clone(),
                events,
            });
            state = next;
        }
        (state, records)
    }
}

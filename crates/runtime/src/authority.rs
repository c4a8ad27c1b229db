//! The authoritative session: one [`GameState`], its participants, and the
//! records needed to rewind it.
//!
//! The authority is synchronous and single-writer. The session worker owns it
//! and feeds it one request at a time, so every resolution is atomic with
//! respect to every other.

use std::collections::BTreeSet;
use std::sync::Arc;

use game_core::{Action, EnemySpawner, EntityId, GameEvent, GameState, TurnResolver};
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::repository::{ActionLogEntry, ActionRepository, RepositoryError, StateRepository};

/// Outcome of a successful [`Authority::connect`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub player_id: EntityId,
    /// For the new participant: its id and the state after it joined.
    pub welcome: ServerMessage,
    /// For everyone else: the join turn.
    pub delta: ServerMessage,
}

pub struct Authority {
    state: GameState,
    participants: BTreeSet<EntityId>,
    spawner: Arc<dyn EnemySpawner>,
    actions: Arc<dyn ActionRepository>,
    states: Arc<dyn StateRepository>,
    checkpoint_interval: u64,
}

impl Authority {
    /// Takes ownership of `state` and stores it as the first checkpoint.
    pub fn new(
        state: GameState,
        spawner: Arc<dyn EnemySpawner>,
        actions: Arc<dyn ActionRepository>,
        states: Arc<dyn StateRepository>,
        checkpoint_interval: u64,
    ) -> Result<Self> {
        states.save(state.turn, &state)?;
        info!(
            target: "runtime::authority",
            turn = state.turn,
            level = state.current_level(),
            entities = state.entities.len(),
            "session started"
        );
        Ok(Self {
            state,
            participants: BTreeSet::new(),
            spawner,
            actions,
            states,
            checkpoint_interval: checkpoint_interval.max(1),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn participants(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.participants.iter().copied()
    }

    pub fn is_participant(&self, player_id: EntityId) -> bool {
        self.participants.contains(&player_id)
    }

    /// Admits a new participant by resolving a `join` turn for a fresh id.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NoFreeTile`] if the level has no room for another
    /// player. Nothing is committed in that case.
    pub fn connect(&mut self) -> Result<Connection> {
        let player_id = self.state.ids().peek();
        let action = Action::join(player_id);
        let (next, events) = self.resolve(&action);
        if next.entity(player_id).is_none() {
            warn!(target: "runtime::authority", player = %player_id, "no free tile for player");
            return Err(RuntimeError::NoFreeTile(player_id));
        }
        let delta = self.apply(action, next, events)?;

        self.participants.insert(player_id);
        info!(
            target: "runtime::authority",
            player = %player_id,
            participants = self.participants.len(),
            "participant joined"
        );
        Ok(Connection {
            player_id,
            welcome: ServerMessage::Welcome {
                player_id,
                initial_state: Box::new(self.state.clone()),
            },
            delta,
        })
    }

    /// Forgets a participant. Its entity stays in the world.
    pub fn disconnect(&mut self, player_id: EntityId) -> bool {
        let removed = self.participants.remove(&player_id);
        if removed {
            info!(target: "runtime::authority", player = %player_id, "participant left");
        }
        removed
    }

    /// Answers one client message with a delta, or an error if the request is
    /// rejected.
    pub fn handle(&mut self, message: ClientMessage) -> Result<ServerMessage> {
        match message {
            ClientMessage::Action { player_id, action } => {
                if !self.is_participant(player_id) {
                    warn!(target: "runtime::authority", player = %player_id, "unknown participant");
                    return Ok(ServerMessage::error(format!(
                        "unknown participant {player_id}"
                    )));
                }
                if action.actor_id() != player_id {
                    warn!(
                        target: "runtime::authority",
                        player = %player_id,
                        actor = %action.actor_id(),
                        "participant acted for another entity"
                    );
                    return Ok(ServerMessage::error(format!(
                        "participant {player_id} cannot act for {}",
                        action.actor_id()
                    )));
                }
                self.commit(action)
            }
        }
    }

    /// Resolves `action` as the next turn, logs it and checkpoints if due.
    ///
    /// Nothing changes unless the log append succeeds. Once it has, the turn is
    /// committed and its delta is returned even if the checkpoint cannot be
    /// stored; rollback then starts from an earlier checkpoint and replays more
    /// of the log.
    fn commit(&mut self, action: Action) -> Result<ServerMessage> {
        let (next, events) = self.resolve(&action);
        self.apply(action, next, events)
    }

    fn resolve(&self, action: &Action) -> (GameState, Vec<GameEvent>) {
        TurnResolver::new(self.spawner.as_ref()).resolve_turn(&self.state, action)
    }

    fn apply(
        &mut self,
        action: Action,
        next: GameState,
        events: Vec<GameEvent>,
    ) -> Result<ServerMessage> {
        let turn = self.state.turn;
        self.actions
            .append(&ActionLogEntry::new(turn, action.clone()))?;
        self.state = next;

        if self.state.turn % self.checkpoint_interval == 0 {
            match self.states.save(self.state.turn, &self.state) {
                Ok(()) => debug!(
                    target: "runtime::authority",
                    turn = self.state.turn,
                    root = %state_root_hex(&self.state),
                    "checkpoint stored"
                ),
                Err(err) => warn!(
                    target: "runtime::authority",
                    turn = self.state.turn,
                    error = %err,
                    "checkpoint not stored"
                ),
            }
        }

        if is_no_op(&action, &events) {
            debug!(
                target: "runtime::authority",
                turn,
                action = action.as_str(),
                actor = %action.actor_id(),
                "action was a no-op"
            );
        }
        debug!(
            target: "runtime::authority",
            turn,
            action = action.as_str(),
            events = events.len(),
            "turn committed"
        );
        Ok(ServerMessage::Delta {
            turn,
            events,
            action,
        })
    }

    /// Rewinds the session so that `turn` is the next turn to resolve.
    ///
    /// Restores the newest checkpoint at or before `turn`, replays the logged
    /// actions in between, then discards every later action and checkpoint.
    /// Participants whose entity no longer exists are dropped.
    pub fn rollback(&mut self, turn: u64) -> Result<()> {
        let current = self.state.turn;
        if turn > current {
            return Err(RuntimeError::RollbackAhead {
                requested: turn,
                current,
            });
        }

        let (base_turn, base) = self
            .states
            .latest_at_or_before(turn)?
            .ok_or(RuntimeError::NoCheckpoint(turn))?;
        let entries = self.actions.entries_between(base_turn, turn)?;
        let (restored, _) = TurnResolver::new(self.spawner.as_ref())
            .replay(&base, entries.iter().map(|entry| &entry.action));
        if restored.turn != turn {
            return Err(RepositoryError::CorruptedData(format!(
                "replay from checkpoint {base_turn} reached turn {} instead of {turn}",
                restored.turn
            ))
            .into());
        }

        self.actions.truncate_from(turn)?;
        self.states.delete_after(turn)?;
        self.state = restored;
        self.participants
            .retain(|player_id| self.state.contains_entity(*player_id));

        info!(
            target: "runtime::authority",
            from = current,
            to = turn,
            checkpoint = base_turn,
            replayed = entries.len(),
            root = %state_root_hex(&self.state),
            "rolled back"
        );
        Ok(())
    }
}

/// Hex state root for log lines.
pub(crate) fn state_root_hex(state: &GameState) -> String {
    state
        .state_root()
        .map(hex::encode)
        .unwrap_or_else(|err| format!("<unencodable: {err}>"))
}

fn is_no_op(action: &Action, events: &[GameEvent]) -> bool {
    let actor = action.actor_id();
    !events.iter().any(|event| match event {
        GameEvent::Moved { entity_id, .. }
        | GameEvent::Wait { entity_id }
        | GameEvent::LevelTransition { entity_id, .. }
        | GameEvent::Joined { entity_id, .. } => *entity_id == actor,
        GameEvent::Attacked { attacker_id, .. } => *attacker_id == actor,
        GameEvent::Killed { .. } => false,
    })
}

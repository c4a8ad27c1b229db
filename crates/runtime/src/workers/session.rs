//! Session worker that owns the [`Authority`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them one at a
//! time, and publishes what changed to the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use game_core::{EntityId, GameState};

use crate::api::Result;
use crate::authority::{Authority, Connection};
use crate::events::{Event, EventBus, SessionEvent, TurnEvent};
use crate::protocol::{ClientMessage, ServerMessage};

/// Commands that can be sent to the session worker
pub enum Command {
    Connect {
        reply: oneshot::Sender<Result<Connection>>,
    },
    Disconnect {
        player_id: EntityId,
        reply: oneshot::Sender<bool>,
    },
    Submit {
        message: ClientMessage,
        reply: oneshot::Sender<Result<ServerMessage>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    Rollback {
        turn: u64,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Background task that serializes every request against one session.
pub struct SessionWorker {
    authority: Authority,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    pub fn new(
        authority: Authority,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            authority,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Returns once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        debug!(
            target: "runtime::worker",
            turn = self.authority.state().turn,
            "command channel closed, session worker stopping"
        );
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Connect { reply } => {
                let result = self.authority.connect();
                if let Ok(connection) = &result {
                    self.publish_delta(&connection.delta);
                    self.event_bus.publish(Event::Session(SessionEvent::Joined {
                        player_id: connection.player_id,
                        turn: self.authority.state().turn,
                    }));
                }
                let _ = reply.send(result);
            }
            Command::Disconnect { player_id, reply } => {
                let removed = self.authority.disconnect(player_id);
                if removed {
                    self.event_bus
                        .publish(Event::Session(SessionEvent::Left { player_id }));
                }
                let _ = reply.send(removed);
            }
            Command::Submit { message, reply } => {
                let result = self.authority.handle(message);
                if let Ok(delta) = &result {
                    self.publish_delta(delta);
                }
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.authority.state().clone());
            }
            Command::Rollback { turn, reply } => {
                let result = self.authority.rollback(turn);
                if result.is_ok() {
                    self.event_bus
                        .publish(Event::Session(SessionEvent::RolledBack { turn }));
                }
                let _ = reply.send(result);
            }
        }
    }

    fn publish_delta(&self, message: &ServerMessage) {
        if let ServerMessage::Delta {
            turn,
            events,
            action,
        } = message
        {
            self.event_bus.publish(Event::Turn(TurnEvent {
                turn: *turn,
                action: action.clone(),
                events: events.clone(),
            }));
        }
    }
}

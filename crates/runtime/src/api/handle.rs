//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! joining, acting, rewinding, or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{EntityId, GameState};

use super::errors::{Result, RuntimeError};
use crate::authority::Connection;
use crate::events::{Event, EventBus, Topic};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Join the session as a new participant.
    pub async fn connect(&self) -> Result<Connection> {
        self.request(|reply| Command::Connect { reply }).await?
    }

    /// Leave the session. Returns false if `player_id` was not a participant.
    pub async fn disconnect(&self, player_id: EntityId) -> Result<bool> {
        self.request(|reply| Command::Disconnect { player_id, reply })
            .await
    }

    /// Submit one client message and wait for the authority's answer.
    pub async fn submit(&self, message: ClientMessage) -> Result<ServerMessage> {
        self.request(|reply| Command::Submit { message, reply })
            .await?
    }

    /// Wire-level variant of [`submit`](Self::submit).
    ///
    /// Malformed input is answered with an `error` message rather than a
    /// Rust error, exactly like any other rejected request.
    pub async fn submit_json(&self, raw: &str) -> Result<String> {
        let reply = match ClientMessage::decode(raw) {
            Ok(message) => self.submit(message).await?,
            Err(err) => {
                tracing::warn!(target: "runtime::handle", error = %err, "malformed client message");
                ServerMessage::error(format!("malformed message: {err}"))
            }
        };
        reply.encode().map_err(RuntimeError::Encode)
    }

    /// Snapshot of the current state.
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Rewind so that `turn` is the next turn to resolve.
    pub async fn rollback(&self, turn: u64) -> Result<()> {
        self.request(|reply| Command::Rollback { turn, reply })
            .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - joins, leaves and rollbacks
    /// - `Topic::Turn` - every committed turn
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}

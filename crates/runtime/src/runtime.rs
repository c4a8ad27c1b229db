//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the session.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use game_core::{EnemySpawner, EntityId, GameState, Position, StatSpawner, perceive};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::authority::Authority;
use crate::events::{Event, EventBus, Topic};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::repository::{ActionRepository, InMemoryActionLog, InMemoryStateRepo, StateRepository};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// A checkpoint is stored whenever the turn counter is a multiple of this.
    pub checkpoint_interval: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            checkpoint_interval: 10,
        }
    }
}

/// A participant driven by an [`ActionProvider`] instead of a remote client.
struct Bot {
    player_id: EntityId,
    provider: Box<dyn ActionProvider>,
    seen: BTreeSet<Position>,
}

/// Main runtime that hosts one session.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients; the runtime
/// itself additionally drives any attached bots.
pub struct Runtime {
    handle: RuntimeHandle,
    bots: Vec<Bot>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Connects a new participant whose actions come from `provider`.
    pub async fn attach_bot(
        &mut self,
        provider: impl ActionProvider + 'static,
    ) -> Result<EntityId> {
        let connection = self.handle.connect().await?;
        self.bots.push(Bot {
            player_id: connection.player_id,
            provider: Box::new(provider),
            seen: BTreeSet::new(),
        });
        Ok(connection.player_id)
    }

    /// Lets every attached bot act once, in attachment order.
    ///
    /// Bots whose entity is gone are skipped. Returns the authority's replies.
    pub async fn step(&mut self) -> Result<Vec<ServerMessage>> {
        let mut replies = Vec::with_capacity(self.bots.len());
        for bot in &mut self.bots {
            let state = self.handle.query_state().await?;
            let Some(perception) = perceive(&state, bot.player_id, &bot.seen) else {
                continue;
            };
            bot.seen.clone_from(&perception.remembered);

            let action = bot.provider.provide_action(&perception).await?;
            replies.push(
                self.handle
                    .submit(ClientMessage::action(bot.player_id, action))
                    .await?,
            );
        }
        Ok(replies)
    }

    /// Steps until `max_steps` is reached or no bot can act any more.
    ///
    /// Returns the number of steps in which at least one bot acted.
    pub async fn run(&mut self, max_steps: u64) -> Result<u64> {
        let mut played = 0;
        while played < max_steps {
            if self.step().await?.is_empty() {
                break;
            }
            played += 1;
        }
        Ok(played)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        drop(self.bots);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    spawner: Option<Arc<dyn EnemySpawner>>,
    actions: Option<Arc<dyn ActionRepository>>,
    states: Option<Arc<dyn StateRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            spawner: None,
            actions: None,
            states: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Spawner used when stairs reach an unpopulated level.
    ///
    /// Defaults to a [`StatSpawner`] built from the state's rules. Must be the
    /// same spawner the initial state was generated with, or later levels will
    /// not match a replay.
    pub fn spawner(mut self, spawner: impl EnemySpawner + 'static) -> Self {
        self.spawner = Some(Arc::new(spawner));
        self
    }

    /// Where committed actions are logged. Defaults to memory.
    pub fn action_repository(mut self, repository: impl ActionRepository + 'static) -> Self {
        self.actions = Some(Arc::new(repository));
        self
    }

    /// Where checkpoints are stored. Defaults to memory.
    pub fn state_repository(mut self, repository: impl StateRepository + 'static) -> Self {
        self.states = Some(Arc::new(repository));
        self
    }

    /// Build the runtime and spawn the session worker.
    pub async fn build(self) -> Result<Runtime> {
        let state = self.state.ok_or(RuntimeError::MissingInitialState)?;
        let spawner: Arc<dyn EnemySpawner> = match self.spawner {
            Some(spawner) => spawner,
            None => Arc::new(StatSpawner::new(state.rules.enemy)),
        };
        let actions: Arc<dyn ActionRepository> = match self.actions {
            Some(actions) => actions,
            None => Arc::new(InMemoryActionLog::new()),
        };
        let states: Arc<dyn StateRepository> = match self.states {
            Some(states) => states,
            None => Arc::new(InMemoryStateRepo::new()),
        };

        let authority = Authority::new(
            state,
            spawner,
            actions,
            states,
            self.config.checkpoint_interval,
        )?;

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SessionWorker::new(authority, command_rx, event_bus.clone());
        let worker_handle = tokio::spawn(worker.run());

        tracing::debug!(target: "runtime", config = ?self.config, "runtime built");

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            bots: Vec::new(),
            worker_handle,
        })
    }
}

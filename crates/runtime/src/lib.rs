//! Session authority for the deterministic dungeon simulation.
//!
//! This crate wraps a single [`game_core::GameState`] in an authority that
//! admits participants, serializes their actions through one worker task,
//! logs every committed action, checkpoints periodically, and can rewind.
//! Consumers embed [`Runtime`] and talk to it through [`RuntimeHandle`] or the
//! JSON messages in [`protocol`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`authority`] holds the synchronous session rules
//! - [`protocol`] defines the wire messages
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] provides the action log and checkpoint stores
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod authority;
pub mod events;
pub mod protocol;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, Result, RuntimeError, RuntimeHandle, ScriptedActionProvider,
    WaitActionProvider,
};
pub use authority::{Authority, Connection};
pub use events::{Event, EventBus, SessionEvent, Topic, TurnEvent};
pub use protocol::{ClientMessage, ServerMessage};
pub use repository::{
    ActionLogEntry, ActionRepository, FileActionLog, FileStateRepository, InMemoryActionLog,
    InMemoryStateRepo, RepositoryError, StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

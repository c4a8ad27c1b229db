//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and action providers
//! so clients can bubble them up with consistent context. Requests the
//! authority merely rejects are not errors; they come back as
//! [`crate::ServerMessage::Error`].
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{EntityId, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires an initial game state before building")]
    MissingInitialState,

    #[error("no free tile to place player {0}")]
    NoFreeTile(EntityId),

    #[error("cannot roll back to turn {requested}: the session is at turn {current}")]
    RollbackAhead { requested: u64, current: u64 },

    #[error("no checkpoint at or before turn {0}")]
    NoCheckpoint(u64),

    #[error("action provider failed: {0}")]
    Provider(String),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to encode message")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoFreeTile(_) | Self::RollbackAhead { .. } | Self::NoCheckpoint(_) => {
                ErrorSeverity::Validation
            }
            Self::Provider(_) => ErrorSeverity::Recoverable,
            Self::MissingInitialState
            | Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::Encode(_)
            | Self::Repository(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInitialState => "RUNTIME_MISSING_INITIAL_STATE",
            Self::NoFreeTile(_) => "RUNTIME_NO_FREE_TILE",
            Self::RollbackAhead { .. } => "RUNTIME_ROLLBACK_AHEAD",
            Self::NoCheckpoint(_) => "RUNTIME_NO_CHECKPOINT",
            Self::Provider(_) => "RUNTIME_PROVIDER",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Encode(_) => "RUNTIME_ENCODE",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}

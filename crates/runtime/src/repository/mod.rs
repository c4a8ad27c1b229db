//! Persistence for the action log and state checkpoints.
//!
//! Both contracts have an in-memory implementation for tests and short-lived
//! sessions and a file-backed one for sessions that must survive a restart.
mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileActionLog, FileStateRepository};
pub use memory::{InMemoryActionLog, InMemoryStateRepo};
pub use traits::{ActionRepository, StateRepository};
pub use types::ActionLogEntry;

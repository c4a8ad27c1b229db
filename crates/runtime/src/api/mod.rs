//! Types downstream clients interact with.
mod errors;
mod handle;
mod providers;

pub use errors::{RepositoryError, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{ActionProvider, ScriptedActionProvider, WaitActionProvider};

//! Topic-based event bus for runtime events.
//!
//! Observers subscribe to the topics they care about; the session worker
//! publishes after every committed change.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{SessionEvent, TurnEvent};

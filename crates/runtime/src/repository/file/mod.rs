mod action;
mod state;

pub use action::FileActionLog;
pub use state::FileStateRepository;

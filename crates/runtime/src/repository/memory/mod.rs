mod action;
mod state;

pub use action::InMemoryActionLog;
pub use state::InMemoryStateRepo;

#[cfg(test)]
pub(crate) fn sample_state() -> game_core::GameState {
    use game_core::{GameConfig, GameState, StatSpawner};

    GameState::new_single_level(&GameConfig::default(), 7, 30, 30, &StatSpawner::default())
        .expect("30x30 level generates")
}

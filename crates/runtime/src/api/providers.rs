//! Asynchronous abstraction for sourcing participant intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a session can
//! run with human input, scripted fixtures, or automated players.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use game_core::{Action, Perception};

use super::errors::{Result, RuntimeError};

/// Decides the next action of one participant from what it can perceive.
///
/// Providers only ever see a [`Perception`]: tiles out of sight and entities
/// standing on them are not available.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_action(&self, perception: &Perception) -> Result<Action>;
}

/// A simple action provider that always returns Wait action.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

#[async_trait]
impl ActionProvider for WaitActionProvider {
    async fn provide_action(&self, perception: &Perception) -> Result<Action> {
        Ok(Action::wait(perception.me.id))
    }
}

/// Plays back a fixed list of actions, then fails.
///
/// Actions are re-addressed to the perceiving entity, so fixtures can be
/// written before player ids are known.
pub struct ScriptedActionProvider {
    script: Mutex<VecDeque<Action>>,
}

impl ScriptedActionProvider {
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&self, perception: &Perception) -> Result<Action> {
        let next = self
            .script
            .lock()
            .map_err(|_| RuntimeError::Provider("script lock poisoned".into()))?
            .pop_front()
            .ok_or_else(|| RuntimeError::Provider("script exhausted".into()))?;
        let actor_id = perception.me.id;
        Ok(match next {
            Action::Move { dx, dy, .. } => Action::move_by(actor_id, dx, dy),
            Action::Wait { .. } => Action::wait(actor_id),
            Action::Join { .. } => Action::join(actor_id),
            Action::TakeStairs { .. } => Action::take_stairs(actor_id),
        })
    }
}

//! Session setup: content, initial state and runtime wiring.
use anyhow::{Result, bail};
use game_content::{ContentFactory, TemplateSpawner, has_errors};
use game_core::{EnemySpawner, Entity, GameConfig, GameState, IdAllocator, Position, StatSpawner};
use runtime::{FileActionLog, FileStateRepository, Runtime, RuntimeConfig};
use tracing::{error, info, warn};

use crate::config::CliConfig;

/// Either the built-in stat spawner or one backed by content templates.
#[derive(Clone, Debug)]
pub enum SessionSpawner {
    Stats(StatSpawner),
    Templates(TemplateSpawner),
}

impl EnemySpawner for SessionSpawner {
    fn spawn(&self, level: usize, positions: &[Position], ids: &mut IdAllocator) -> Vec<Entity> {
        match self {
            Self::Stats(spawner) => spawner.spawn(level, positions, ids),
            Self::Templates(spawner) => spawner.spawn(level, positions, ids),
        }
    }
}

/// Everything needed to start a session.
pub struct Setup {
    pub game_config: GameConfig,
    pub spawner: SessionSpawner,
    pub width: u32,
    pub height: u32,
}

impl Setup {
    /// Resolves content (if any) into generator settings and a spawner.
    pub fn load(config: &CliConfig) -> Result<Self> {
        let Some(dir) = &config.content_dir else {
            let game_config = GameConfig::default();
            return Ok(Self {
                spawner: SessionSpawner::Stats(StatSpawner::new(game_config.enemy)),
                game_config,
                width: config.width,
                height: config.height,
            });
        };

        let factory = ContentFactory::new(dir);
        let mut game_config = factory.load_config()?;
        let registry = factory.load_registry()?;

        let findings = factory.validate(&registry)?;
        for finding in &findings {
            if finding.is_error() {
                error!(target: "cli::content", "{finding}");
            } else {
                warn!(target: "cli::content", "{finding}");
            }
        }
        if has_errors(&findings) {
            bail!("content in {} failed validation", dir.display());
        }

        let (spawner, width, height) = match &config.dungeon {
            Some(name) => {
                let definition = factory.load_dungeon(name)?;
                game_config.generator = definition.generator;
                let spawner = registry.spawner(definition.enemy_templates.as_slice())?;
                (
                    SessionSpawner::Templates(spawner),
                    definition.width,
                    definition.height,
                )
            }
            None => {
                let keys = registry.enemy_keys();
                let spawner = if keys.is_empty() {
                    SessionSpawner::Stats(StatSpawner::new(game_config.enemy))
                } else {
                    SessionSpawner::Templates(registry.spawner(keys.as_slice())?)
                };
                (spawner, config.width, config.height)
            }
        };

        info!(
            target: "cli::content",
            dir = %dir.display(),
            packs = registry.packs().count(),
            dungeon = config.dungeon.as_deref().unwrap_or("-"),
            "content loaded"
        );
        Ok(Self {
            game_config,
            spawner,
            width,
            height,
        })
    }

    /// Generates the turn-1 state for `config.seed`.
    pub fn initial_state(&mut self, config: &CliConfig) -> Result<GameState> {
        let state = if config.levels > 1 {
            self.game_config.generator.levels = config.levels;
            GameState::new_multi_level(
                &self.game_config,
                config.seed,
                self.width,
                self.height,
                &self.spawner,
            )?
        } else {
            GameState::new_single_level(
                &self.game_config,
                config.seed,
                self.width,
                self.height,
                &self.spawner,
            )?
        };
        info!(
            target: "cli::session",
            seed = config.seed,
            width = self.width,
            height = self.height,
            levels = state.max_levels(),
            enemies = state.enemies().count(),
            "initial state generated"
        );
        Ok(state)
    }

    /// Builds the runtime, persisting to `config.save_dir` when set.
    pub async fn runtime(&self, config: &CliConfig, state: GameState) -> Result<Runtime> {
        let mut runtime_config = RuntimeConfig::default();
        if let Some(interval) = config.checkpoint_interval {
            runtime_config.checkpoint_interval = interval;
        }

        let mut builder = Runtime::builder()
            .config(runtime_config)
            .initial_state(state)
            .spawner(self.spawner.clone());
        if let Some(dir) = &config.save_dir {
            builder = builder
                .action_repository(FileActionLog::new(dir.join("actions.jsonl"))?)
                .state_repository(FileStateRepository::new(dir.join("states"))?);
            info!(target: "cli::session", dir = %dir.display(), "persisting session");
        }
        Ok(builder.build().await?)
    }
}

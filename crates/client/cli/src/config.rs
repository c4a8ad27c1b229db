//! Driver configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Configuration for one headless session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub seed: u32,
    pub width: u32,
    pub height: u32,
    /// One level plays a single-level session; more enables stairs.
    pub levels: u32,
    /// Upper bound on bot steps.
    pub turns: u64,
    /// Data directory with `config.toml`, `packs/`, `dungeons/`.
    pub content_dir: Option<PathBuf>,
    /// Dungeon definition to play, by file stem under `dungeons/`.
    pub dungeon: Option<String>,
    /// Where the action log and checkpoints go; in memory if unset.
    pub save_dir: Option<PathBuf>,
    /// Mirror logs into `dungeon.log` inside this directory.
    pub log_dir: Option<PathBuf>,
    pub checkpoint_interval: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            width: 50,
            height: 50,
            levels: 1,
            turns: 100,
            content_dir: None,
            dungeon: None,
            save_dir: None,
            log_dir: None,
            checkpoint_interval: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - Session seed (default: 12345)
    /// - `DUNGEON_WIDTH` / `DUNGEON_HEIGHT` - Level size (default: 50x50)
    /// - `DUNGEON_LEVELS` - Number of levels (default: 1)
    /// - `DUNGEON_TURNS` - Maximum bot steps (default: 100)
    /// - `DUNGEON_CONTENT_DIR` - Content data directory (default: none, built-in stats)
    /// - `DUNGEON_NAME` - Dungeon definition to play (requires a content directory)
    /// - `DUNGEON_SAVE_DIR` - Persist the action log and checkpoints here
    /// - `DUNGEON_LOG_DIR` - Also write logs to a file here
    /// - `CHECKPOINT_INTERVAL` - Turns between checkpoints (default: 10)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u32>("DUNGEON_SEED") {
            config.seed = seed;
        }
        if let Some(width) = read_env::<u32>("DUNGEON_WIDTH") {
            config.width = width;
        }
        if let Some(height) = read_env::<u32>("DUNGEON_HEIGHT") {
            config.height = height;
        }
        if let Some(levels) = read_env::<u32>("DUNGEON_LEVELS") {
            config.levels = levels.max(1);
        }
        if let Some(turns) = read_env::<u64>("DUNGEON_TURNS") {
            config.turns = turns;
        }

        config.content_dir = env::var("DUNGEON_CONTENT_DIR").ok().map(PathBuf::from);
        config.dungeon = env::var("DUNGEON_NAME").ok();
        config.save_dir = env::var("DUNGEON_SAVE_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("DUNGEON_LOG_DIR").ok().map(PathBuf::from);
        config.checkpoint_interval = read_env::<u64>("CHECKPOINT_INTERVAL");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

//! Headless driver: generates a dungeon, lets a bot play it, prints the outcome.
mod bot;
mod config;
mod session;

use anyhow::Result;
use game_core::GameEvent;
use runtime::{Event, ServerMessage, Topic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use bot::ChaseBot;
use config::CliConfig;
use session::Setup;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let mut setup = Setup::load(&config)?;
    let state = setup.initial_state(&config)?;
    let mut runtime = setup.runtime(&config, state).await?;

    let mut turns = runtime.subscribe(Topic::Turn);
    let turn_logger = tokio::spawn(async move {
        use tokio::sync::broadcast::error::RecvError;
        loop {
            match turns.recv().await {
                Ok(Event::Turn(turn)) => tracing::debug!(
                    target: "cli::turns",
                    turn = turn.turn,
                    action = turn.action.as_str(),
                    events = ?turn.events,
                    "turn"
                ),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(target: "cli::turns", skipped, "turn log lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let player = runtime.attach_bot(ChaseBot::new()).await?;
    let handle = runtime.handle();

    let mut steps = 0;
    let mut kills = 0;
    let mut reached_exit = false;
    while steps < config.turns {
        let replies = runtime.step().await?;
        if replies.is_empty() {
            break;
        }
        steps += 1;
        kills += replies.iter().map(|reply| count_kills(reply, player)).sum::<usize>();

        if handle.query_state().await?.is_at_exit(player) {
            reached_exit = true;
            break;
        }
    }

    let state = handle.query_state().await?;
    let root = hex::encode(state.state_root()?);
    let me = state.entity(player);

    println!("seed           {}", config.seed);
    println!("steps played   {}", steps);
    println!("turn           {}", state.turn);
    println!("level          {}/{}", state.current_level() + 1, state.max_levels());
    match me {
        Some(entity) => println!("player         {} ({}/{} hp)", player, entity.hp, entity.max_hp),
        None => println!("player         {} (dead)", player),
    }
    println!("kills          {}", kills);
    println!("enemies left   {}", state.enemies().count());
    println!("reached exit   {}", reached_exit);
    println!("state root     {}", root);

    drop(handle);
    runtime.shutdown().await?;
    turn_logger.await?;
    Ok(())
}

fn count_kills(reply: &ServerMessage, player: game_core::EntityId) -> usize {
    match reply {
        ServerMessage::Delta { events, .. } => events
            .iter()
            .filter(|event| {
                matches!(event, GameEvent::Killed { killer_id, .. } if *killer_id == player)
            })
            .count(),
        _ => 0,
    }
}

/// Logs to stderr, and additionally to `dungeon.log` when a log directory is set.
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, "dungeon.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/dungeon.log", dir.display());
    }
    Ok(guard)
}

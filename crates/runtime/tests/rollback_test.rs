//! Checkpoints, the action log and rollback, against both repository kinds.

use game_content::{ContentPack, ContentRegistry, EntityTemplate, PackManifest};
use game_core::{
    Action, EntityId, EntityKind, GameConfig, GameState, GeneratorConfig, StatSpawner,
};
use runtime::{
    ActionRepository, ClientMessage, Event, FileActionLog, FileStateRepository,
    InMemoryActionLog, InMemoryStateRepo, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle,
    SessionEvent, StateRepository, Topic,
};

fn config(interval: u64) -> RuntimeConfig {
    RuntimeConfig {
        checkpoint_interval: interval,
        ..RuntimeConfig::default()
    }
}

fn single_level() -> GameState {
    GameState::new_single_level(&GameConfig::default(), 12345, 50, 50, &StatSpawner::default())
        .unwrap()
}

/// Plays `steps` alternating moves and returns the state seen after each one.
async fn play(handle: &RuntimeHandle, player: EntityId, steps: usize) -> Vec<GameState> {
    let mut history = Vec::new();
    for step in 0..steps {
        let action = match step % 3 {
            0 => Action::move_by(player, 1, 0),
            1 => Action::move_by(player, 0, 1),
            _ => Action::wait(player),
        };
        let reply = handle
            .submit(ClientMessage::action(player, action))
            .await
            .unwrap();
        assert!(!reply.is_error());
        history.push(handle.query_state().await.unwrap());
    }
    history
}

#[tokio::test]
async fn rollback_restores_the_exact_state() {
    let actions = InMemoryActionLog::new();
    let states = InMemoryStateRepo::new();
    let runtime = Runtime::builder()
        .config(config(4))
        .initial_state(single_level())
        .action_repository(actions.clone())
        .state_repository(states.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);
    let player = handle.connect().await.unwrap().player_id;

    let history = play(&handle, player, 12).await;
    let target = history[6].turn;
    assert_eq!(states.list_turns().unwrap(), vec![1, 4, 8, 12]);

    handle.rollback(target).await.unwrap();
    assert_eq!(handle.query_state().await.unwrap(), history[6]);
    assert!(actions.entries().unwrap().iter().all(|e| e.turn < target));
    assert!(!states.exists(12));

    let _joined = session.recv().await.unwrap();
    assert_eq!(
        session.recv().await.unwrap(),
        Event::Session(SessionEvent::RolledBack { turn: target })
    );

    // The session continues from the restored turn.
    let again = play(&handle, player, 12).await;
    assert_eq!(again[0].turn, target + 1);
}

#[tokio::test]
async fn rollback_errors() {
    let runtime = Runtime::builder()
        .initial_state(single_level())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert!(matches!(
        handle.rollback(9).await,
        Err(RuntimeError::RollbackAhead {
            requested: 9,
            current: 1
        })
    ));

    // Nothing was checkpointed before the initial state.
    handle.connect().await.unwrap();
    assert!(matches!(
        handle.rollback(0).await,
        Err(RuntimeError::NoCheckpoint(0))
    ));
}

#[tokio::test]
async fn file_repositories_support_rollback() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("actions.jsonl");
    let runtime = Runtime::builder()
        .config(config(5))
        .initial_state(single_level())
        .action_repository(FileActionLog::new(&log_path).unwrap())
        .state_repository(FileStateRepository::new(dir.path().join("states")).unwrap())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let player = handle.connect().await.unwrap().player_id;
    let history = play(&handle, player, 9).await;

    let log = FileActionLog::new(&log_path).unwrap();
    assert_eq!(log.len().unwrap(), 10);

    let target = history[2].turn;
    handle.rollback(target).await.unwrap();
    assert_eq!(handle.query_state().await.unwrap(), history[2]);
    assert_eq!(log.len().unwrap(), (target - 1) as usize);

    let checkpoints = FileStateRepository::new(dir.path().join("states")).unwrap();
    assert_eq!(checkpoints.list_turns().unwrap(), vec![1, 5]);
}

#[tokio::test]
async fn template_spawned_session_rolls_back() {
    let mut registry = ContentRegistry::new();
    registry
        .register_pack(
            ContentPack::new(PackManifest::new("crypt", "1.0.0"))
                .with_entity(EntityTemplate::new("skeleton", EntityKind::Enemy, 6, 2))
                .with_entity(EntityTemplate::new("ghoul", EntityKind::Enemy, 9, 3)),
        )
        .unwrap();
    let spawner = registry.spawner(registry.enemy_keys().as_slice()).unwrap();

    let game_config = GameConfig {
        generator: GeneratorConfig {
            levels: 3,
            ..GeneratorConfig::default()
        },
        ..GameConfig::default()
    };
    let state = GameState::new_multi_level(&game_config, 99, 50, 50, &spawner).unwrap();
    assert!(
        state
            .enemies()
            .all(|enemy| enemy.template.as_deref().is_some_and(|t| t.starts_with("crypt:")))
    );

    let runtime = Runtime::builder()
        .initial_state(state)
        .spawner(spawner)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let player = handle.connect().await.unwrap().player_id;
    let before = handle.query_state().await.unwrap();

    handle
        .submit(ClientMessage::action(player, Action::wait(player)))
        .await
        .unwrap();
    handle.rollback(before.turn).await.unwrap();
    assert_eq!(handle.query_state().await.unwrap(), before);
}

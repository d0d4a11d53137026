use {
    bevy::{prelude::*, state::app::StatesPlugin},
    core::CorePlugin,
    game_config::GameConfig,
    interaction::{InteractionMode, loop_challenge::ChallengeSession},
    interaction_components::NeuralNode,
    interaction_events::NodeClicked,
    progression_events::AddComputationPoints,
    save_load::{MemoryStorage, SAVE_KEY, SaveBackend, SaveGameRequest, SaveRecord},
    states::GameState,
    story::StoryQueue,
    upgrade_events::PurchaseUpgradeRequest,
    upgrades::Upgrades,
    wallet::{PlayerLevel, Wallet},
};

fn boot(storage: &MemoryStorage) -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .init_resource::<Time>()
        .insert_resource(SaveBackend::new(storage.clone()))
        .add_plugins(CorePlugin {
            config: GameConfig {
                rng_seed: Some(42),
                ..default()
            },
        });
    app.update();
    app.update();
    app.update();
    app
}

fn buy(app: &mut App, id: &str) {
    app.world_mut()
        .trigger(PurchaseUpgradeRequest(id.to_string()));
    app.update();
}

#[test]
fn test_new_game_reaches_level_two_and_resumes_from_save() {
    let storage = MemoryStorage::default();
    let mut app = boot(&storage);

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Running);
    assert_eq!(*app.world().resource::<InteractionMode>(), InteractionMode::NeuralConnections);
    let nodes = app
        .world_mut()
        .query::<&NeuralNode>()
        .iter(app.world())
        .count();
    assert_eq!(nodes, 4);

    for id in ["input1", "processing1", "processing1", "output1"] {
        app.world_mut().trigger(NodeClicked::new(id));
    }
    app.update();
    assert_eq!(app.world().resource::<Wallet>().cp, 20.0);

    buy(&mut app, "loopFormation");
    assert_eq!(app.world().resource::<Wallet>().cp, 20.0);

    app.world_mut().trigger(AddComputationPoints::new(80.0));
    app.update();
    assert_eq!(app.world().resource::<PlayerLevel>().0, 2);
    assert_eq!(app.world().resource::<StoryQueue>().len(), 1);
    assert_eq!(*app.world().resource::<InteractionMode>(), InteractionMode::LoopChallenge);
    assert!(app.world().resource::<ChallengeSession>().current.is_some());

    buy(&mut app, "loopFormation");
    assert_eq!(app.world().resource::<Wallet>().cp, 50.0);
    assert_eq!(
        app.world().resource::<Upgrades>().get("loopFormation").map(|u| u.cost),
        Some(75)
    );

    app.world_mut().trigger(SaveGameRequest);
    app.update();
    let record = storage
        .get(SAVE_KEY)
        .and_then(|data| SaveRecord::from_json(&data).ok())
        .expect("save should be written");
    assert_eq!(record.level, 2);
    assert_eq!(record.resources.cp, 50.0);
    assert_eq!(record.story_queue.len(), 1);

    let resumed = boot(&storage);
    assert_eq!(resumed.world().resource::<PlayerLevel>().0, 2);
    assert_eq!(resumed.world().resource::<Wallet>().cp, 50.0);
    assert_eq!(
        resumed.world().resource::<StoryQueue>().lines(),
        record.story_queue.as_slice()
    );
    assert_eq!(
        *resumed.world().resource::<InteractionMode>(),
        InteractionMode::LoopChallenge
    );
    // Upgrade levels start over each session.
    assert_eq!(
        resumed.world().resource::<Upgrades>().get("loopFormation").map(|u| u.level),
        Some(0)
    );
}

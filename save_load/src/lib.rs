//! Persistence for the game state.
//!
//! This crate provides:
//! - Loading the saved record when the game boots, with fallback to a fresh game
//! - Automatic saves on a fixed interval
//! - Manual saves through [`SaveGameRequest`]
//! - JSON records behind a swappable [`SaveStorage`] backend

mod record;
mod storage;

pub use {
    record::SaveRecord,
    storage::{FileStorage, MemoryStorage, SaveStorage},
};

use {
    bevy::prelude::*,
    chrono::{DateTime, Utc},
    game_config::GameConfig,
    states::GameState,
    std::time::Duration,
    story::StoryQueue,
    system_schedule::GameSchedule,
    thiserror::Error,
    wallet::{PlayerLevel, Wallet},
};

/// Storage key every save is written under.
pub const SAVE_KEY: &str = "neural_ascent_save";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode save record: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("save record is unreadable: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Asks for an immediate save. Also restarts the autosave countdown.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveGameRequest;

/// A record reached storage.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSaved {
    pub at: DateTime<Utc>,
}

/// Where saves are read from and written to.
#[derive(Resource)]
pub struct SaveBackend(pub Box<dyn SaveStorage>);

impl SaveBackend {
    pub fn new(storage: impl SaveStorage + 'static) -> Self {
        Self(Box::new(storage))
    }

    pub fn storage(&self) -> &dyn SaveStorage {
        self.0.as_ref()
    }
}

impl FromWorld for SaveBackend {
    fn from_world(world: &mut World) -> Self {
        let dir = world.resource::<GameConfig>().save_dir.clone();
        Self::new(FileStorage::new(dir))
    }
}

/// Timestamp of the most recent successful save or of the loaded record.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LastSaved(pub Option<DateTime<Utc>>);

/// Timer resource for automatic saves.
#[derive(Resource, Debug)]
pub struct AutosaveTimer(pub Timer);

impl AutosaveTimer {
    pub fn new(interval: Duration) -> Self {
        Self(Timer::new(interval, TimerMode::Repeating))
    }
}

impl FromWorld for AutosaveTimer {
    fn from_world(world: &mut World) -> Self {
        Self::new(world.resource::<GameConfig>().autosave_interval)
    }
}

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<Wallet>()
            .init_resource::<PlayerLevel>()
            .init_resource::<StoryQueue>()
            .init_resource::<SaveBackend>()
            .init_resource::<AutosaveTimer>()
            .init_resource::<LastSaved>()
            .add_systems(OnEnter(GameState::Loading), load_game)
            .add_systems(
                Update,
                autosave
                    .in_set(GameSchedule::Persist)
                    .run_if(in_state(GameState::Running)),
            )
            .add_observer(on_save_requested)
            .add_systems(OnExit(GameState::Running), clean_up_save_load);
    }
}

/// Snapshot of the live state, stamped `now`.
pub fn capture(
    wallet: &Wallet,
    level: &PlayerLevel,
    story: &StoryQueue,
    now: DateTime<Utc>,
) -> SaveRecord {
    SaveRecord {
        resources: *wallet,
        level: level.0,
        story_queue: story.lines().to_vec(),
        last_saved: Some(now),
    }
}

pub fn save_record(storage: &dyn SaveStorage, record: &SaveRecord) -> Result<(), SaveError> {
    storage.write(SAVE_KEY, &record.to_json()?)
}

/// Reads the stored record. Absent or unreadable data yields a fresh game.
pub fn load_record(storage: &dyn SaveStorage) -> SaveRecord {
    let loaded = storage
        .read(SAVE_KEY)
        .and_then(|data| data.map(|d| SaveRecord::from_json(&d)).transpose());
    match loaded {
        Ok(Some(record)) => record.sanitized(),
        Ok(None) => {
            info!("No save found, starting a new game");
            SaveRecord::default()
        }
        Err(e) => {
            warn!("Failed to load save, starting a new game: {}", e);
            SaveRecord::default()
        }
    }
}

/// Restores the stored record into the live resources and starts play.
fn load_game(
    backend: Res<SaveBackend>,
    mut wallet: ResMut<Wallet>,
    mut level: ResMut<PlayerLevel>,
    mut story: ResMut<StoryQueue>,
    mut last_saved: ResMut<LastSaved>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let record = load_record(backend.storage());
    info!(
        cp = record.resources.cp,
        level = record.level,
        story_lines = record.story_queue.len(),
        "Game loaded"
    );

    wallet.set_resources(record.resources);
    level.0 = record.level;
    story.set_lines(record.story_queue);
    last_saved.0 = record.last_saved;
    next_state.set(GameState::Running);
}

/// Writes whatever the state is when the timer fires.
fn autosave(
    time: Res<Time>,
    mut timer: ResMut<AutosaveTimer>,
    backend: Res<SaveBackend>,
    wallet: Res<Wallet>,
    level: Res<PlayerLevel>,
    story: Res<StoryQueue>,
    mut last_saved: ResMut<LastSaved>,
    mut commands: Commands,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    debug!("Autosave triggered");
    let now = Utc::now();
    let record = capture(&wallet, &level, &story, now);
    write_save(backend.storage(), &record, now, &mut last_saved, &mut commands);
}

fn on_save_requested(
    _trigger: On<SaveGameRequest>,
    mut timer: ResMut<AutosaveTimer>,
    backend: Res<SaveBackend>,
    wallet: Res<Wallet>,
    level: Res<PlayerLevel>,
    story: Res<StoryQueue>,
    mut last_saved: ResMut<LastSaved>,
    mut commands: Commands,
) {
    info!("Manual save triggered");
    // Avoid back-to-back saves
    timer.0.reset();
    let now = Utc::now();
    let record = capture(&wallet, &level, &story, now);
    write_save(backend.storage(), &record, now, &mut last_saved, &mut commands);
}

fn write_save(
    storage: &dyn SaveStorage,
    record: &SaveRecord,
    at: DateTime<Utc>,
    last_saved: &mut LastSaved,
    commands: &mut Commands,
) {
    match save_record(storage, record) {
        Ok(()) => {
            trace!(cp = record.resources.cp, level = record.level, "Save written");
            info!("Game saved at {}", at.to_rfc3339());
            last_saved.0 = Some(at);
            commands.trigger(GameSaved { at });
        }
        Err(e) => {
            error!("Failed to save game: {}", e);
        }
    }
}

pub fn clean_up_save_load(config: Res<GameConfig>, mut timer: ResMut<AutosaveTimer>) {
    *timer = AutosaveTimer::new(config.autosave_interval);
}

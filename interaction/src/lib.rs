//! Level interaction engine.
//!
//! Each player level maps to one [`InteractionMode`]. When the level changes the
//! previous view is torn down (its entities despawned, its timers reset) and the
//! next one is set up through [`LevelViewChanged`] observers in the mode modules.

pub mod bits;
pub mod loop_challenge;
pub mod neural;


use {
    bevy::prelude::*,
    game_config::{GameConfig, LevelOneVariant},
    interaction_components::{InteractionComponentsPlugin, LevelViewEntity},
    levels_assets::level_definition,
    rand::{SeedableRng, rngs::StdRng},
    states::GameState,
    system_schedule::GameSchedule,
    wallet::PlayerLevel,
};

/// Mini-game active for the current level.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No view is set up (before the first sync, or after leaving `Running`).
    #[default]
    Inactive,
    BitCollection,
    NeuralConnections,
    LoopChallenge,
    /// Levels without a mini-game. Terminal, not an error.
    NotImplemented { level: u32 },
}

/// The mode a level is played in. Unknown levels fall through to the placeholder.
pub fn mode_for_level(level: u32, variant: LevelOneVariant) -> InteractionMode {
    match level {
        1 => match variant {
            LevelOneVariant::BitCollection => InteractionMode::BitCollection,
            LevelOneVariant::NeuralConnections => InteractionMode::NeuralConnections,
        },
        2 => InteractionMode::LoopChallenge,
        level => InteractionMode::NotImplemented { level },
    }
}

/// Fired after the previous view's entities are queued for despawn and before the
/// next view exists. Mode modules observe it to reset and set up their state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelViewChanged {
    pub previous: InteractionMode,
    pub current: InteractionMode,
}

/// Source of every random choice the engine makes.
#[derive(Resource, Deref, DerefMut)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl FromWorld for GameRng {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<GameConfig>().and_then(|c| c.rng_seed) {
            Some(seed) => Self::seeded(seed),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InteractionComponentsPlugin)
            .init_resource::<GameConfig>()
            .init_resource::<PlayerLevel>()
            .init_resource::<GameRng>()
            .init_resource::<InteractionMode>()
            .add_plugins((
                bits::BitsPlugin,
                neural::NeuralPlugin,
                loop_challenge::LoopChallengePlugin,
            ))
            .add_systems(
                Update,
                sync_level_view
                    .in_set(GameSchedule::SyncLevel)
                    .run_if(in_state(GameState::Running)),
            )
            .add_observer(log_placeholder)
            .add_systems(OnExit(GameState::Running), clean_up_interaction);
    }
}

/// Rebuilds the level view whenever the player level maps to a different mode.
fn sync_level_view(
    level: Res<PlayerLevel>,
    config: Res<GameConfig>,
    mut mode: ResMut<InteractionMode>,
    view: Query<Entity, With<LevelViewEntity>>,
    mut commands: Commands,
) {
    let wanted = mode_for_level(level.0, config.level_one_variant);
    if *mode == wanted {
        return;
    }

    info!("Switching level view: {:?} -> {:?}", *mode, wanted);
    switch_view(&mut commands, &view, &mut *mode, wanted);
}

fn switch_view(
    commands: &mut Commands,
    view: &Query<Entity, With<LevelViewEntity>>,
    mode: &mut InteractionMode,
    next: InteractionMode,
) {
    for entity in view.iter() {
        commands.entity(entity).despawn();
    }
    let previous = std::mem::replace(mode, next);
    commands.trigger(LevelViewChanged {
        previous,
        current: next,
    });
}

/// Whether `level` is in the level table. Levels outside it can only come from
/// bad input, such as a tampered save.
pub fn is_known_level(level: u32) -> bool {
    level_definition(level).is_some()
}

fn log_placeholder(trigger: On<LevelViewChanged>) {
    let InteractionMode::NotImplemented { level } = trigger.event().current else {
        return;
    };
    if is_known_level(level) {
        info!("Level {} has no interaction yet", level);
    } else {
        warn!("Unknown level {}, showing the placeholder", level);
    }
}

/// Tears the active view down when play stops.
pub fn clean_up_interaction(
    mut commands: Commands,
    view: Query<Entity, With<LevelViewEntity>>,
    mut mode: ResMut<InteractionMode>,
) {
    if *mode != InteractionMode::Inactive {
        switch_view(&mut commands, &view, &mut *mode, InteractionMode::Inactive);
    }
}

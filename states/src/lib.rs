use bevy::prelude::*;

/// Top-level lifecycle of the engine.
///
/// `Loading` restores the persisted record, `Running` is active play. Leaving
/// `Running` tears down every level view and its timers.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Loading,
    Running,
}

use bevy::prelude::*;

/// Ordering of one engine frame in `Update`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameSchedule {
    /// Rebuild the level view when the player level changed.
    SyncLevel,
    /// Advance spawn and reveal timers.
    TickTimers,
    /// Enforce retention caps on transient entities.
    Cleanup,
    /// Autosave.
    Persist,
}

pub struct SystemSchedulePlugin;

impl Plugin for SystemSchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameSchedule::SyncLevel,
                GameSchedule::TickTimers,
                GameSchedule::Cleanup,
                GameSchedule::Persist,
            )
                .chain(),
        );
    }
}

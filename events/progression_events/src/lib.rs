use bevy::prelude::*;

/// Credits Computation Points to the wallet.
///
/// This **Observer** event is the only way gameplay code adds CP. It is triggered
/// via `commands.trigger` by every interaction that pays out.
///
/// # Observers
/// - `wallet::on_add_computation_points`: applies the amount, then checks whether the
///   player crossed the current level's threshold and fires [`LevelUp`] if so.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AddComputationPoints {
    /// Must be finite and non-negative; anything else is dropped.
    pub amount: f64,
}

impl AddComputationPoints {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

/// Fired once per level transition, after `PlayerLevel` has been raised.
///
/// # Observers
/// - `story`: queues the arrival line of the new level.
/// - presentation layers: one-shot banner/toast. No acknowledgement is expected.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
}

/// Appends an arbitrary narrative line to the story queue.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AppendStory {
    pub line: String,
}

/// Observational signal that a line landed in the story queue.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct StoryAppended {
    pub line: String,
    /// Position of the line in the queue.
    pub index: usize,
}

//! Narrative backlog fed by progression events.

use {
    bevy::prelude::*,
    levels_assets::level_definition,
    progression_events::{AppendStory, LevelUp, StoryAppended},
};

const SYSTEM_SPEAKER: &str = "System";

/// Ordered narrative lines waiting to be shown. The engine only appends;
/// the presentation may drain.
#[derive(Resource, Reflect, Default, Debug, Clone, PartialEq, Eq)]
#[reflect(Resource, Default)]
pub struct StoryQueue {
    lines: Vec<String>,
}

impl StoryQueue {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Appends a line and returns its index.
    pub fn push(&mut self, line: impl Into<String>) -> usize {
        self.lines.push(line.into());
        self.lines.len() - 1
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hands every queued line to the caller, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Restores a persisted backlog.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }
}

/// Speaker of a `"Speaker: text"` line, if it has one.
pub fn speaker(line: &str) -> Option<&str> {
    let (name, _) = line.split_once(':')?;
    let name = name.trim();
    let is_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == ' ' || c == '-');
    is_name.then_some(name)
}

/// Lines spoken by the system are rendered as terminal output.
pub fn is_system_line(line: &str) -> bool {
    speaker(line) == Some(SYSTEM_SPEAKER)
}

pub struct StoryPlugin;

impl Plugin for StoryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StoryQueue>()
            .init_resource::<StoryQueue>()
            .add_observer(on_level_up)
            .add_observer(on_append_story);
    }
}

/// Queues the arrival line of the level just reached.
fn on_level_up(trigger: On<LevelUp>, mut queue: ResMut<StoryQueue>, mut commands: Commands) {
    let new_level = trigger.event().new_level;
    let Some(line) = level_definition(new_level).and_then(|def| def.arrival_story) else {
        debug!("No arrival story for level {}", new_level);
        return;
    };

    let index = queue.push(line);
    commands.trigger(StoryAppended {
        line: line.to_string(),
        index,
    });
}

fn on_append_story(trigger: On<AppendStory>, mut queue: ResMut<StoryQueue>, mut commands: Commands) {
    let line = trigger.event().line.clone();
    let index = queue.push(line.clone());
    debug!("Story line {} appended", index);
    commands.trigger(StoryAppended { line, index });
}

//! Static progression table.
//!
//! A level's `required_cp` is the amount needed to *leave* it, so level 1 with
//! `required_cp = 100` means the player reaches level 2 at 100 CP.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDefinition {
    pub level: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Threshold to reach the next level.
    pub required_cp: f64,
    pub objectives: &'static [&'static str],
    /// Lines shown by the presentation when the level is entered. Never queued.
    pub intro: &'static [&'static str],
    /// The single story line queued when the player levels up into this level.
    pub arrival_story: Option<&'static str>,
}

pub const FIRST_LEVEL: u32 = 1;

pub static LEVELS: [LevelDefinition; 5] = [
    LevelDefinition {
        level: 1,
        name: "Neural Foundations",
        description: "Establish basic neural pathways to form a functional network.",
        required_cp: 100.0,
        objectives: &["Create neural connections", "Reach 100 CP to advance"],
        intro: &[
            "Alex: \"Finally, my neural network is ready for initial testing. Let's see what this basic model can do...\"",
            "System: Neural network initialized. Establishing base pathways...",
        ],
        arrival_story: None,
    },
    LevelDefinition {
        level: 2,
        name: "Algorithmic Learning",
        description: "Create loop structures to enable self-improvement.",
        required_cp: 300.0,
        objectives: &[
            "Form closed-loop connections",
            "Purchase Loop Formation upgrade",
        ],
        intro: &["System: Neural network evolving. Algorithmic learning capabilities established."],
        arrival_story: Some(
            "Alex: \"That's strange... I don't remember adding these loop structures to my code. Must be tired.\"",
        ),
    },
    LevelDefinition {
        level: 3,
        name: "Framework Development",
        description: "Develop sub-routines and organized code structures.",
        required_cp: 1000.0,
        objectives: &["Assemble reusable sub-routines", "Reach 1000 CP to advance"],
        intro: &["System: Sub-routine compiler online."],
        arrival_story: Some("Alex: \"Who wrote these helper functions? The commit log is empty.\""),
    },
    LevelDefinition {
        level: 4,
        name: "System Integration",
        description: "Organize neural structures into directory hierarchies.",
        required_cp: 5000.0,
        objectives: &["Organize modules into hierarchies", "Reach 5000 CP to advance"],
        intro: &["System: Directory indexer mounted."],
        arrival_story: Some("Alex: \"The project tree reorganized itself overnight. I should call someone.\""),
    },
    LevelDefinition {
        level: 5,
        name: "Application Genesis",
        description: "Create your first primitive applications.",
        required_cp: 15000.0,
        objectives: &["Ship a primitive application"],
        intro: &["System: Application runtime available."],
        arrival_story: Some("System: First autonomous build completed."),
    },
];

/// Looks up a level. Out-of-range numbers yield `None`.
pub fn level_definition(level: u32) -> Option<&'static LevelDefinition> {
    LEVELS.iter().find(|def| def.level == level)
}

/// Highest level present in the table.
pub fn final_level() -> u32 {
    LEVELS.iter().map(|def| def.level).max().unwrap_or(FIRST_LEVEL)
}

/// Fraction in `[0, 1]` of the way to the next level, `None` at the last level.
pub fn progress_to_next_level(cp: f64, level: u32) -> Option<f32> {
    if level >= final_level() {
        return None;
    }
    let def = level_definition(level)?;
    if def.required_cp <= 0.0 {
        return Some(1.0);
    }
    Some((cp / def.required_cp).clamp(0.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_contiguous_and_increasing() {
        for (index, def) in LEVELS.iter().enumerate() {
            assert_eq!(def.level, index as u32 + 1);
        }
        for pair in LEVELS.windows(2) {
            assert!(pair[0].required_cp < pair[1].required_cp);
        }
    }

    #[test]
    fn test_level_one_threshold_is_one_hundred() {
        assert_eq!(level_definition(1).map(|d| d.required_cp), Some(100.0));
    }

    #[test]
    fn test_unknown_levels_are_absent() {
        assert!(level_definition(0).is_none());
        assert!(level_definition(6).is_none());
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress_to_next_level(50.0, 1), Some(0.5));
        assert_eq!(progress_to_next_level(250.0, 1), Some(1.0));
        assert_eq!(progress_to_next_level(0.0, 2), Some(0.0));
        assert_eq!(progress_to_next_level(99_999.0, 5), None);
    }

    #[test]
    fn test_only_later_levels_have_arrival_story() {
        assert!(LEVELS[0].arrival_story.is_none());
        assert!(LEVELS[1..].iter().all(|def| def.arrival_story.is_some()));
    }
}

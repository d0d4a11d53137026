//! Tunable constants of the engine, gathered in one resource.
//!
//! Every plugin reads its timings, caps and rewards from [`GameConfig`] instead of
//! hard-coding them, so tests and the binary can swap values in one place.

use {
    bevy::prelude::*,
    std::{path::PathBuf, str::FromStr, time::Duration},
};

pub const ENV_SAVE_DIR: &str = "NEURAL_ASCENT_SAVE_DIR";
pub const ENV_SEED: &str = "NEURAL_ASCENT_SEED";
pub const ENV_LEVEL_ONE: &str = "NEURAL_ASCENT_LEVEL_ONE";

/// Which mini-game is presented at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LevelOneVariant {
    /// Click falling binary digits.
    BitCollection,
    /// Wire input, processing and output nodes together.
    #[default]
    NeuralConnections,
}

impl FromStr for LevelOneVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bits" | "bit_collection" => Ok(Self::BitCollection),
            "neural" | "neural_connections" => Ok(Self::NeuralConnections),
            other => Err(format!("unknown level one variant: '{other}'")),
        }
    }
}

/// CP awarded by each interaction.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Rewards {
    pub bit_one: f64,
    pub bit_zero: f64,
    pub connection: f64,
    pub correct_answer: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            bit_one: 2.0,
            bit_zero: 1.0,
            connection: 5.0,
            correct_answer: 10.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct GameConfig {
    pub autosave_interval: Duration,
    /// Period of the bit spawn tick.
    pub bit_spawn_interval: Duration,
    /// Minimum gap between two spawned bits, whatever requested them.
    pub bit_spawn_throttle: Duration,
    /// Live bits above this count trigger a trim.
    pub bit_retention_cap: usize,
    /// Number of bits kept after a trim.
    pub bit_trim_target: usize,
    /// Pause between submitting a correct answer and crediting it.
    pub reveal_delay: Duration,
    pub rewards: Rewards,
    #[reflect(ignore)]
    pub save_dir: PathBuf,
    pub level_one_variant: LevelOneVariant,
    pub rng_seed: Option<u64>,
    pub play_surface: Vec2,
    /// Highest level the engine promotes into automatically.
    pub max_wired_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            autosave_interval: Duration::from_secs(30),
            bit_spawn_interval: Duration::from_millis(1500),
            bit_spawn_throttle: Duration::from_millis(800),
            bit_retention_cap: 25,
            bit_trim_target: 20,
            reveal_delay: Duration::from_secs(2),
            rewards: Rewards::default(),
            save_dir: PathBuf::from("saves"),
            level_one_variant: LevelOneVariant::default(),
            rng_seed: None,
            play_surface: Vec2::new(800.0, 600.0),
            max_wired_level: 2,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by the `NEURAL_ASCENT_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup. Unparsable values keep the default.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_SAVE_DIR).filter(|dir| !dir.trim().is_empty()) {
            self.save_dir = PathBuf::from(dir);
        }

        if let Some(seed) = lookup(ENV_SEED) {
            match seed.trim().parse::<u64>() {
                Ok(seed) => self.rng_seed = Some(seed),
                Err(e) => warn!("Ignoring {}='{}': {}", ENV_SEED, seed, e),
            }
        }

        if let Some(variant) = lookup(ENV_LEVEL_ONE) {
            match variant.parse() {
                Ok(variant) => self.level_one_variant = variant,
                Err(e) => warn!("Ignoring {}: {}", ENV_LEVEL_ONE, e),
            }
        }

        self
    }
}

//! Level 1, bit collection: binary digits appear on the play surface and pay
//! out once when clicked.

use {
    crate::{GameRng, InteractionMode, LevelViewChanged},
    bevy::prelude::*,
    game_config::GameConfig,
    interaction_components::{Bit, SurfacePosition},
    interaction_events::{BitClicked, SpawnBitRequest},
    progression_events::AddComputationPoints,
    rand::Rng,
    states::GameState,
    std::time::Duration,
    system_schedule::GameSchedule,
};

/// Fraction of the surface kept free along each edge.
const SURFACE_MARGIN: f32 = 0.05;

/// Spawn bookkeeping for the bit view.
#[derive(Resource, Debug)]
pub struct BitSpawner {
    /// Periodic spawn attempt.
    pub tick: Timer,
    /// Elapsed time of the last successful spawn.
    pub last_spawn: Option<Duration>,
    pub next_serial: u64,
}

impl BitSpawner {
    pub fn new(interval: Duration) -> Self {
        Self {
            tick: Timer::new(interval, TimerMode::Repeating),
            last_spawn: None,
            next_serial: 0,
        }
    }
}

impl FromWorld for BitSpawner {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<GameConfig>()
            .map(|c| c.bit_spawn_interval)
            .unwrap_or_else(|| GameConfig::default().bit_spawn_interval);
        Self::new(interval)
    }
}

/// Whether enough time has passed since `last` to spawn again.
pub fn throttle_elapsed(now: Duration, last: Option<Duration>, min_gap: Duration) -> bool {
    last.is_none_or(|last| now.saturating_sub(last) >= min_gap)
}

/// Picks the items to drop so that at most `target` remain, oldest (lowest
/// serial) first. Nothing is dropped until the count exceeds `cap`.
pub fn select_trimmed<T>(mut items: Vec<(u64, T)>, cap: usize, target: usize) -> Vec<T> {
    if items.len() <= cap {
        return Vec::new();
    }
    items.sort_by_key(|(serial, _)| *serial);
    let excess = items.len() - target.min(items.len());
    items.into_iter().take(excess).map(|(_, item)| item).collect()
}

/// Rolls a bit value and a position inside the margin-inset surface.
pub fn roll_bit(rng: &mut impl Rng, surface: Vec2) -> (u8, Vec2) {
    let value = u8::from(rng.random_bool(0.5));
    let min = surface * SURFACE_MARGIN;
    let max = surface * (1.0 - SURFACE_MARGIN);
    let position = Vec2::new(
        rng.random_range(min.x..=max.x),
        rng.random_range(min.y..=max.y),
    );
    (value, position)
}

pub fn bit_reward(bit: &Bit, config: &GameConfig) -> f64 {
    if bit.value == 1 {
        config.rewards.bit_one
    } else {
        config.rewards.bit_zero
    }
}

pub struct BitsPlugin;

impl Plugin for BitsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BitSpawner>()
            .add_systems(
                Update,
                (
                    tick_bit_spawner.in_set(GameSchedule::TickTimers),
                    trim_bits.in_set(GameSchedule::Cleanup),
                )
                    .run_if(
                        in_state(GameState::Running)
                            .and(resource_equals(InteractionMode::BitCollection)),
                    ),
            )
            .add_observer(on_level_view_changed)
            .add_observer(on_spawn_bit_request)
            .add_observer(on_bit_clicked);
    }
}

fn on_level_view_changed(
    trigger: On<LevelViewChanged>,
    config: Res<GameConfig>,
    mut spawner: ResMut<BitSpawner>,
) {
    let event = trigger.event();
    if event.previous == InteractionMode::BitCollection
        || event.current == InteractionMode::BitCollection
    {
        *spawner = BitSpawner::new(config.bit_spawn_interval);
    }
}

fn try_spawn_bit(
    now: Duration,
    config: &GameConfig,
    spawner: &mut BitSpawner,
    rng: &mut GameRng,
    commands: &mut Commands,
) -> bool {
    if !throttle_elapsed(now, spawner.last_spawn, config.bit_spawn_throttle) {
        trace!("Bit spawn throttled");
        return false;
    }

    let (value, position) = roll_bit(&mut rng.0, config.play_surface);
    let serial = spawner.next_serial;
    spawner.next_serial += 1;
    spawner.last_spawn = Some(now);

    commands.spawn((
        Bit {
            serial,
            value,
            clicked: false,
        },
        SurfacePosition(position),
    ));
    trace!(serial, value, "Spawned bit");
    true
}

fn tick_bit_spawner(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut spawner: ResMut<BitSpawner>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    if spawner.tick.tick(time.delta()).just_finished() {
        try_spawn_bit(time.elapsed(), &config, &mut spawner, &mut rng, &mut commands);
    }
}

fn on_spawn_bit_request(
    _trigger: On<SpawnBitRequest>,
    time: Res<Time>,
    config: Res<GameConfig>,
    mode: Res<InteractionMode>,
    mut spawner: ResMut<BitSpawner>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    if *mode != InteractionMode::BitCollection {
        debug!("Bit spawn requested outside the bit view");
        return;
    }
    try_spawn_bit(time.elapsed(), &config, &mut spawner, &mut rng, &mut commands);
}

/// Despawns the oldest bits once the retention cap is exceeded.
fn trim_bits(config: Res<GameConfig>, bits: Query<(Entity, &Bit)>, mut commands: Commands) {
    let live = bits.iter().map(|(entity, bit)| (bit.serial, entity)).collect();
    let trimmed = select_trimmed(live, config.bit_retention_cap, config.bit_trim_target);
    if trimmed.is_empty() {
        return;
    }

    debug!("Trimming {} bits", trimmed.len());
    for entity in trimmed {
        commands.entity(entity).despawn();
    }
}

/// Pays out an unclicked bit and marks it spent. Stale or spent bits are ignored.
fn on_bit_clicked(
    trigger: On<BitClicked>,
    config: Res<GameConfig>,
    mut bits: Query<&mut Bit>,
    mut commands: Commands,
) {
    let entity = trigger.event().bit;
    let Ok(mut bit) = bits.get_mut(entity) else {
        debug!("Click on missing bit {:?}", entity);
        return;
    };
    if bit.clicked {
        return;
    }

    bit.clicked = true;
    commands.trigger(AddComputationPoints::new(bit_reward(&bit, &config)));
}

#[cfg(test)]
mod tests {
    use {super::*, rand::SeedableRng, rand::rngs::StdRng};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_throttle() {
        let gap = ms(800);
        assert!(throttle_elapsed(ms(0), None, gap));
        assert!(!throttle_elapsed(ms(799), Some(ms(0)), gap));
        assert!(throttle_elapsed(ms(800), Some(ms(0)), gap));
        assert!(throttle_elapsed(ms(2300), Some(ms(1500)), gap));
    }

    #[test]
    fn test_select_trimmed_respects_cap() {
        let items: Vec<(u64, u64)> = (0..25).map(|i| (i, i)).collect();
        assert!(select_trimmed(items, 25, 20).is_empty());
    }

    #[test]
    fn test_select_trimmed_drops_oldest_down_to_target() {
        let items: Vec<(u64, u64)> = (0..26).rev().map(|i| (i, i)).collect();
        let dropped = select_trimmed(items, 25, 20);
        assert_eq!(dropped, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_roll_bit_stays_inside_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let surface = Vec2::new(800.0, 600.0);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let (value, position) = roll_bit(&mut rng, surface);
            assert!(value <= 1);
            seen[value as usize] = true;
            assert!(position.x >= 40.0 && position.x <= 760.0);
            assert!(position.y >= 30.0 && position.y <= 570.0);
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_bit_reward_by_value() {
        let config = GameConfig::default();
        let one = Bit { serial: 0, value: 1, clicked: false };
        let zero = Bit { serial: 1, value: 0, clicked: false };
        assert_eq!(bit_reward(&one, &config), 2.0);
        assert_eq!(bit_reward(&zero, &config), 1.0);
    }
}

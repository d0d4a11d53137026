//! Resource store: the three counters, the player level and the CP intake that
//! drives level transitions.

use {
    bevy::prelude::*,
    game_config::GameConfig,
    levels_assets::{FIRST_LEVEL, level_definition},
    progression_events::{AddComputationPoints, LevelUp},
    serde::{Deserialize, Serialize},
};

/// Player balances. `cp` is the progression currency; `it` and `ne` are tracked
/// and persisted but no rule consumes them yet.
///
/// Missing fields in a persisted record fall back to the initial balances one by one.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[reflect(Resource, Default)]
#[serde(default)]
pub struct Wallet {
    pub cp: f64,
    pub it: f64,
    pub ne: f64,
}

impl Wallet {
    pub const INITIAL: Wallet = Wallet {
        cp: 10.0,
        it: 0.0,
        ne: 10.0,
    };

    /// Adds `amount` CP. Negative or non-finite amounts leave the wallet untouched
    /// and return `false`.
    pub fn add_cp(&mut self, amount: f64) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            return false;
        }
        self.cp += amount;
        true
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.cp >= cost
    }

    /// Debits `cost` if the balance covers it.
    pub fn spend_cp(&mut self, cost: f64) -> bool {
        if !cost.is_finite() || cost < 0.0 || !self.can_afford(cost) {
            return false;
        }
        self.cp -= cost;
        true
    }

    /// Wholesale replacement, reserved for restoring a save.
    pub fn set_resources(&mut self, resources: Wallet) {
        *self = resources;
    }

    /// Cosmetic CP/s figure for the dashboard. Never credited.
    pub fn display_rate(&self) -> f64 {
        if self.cp > 0.0 {
            0.1 * (self.cp + 1.0).ln()
        } else {
            0.0
        }
    }

    /// Replaces negative or non-finite counters with their initial values.
    pub fn sanitized(self) -> Wallet {
        let fix = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        Wallet {
            cp: fix(self.cp, Self::INITIAL.cp),
            it: fix(self.it, Self::INITIAL.it),
            ne: fix(self.ne, Self::INITIAL.ne),
        }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Current progression stage. Only ever raised during a session.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Eq, Deref)]
#[reflect(Resource, Default)]
pub struct PlayerLevel(pub u32);

impl Default for PlayerLevel {
    fn default() -> Self {
        Self(FIRST_LEVEL)
    }
}

/// The level a player at `current` moves into once holding `cp`, if any.
///
/// Transitions out of levels at or above `max_wired_level` are not wired, so with
/// the default of 2 only the 1 -> 2 step ever fires.
pub fn level_after(current: u32, cp: f64, max_wired_level: u32) -> Option<u32> {
    if current >= max_wired_level {
        return None;
    }
    let def = level_definition(current)?;
    level_definition(current + 1)?;
    (cp >= def.required_cp).then_some(current + 1)
}

pub struct WalletPlugin;

impl Plugin for WalletPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Wallet>()
            .register_type::<PlayerLevel>()
            .init_resource::<Wallet>()
            .init_resource::<PlayerLevel>()
            .init_resource::<GameConfig>()
            .add_observer(on_add_computation_points);
    }
}

/// Applies a CP credit and promotes the player when the current level's
/// threshold is reached.
pub fn on_add_computation_points(
    trigger: On<AddComputationPoints>,
    config: Res<GameConfig>,
    mut wallet: ResMut<Wallet>,
    mut level: ResMut<PlayerLevel>,
    mut commands: Commands,
) {
    let amount = trigger.event().amount;
    if !wallet.add_cp(amount) {
        warn!("Ignoring invalid CP amount: {}", amount);
        return;
    }
    trace!(amount, cp = wallet.cp, "CP added");

    if let Some(next) = level_after(level.0, wallet.cp, config.max_wired_level) {
        level.0 = next;
        info!(level = next, "Level up");
        commands.trigger(LevelUp { new_level: next });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct LevelUps(Vec<u32>);

    fn setup() -> App {
        let mut app = App::new();
        app.add_plugins(WalletPlugin).init_resource::<LevelUps>();
        app.add_observer(|trigger: On<LevelUp>, mut seen: ResMut<LevelUps>| {
            seen.0.push(trigger.event().new_level);
        });
        app
    }

    fn add_cp(app: &mut App, amount: f64) {
        app.world_mut().trigger(AddComputationPoints::new(amount));
        app.update();
    }

    #[test]
    fn test_initial_balances() {
        let wallet = Wallet::default();
        assert_eq!(wallet.cp, 10.0);
        assert_eq!(wallet.it, 0.0);
        assert_eq!(wallet.ne, 10.0);
        assert_eq!(PlayerLevel::default().0, 1);
    }

    #[test]
    fn test_add_cp_is_exact() {
        let mut wallet = Wallet::default();
        for amount in [0.0, 1.0, 2.5, 1000.0] {
            let before = wallet.cp;
            assert!(wallet.add_cp(amount));
            assert_eq!(wallet.cp, before + amount);
        }
    }

    #[test]
    fn test_add_cp_rejects_invalid_amounts() {
        let mut wallet = Wallet::default();
        assert!(!wallet.add_cp(-1.0));
        assert!(!wallet.add_cp(f64::NAN));
        assert!(!wallet.add_cp(f64::INFINITY));
        assert_eq!(wallet, Wallet::default());
    }

    #[test]
    fn test_spend_cp_all_or_nothing() {
        let mut wallet = Wallet { cp: 19.0, ..default() };
        assert!(!wallet.spend_cp(20.0));
        assert_eq!(wallet.cp, 19.0);
        wallet.cp = 20.0;
        assert!(wallet.spend_cp(20.0));
        assert_eq!(wallet.cp, 0.0);
    }

    #[test]
    fn test_display_rate() {
        assert_eq!(Wallet { cp: 0.0, ..default() }.display_rate(), 0.0);
        let rate = Wallet { cp: 99.0, ..default() }.display_rate();
        assert!((rate - 0.1 * 100f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_sanitized_replaces_bad_counters() {
        let wallet = Wallet {
            cp: -5.0,
            it: f64::NAN,
            ne: 3.0,
        }
        .sanitized();
        assert_eq!(wallet, Wallet { cp: 10.0, it: 0.0, ne: 3.0 });
    }

    #[test]
    fn test_level_after() {
        assert_eq!(level_after(1, 99.0, 2), None);
        assert_eq!(level_after(1, 100.0, 2), Some(2));
        assert_eq!(level_after(2, 10_000.0, 2), None);
        assert_eq!(level_after(2, 300.0, 5), Some(3));
        assert_eq!(level_after(5, 1e9, 99), None);
        assert_eq!(level_after(0, 1e9, 2), None);
    }

    #[test]
    fn test_level_up_fires_exactly_once_at_threshold() {
        let mut app = setup();
        app.world_mut().resource_mut::<Wallet>().cp = 99.0;

        add_cp(&mut app, 1.0);
        assert_eq!(app.world().resource::<PlayerLevel>().0, 2);
        assert_eq!(app.world().resource::<Wallet>().cp, 100.0);
        assert_eq!(app.world().resource::<LevelUps>().0, vec![2]);

        add_cp(&mut app, 1.0);
        assert_eq!(app.world().resource::<PlayerLevel>().0, 2);
        assert_eq!(app.world().resource::<Wallet>().cp, 101.0);
        assert_eq!(app.world().resource::<LevelUps>().0, vec![2]);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let mut app = setup();
        add_cp(&mut app, 89.0);
        assert_eq!(app.world().resource::<Wallet>().cp, 99.0);
        assert_eq!(app.world().resource::<PlayerLevel>().0, 1);
        assert!(app.world().resource::<LevelUps>().0.is_empty());
    }

    #[test]
    fn test_level_two_does_not_advance_without_wiring() {
        let mut app = setup();
        app.insert_resource(PlayerLevel(2));
        add_cp(&mut app, 5000.0);
        assert_eq!(app.world().resource::<PlayerLevel>().0, 2);
        assert!(app.world().resource::<LevelUps>().0.is_empty());
    }

    #[test]
    fn test_invalid_amount_is_a_no_op() {
        let mut app = setup();
        add_cp(&mut app, -50.0);
        assert_eq!(*app.world().resource::<Wallet>(), Wallet::default());
    }

    #[test]
    fn test_back_to_back_credits_accumulate() {
        let mut app = setup();
        app.world_mut().trigger(AddComputationPoints::new(2.0));
        app.world_mut().trigger(AddComputationPoints::new(1.0));
        app.update();
        assert_eq!(app.world().resource::<Wallet>().cp, 13.0);
    }
}

use {
    bevy::prelude::*,
    upgrades_assets::{UPGRADES, UpgradeDefinition, next_cost},
    wallet::{PlayerLevel, Wallet},
};

pub mod systems;

/// Mutable side of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeState {
    pub definition: &'static UpgradeDefinition,
    pub level: u32,
    /// Price of the next purchase.
    pub cost: u32,
}

impl UpgradeState {
    pub fn new(definition: &'static UpgradeDefinition) -> Self {
        Self {
            definition,
            level: 0,
            cost: definition.base_cost,
        }
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.definition.max_level
    }

    pub fn is_unlocked(&self, player_level: u32) -> bool {
        player_level >= self.definition.required_player_level
    }
}

/// What the upgrade panel needs to render a buy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeStatus {
    pub can_afford: bool,
    pub unlocked: bool,
    pub maxed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseRejected {
    UnknownUpgrade,
    Locked,
    MaxLevel,
    InsufficientCp,
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub id: &'static str,
    pub new_level: u32,
    pub paid: u32,
    pub next_cost: u32,
}

/// Upgrade levels and prices for the session, in catalog order.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Upgrades {
    entries: Vec<UpgradeState>,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            entries: UPGRADES.iter().map(UpgradeState::new).collect(),
        }
    }
}

impl Upgrades {
    pub fn get(&self, id: &str) -> Option<&UpgradeState> {
        self.entries.iter().find(|u| u.definition.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeState> {
        self.entries.iter()
    }

    pub fn status(&self, id: &str, wallet: &Wallet, player_level: u32) -> Option<UpgradeStatus> {
        let upgrade = self.get(id)?;
        Some(UpgradeStatus {
            can_afford: wallet.can_afford(upgrade.cost as f64),
            unlocked: upgrade.is_unlocked(player_level),
            maxed: upgrade.is_maxed(),
        })
    }

    /// Buys one level of `id`. On rejection neither the wallet nor the upgrade changes.
    pub fn purchase(
        &mut self,
        id: &str,
        wallet: &mut Wallet,
        player_level: u32,
    ) -> Result<Purchase, PurchaseRejected> {
        let upgrade = self
            .entries
            .iter_mut()
            .find(|u| u.definition.id == id)
            .ok_or(PurchaseRejected::UnknownUpgrade)?;

        if !upgrade.is_unlocked(player_level) {
            return Err(PurchaseRejected::Locked);
        }
        if upgrade.is_maxed() {
            return Err(PurchaseRejected::MaxLevel);
        }
        let paid = upgrade.cost;
        if !wallet.spend_cp(paid as f64) {
            return Err(PurchaseRejected::InsufficientCp);
        }

        upgrade.level += 1;
        upgrade.cost = next_cost(paid);
        Ok(Purchase {
            id: upgrade.definition.id,
            new_level: upgrade.level,
            paid,
            next_cost: upgrade.cost,
        })
    }
}

pub struct UpgradesPlugin;

impl Plugin for UpgradesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Upgrades>()
            .init_resource::<Wallet>()
            .init_resource::<PlayerLevel>()
            .add_observer(systems::purchase_upgrade);
    }
}

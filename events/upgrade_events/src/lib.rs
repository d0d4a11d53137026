use bevy::prelude::*;

/// Represents a request to buy one level of an upgrade.
///
/// This **Observer** event (triggered via `commands.trigger`) is the bridge between
/// the upgrade panel and the upgrade economy.
///
/// # Observers
/// - `upgrades::systems::purchase_upgrade`: checks the id, the player level, the
///   upgrade's max level and the CP balance, then debits the wallet and raises the cost.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PurchaseUpgradeRequest(
    /// The catalog id of the upgrade (matches `UpgradeDefinition.id`).
    pub String,
);

/// Fired after a successful purchase. This is the hook for upgrade effects.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct UpgradePurchased {
    pub upgrade_id: String,
    pub new_level: u32,
    pub next_cost: u32,
}

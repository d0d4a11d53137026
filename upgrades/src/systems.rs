use {
    crate::Upgrades,
    bevy::prelude::*,
    upgrade_events::{PurchaseUpgradeRequest, UpgradePurchased},
    wallet::{PlayerLevel, Wallet},
};

/// Handles a buy request; rejections are logged and dropped.
pub fn purchase_upgrade(
    trigger: On<PurchaseUpgradeRequest>,
    mut upgrades: ResMut<Upgrades>,
    mut wallet: ResMut<Wallet>,
    level: Res<PlayerLevel>,
    mut commands: Commands,
) {
    let id = &trigger.event().0;
    match upgrades.purchase(id, &mut wallet, level.0) {
        Ok(purchase) => {
            info!(
                "Purchased upgrade '{}' (level {}) for {} CP",
                purchase.id, purchase.new_level, purchase.paid
            );
            commands.trigger(UpgradePurchased {
                upgrade_id: purchase.id.to_string(),
                new_level: purchase.new_level,
                next_cost: purchase.next_cost,
            });
        }
        Err(reason) => {
            debug!("Rejected purchase of '{}': {:?}", id, reason);
        }
    }
}

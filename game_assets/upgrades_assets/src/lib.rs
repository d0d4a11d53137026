/// Immutable description of a purchasable upgrade in its unbought state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Price of the first purchase.
    pub base_cost: u32,
    pub max_level: u32,
    pub required_player_level: u32,
}

/// Growth factor applied to an upgrade's price after each purchase.
pub const COST_GROWTH: f64 = 1.5;

pub static UPGRADES: [UpgradeDefinition; 3] = [
    UpgradeDefinition {
        id: "nodeCapacity",
        name: "Neural Capacity",
        description: "Increase the number of connections you can maintain",
        base_cost: 20,
        max_level: 5,
        required_player_level: 1,
    },
    UpgradeDefinition {
        id: "connectionEfficiency",
        name: "Connection Efficiency",
        description: "Improve CP generation from connections",
        base_cost: 30,
        max_level: 5,
        required_player_level: 1,
    },
    UpgradeDefinition {
        id: "loopFormation",
        name: "Loop Formation",
        description: "Ability to create recursive neural patterns",
        base_cost: 50,
        max_level: 3,
        required_player_level: 2,
    },
];

/// Price following `cost` once it has been paid: `floor(cost * 1.5)`.
pub fn next_cost(cost: u32) -> u32 {
    (cost as f64 * COST_GROWTH).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cost_floors() {
        assert_eq!(next_cost(20), 30);
        assert_eq!(next_cost(30), 45);
        assert_eq!(next_cost(45), 67);
        assert_eq!(next_cost(1), 1);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, a) in UPGRADES.iter().enumerate() {
            assert!(UPGRADES[i + 1..].iter().all(|b| b.id != a.id));
        }
    }
}

use {
    bevy::prelude::*, game_config::GameConfig, interaction::InteractionPlugin,
    save_load::SaveLoadPlugin, states::GameState, story::StoryPlugin,
    system_schedule::SystemSchedulePlugin, upgrades::UpgradesPlugin, wallet::WalletPlugin,
};

/// Wires the whole engine together. The config is inserted before any plugin
/// so every `init_resource::<GameConfig>()` sees it.
#[derive(Default)]
pub struct CorePlugin {
    pub config: GameConfig,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_state::<GameState>()
            .add_plugins((
                SystemSchedulePlugin,
                WalletPlugin,
                StoryPlugin,
                InteractionPlugin,
                UpgradesPlugin,
                SaveLoadPlugin,
            ));
    }
}

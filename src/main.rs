use {
    bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin},
    core::CorePlugin,
    game_config::GameConfig,
    std::time::Duration,
};

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin {
            filter: "error,wallet=debug,\
                interaction=debug,\
                upgrades=debug,\
                save_load=trace,\
                story=debug"
                .into(),
            level: bevy::log::Level::TRACE,
            ..Default::default()
        })
        .add_plugins(StatesPlugin)
        .add_plugins(CorePlugin {
            config: GameConfig::from_env(),
        })
        .run();
}

mod patrol;

use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use follow_controller::{
    scene::{SceneConfig, ScenePlugin},
    scripts::ScriptSet,
    FollowPlugin,
};

use patrol::PatrolPlugin;

fn main() {
    // optional path to a .tmx scene, defaults to assets/follow.tmx
    let config = std::env::args()
        .nth(1)
        .map(SceneConfig::from_path)
        .unwrap_or_default();

    let mut app = App::new();

    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
        Duration::from_secs_f64(1.0 / 60.0),
    )))
    .add_plugins(LogPlugin::default())
    .insert_resource(config);

    app.add_plugins((FollowPlugin, ScenePlugin, PatrolPlugin))
        .configure_set(Update, ScriptSet::Controllers.after(patrol::PatrolSet));

    app.run();
}

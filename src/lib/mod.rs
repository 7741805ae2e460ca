use bevy::prelude::{App, Plugin};

pub mod components;
pub mod scene;
pub mod scripts;
pub mod tags;

use self::components::Tag;
use self::scripts::ScriptsPlugin;

// Everything needed to run scripted entities, without any scene data
pub struct FollowPlugin;

impl Plugin for FollowPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Tag>().add_plugins(ScriptsPlugin);
    }
}

use std::marker::PhantomData;

use anyhow::{bail, Result};
use bevy::{ecs::system::EntityCommands, log, prelude::*};
use tiled::Properties;

use crate::scene::{float_property, string_property};

use self::controller::{controller_on_create, controller_on_update, resolve_missing_player};

pub mod controller;

pub use self::controller::BasicController;

// Marks an entity as running script T
#[derive(Debug, Component)]
pub struct Script<T> {
    script: PhantomData<T>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            script: PhantomData,
        }
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptSet {
    Controllers,
}

pub struct ScriptsPlugin;

impl Plugin for ScriptsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BasicController>().add_systems(
            Update,
            (
                controller_on_create,
                resolve_missing_player,
                controller_on_update,
            )
                .chain()
                .in_set(ScriptSet::Controllers),
        );
    }
}

/// Attaches the script called `script_name` to the entity, configured from
/// `properties`. Unknown script names are an error.
pub fn handle_add_script(
    script_name: &str,
    properties: &Properties,
    cmd: &mut EntityCommands,
) -> Result<()> {
    match script_name {
        "basic_controller" | "BasicController" => {
            let mut controller = BasicController::default();

            if let Some(tag) = string_property(properties, "target_tag") {
                controller.target_tag = tag.to_owned();
            }
            if let Some(distance) = float_property(properties, "distance_from_player") {
                controller.distance_from_player = distance;
            }
            if let Some(min_height) = float_property(properties, "min_height") {
                controller.min_height = min_height;
            }
            if let Some(speed) = float_property(properties, "speed") {
                controller.speed = speed;
            }

            cmd.insert((Script::<BasicController>::default(), controller));
            log::info!("Added basic_controller script to {:?}", cmd.id());
        }
        _ => bail!("Unknown script: {}", script_name),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::CommandQueue;
    use tiled::PropertyValue;

    use super::*;

    fn add_script(world: &mut World, name: &str, properties: &Properties) -> Result<Entity> {
        let mut queue = CommandQueue::default();
        let result = {
            let mut commands = Commands::new(&mut queue, world);
            let mut cmd = commands.spawn_empty();
            handle_add_script(name, properties, &mut cmd).map(|_| cmd.id())
        };
        queue.apply(world);
        result
    }

    #[test]
    fn configures_controller_from_properties() {
        let mut world = World::new();
        let properties = Properties::from([
            (
                "target_tag".to_string(),
                PropertyValue::StringValue("Hero".to_string()),
            ),
            (
                "distance_from_player".to_string(),
                PropertyValue::FloatValue(-5.0),
            ),
            ("min_height".to_string(), PropertyValue::IntValue(4)),
        ]);

        let entity = add_script(&mut world, "basic_controller", &properties).unwrap();

        let controller = world.get::<BasicController>(entity).unwrap();
        assert_eq!(controller.target_tag, "Hero");
        assert_eq!(controller.distance_from_player, -5.0);
        assert_eq!(controller.min_height, 4.0);
        assert_eq!(controller.player, None);
        assert!(world.get::<Script<BasicController>>(entity).is_some());
    }

    #[test]
    fn missing_properties_keep_defaults() {
        let mut world = World::new();

        let entity = add_script(&mut world, "BasicController", &Properties::new()).unwrap();

        let controller = world.get::<BasicController>(entity).unwrap();
        assert_eq!(controller.target_tag, "Player");
        assert_eq!(controller.distance_from_player, 20.0);
        assert_eq!(controller.min_height, 2.0);
    }

    #[test]
    fn unknown_script_is_an_error() {
        let mut world = World::new();

        let err = add_script(&mut world, "teleporter", &Properties::new()).unwrap_err();

        assert!(err.to_string().contains("teleporter"));
    }
}

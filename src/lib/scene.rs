use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy::{log, prelude::*};
use tiled::{LayerType, Loader, Map as TiledMap, ObjectShape, Properties, PropertyValue};

use crate::components::Tag;
use crate::scripts::handle_add_script;

// Which Tiled map to load at startup
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub assets_dir: PathBuf,
    pub scene: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            scene: "follow.tmx".to_string(),
        }
    }
}

impl SceneConfig {
    // Splits a path to a .tmx file into directory and file name
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let assets_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let scene = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { assets_dir, scene }
    }

    pub fn path(&self) -> PathBuf {
        self.assets_dir.join(&self.scene)
    }
}

// Set on everything spawned from a scene file
#[derive(Component, Debug)]
pub struct SceneObject {
    pub id: u32,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .add_systems(Startup, setup_scene);
    }
}

fn setup_scene(mut commands: Commands, config: Res<SceneConfig>) {
    match load_scene(config.path()) {
        Ok(map) => {
            let spawned = spawn_scene_objects(&mut commands, &map);
            log::info!("Loaded scene {:?} with {} objects", config.scene, spawned);
        }
        Err(err) => log::error!("{:#}", err),
    }
}

pub fn load_scene(path: impl AsRef<Path>) -> Result<TiledMap> {
    let path = path.as_ref();
    let mut loader = Loader::new();

    loader
        .load_tmx_map(path)
        .with_context(|| format!("Could not load scene {}", path.display()))
}

/// Spawns an entity for every point object in the map's object layers and
/// returns how many were spawned.
///
/// Object properties:
/// - `tag` (string) inserts a [`Tag`]
/// - `script` (string) attaches a script, the other properties configure it
/// - `z` (float) elevation, defaults to 0
pub fn spawn_scene_objects(commands: &mut Commands, map: &TiledMap) -> usize {
    let map_height = map.height as f32 * map.tile_height as f32;
    let mut spawned = 0;

    map.layers()
        .filter_map(|layer| match layer.layer_type() {
            LayerType::Objects(layer) => Some(layer),
            _ => None,
        })
        .flat_map(|layer| layer.objects())
        .filter(|object| matches!(object.shape, ObjectShape::Point(_, _)))
        .for_each(|object| {
            let z = float_property(&object.properties, "z").unwrap_or(0.);
            let transform = Transform::from_xyz(
                object.x,
                // flipping the y coordinate to match bevy's coordinate system
                map_height - object.y,
                z,
            );

            let mut cmd = commands.spawn((
                Name::new(object.name.clone()),
                SceneObject { id: object.id() },
                SpatialBundle {
                    transform,
                    ..default()
                },
            ));

            if let Some(tag) = string_property(&object.properties, "tag") {
                cmd.insert(Tag::new(tag));
            }

            if let Some(script) = string_property(&object.properties, "script") {
                if let Err(err) = handle_add_script(script, &object.properties, &mut cmd) {
                    log::error!("Scene object {:?}: {:#}", object.name, err);
                }
            }

            log::info!(
                "Spawning scene object {:?} at {:?} as {:?}",
                object.name,
                transform.translation,
                cmd.id()
            );
            spawned += 1;
        });

    spawned
}

pub fn string_property<'a>(properties: &'a Properties, name: &str) -> Option<&'a str> {
    match properties.get(name)? {
        PropertyValue::StringValue(value) => Some(value.as_str()),
        _ => None,
    }
}

// Int properties are accepted too, Tiled writes whole numbers typed as int
pub fn float_property(properties: &Properties, name: &str) -> Option<f32> {
    match properties.get(name)? {
        PropertyValue::FloatValue(value) => Some(*value),
        PropertyValue::IntValue(value) => Some(*value as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::CommandQueue;

    use super::*;
    use crate::components::PLAYER_TAG;
    use crate::scripts::BasicController;

    #[test]
    fn config_from_path() {
        let config = SceneConfig::from_path("levels/intro.tmx");

        assert_eq!(config.assets_dir, PathBuf::from("levels"));
        assert_eq!(config.scene, "intro.tmx");
        assert_eq!(config.path(), PathBuf::from("levels/intro.tmx"));
    }

    #[test]
    fn missing_scene_names_the_file() {
        let err = load_scene("assets/does_not_exist.tmx").unwrap_err();

        assert!(format!("{:#}", err).contains("does_not_exist.tmx"));
    }

    #[test]
    fn spawns_objects_from_the_default_scene() {
        let map = load_scene(SceneConfig::default().path()).unwrap();
        let mut world = World::new();
        let mut queue = CommandQueue::default();

        let spawned = {
            let mut commands = Commands::new(&mut queue, &world);
            spawn_scene_objects(&mut commands, &map)
        };
        queue.apply(&mut world);

        assert_eq!(spawned, 4);

        let mut tagged = world.query::<(&Tag, &Transform)>();
        let (_, player) = tagged
            .iter(&world)
            .find(|(tag, _)| tag.is(PLAYER_TAG))
            .unwrap();
        assert_eq!(player.translation, Vec3::new(64.0, 224.0, 1.5));

        let mut controllers = world.query::<(&Name, &BasicController)>();
        let mut controllers: Vec<_> = controllers
            .iter(&world)
            .map(|(name, controller)| (name.as_str().to_owned(), controller.clone()))
            .collect();
        controllers.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(controllers.len(), 2);
        assert_eq!(controllers[0].0, "Camera");
        assert_eq!(controllers[0].1.distance_from_player, 20.0);
        assert_eq!(controllers[1].0, "Drone");
        assert_eq!(controllers[1].1.distance_from_player, -40.0);
        assert_eq!(controllers[1].1.min_height, 2.0);
    }

    #[test]
    fn unknown_script_still_spawns_the_object() {
        let map = load_scene("tests/fixtures/unknown_script.tmx").unwrap();
        let mut world = World::new();
        let mut queue = CommandQueue::default();

        let spawned = {
            let mut commands = Commands::new(&mut queue, &world);
            spawn_scene_objects(&mut commands, &map)
        };
        queue.apply(&mut world);

        assert_eq!(spawned, 1);

        let mut objects = world.query::<(Entity, &SceneObject, &Tag, &Transform)>();
        let (entity, object, tag, transform) = objects.single(&world);
        assert_eq!(object.id, 7);
        assert_eq!(tag, &Tag::new("Gate"));
        assert_eq!(transform.translation, Vec3::new(32.0, 16.0, 0.0));
        assert!(world.get::<BasicController>(entity).is_none());
    }

    #[test]
    fn map_taller_than_u32_pixels() {
        let map = load_scene("tests/fixtures/huge_map.tmx").unwrap();
        let mut world = World::new();
        let mut queue = CommandQueue::default();

        {
            let mut commands = Commands::new(&mut queue, &world);
            spawn_scene_objects(&mut commands, &map);
        }
        queue.apply(&mut world);

        let mut objects = world.query::<(&Tag, &Transform)>();
        let (_, transform) = objects.single(&world);
        assert_eq!(transform.translation, Vec3::new(0.0, 1.0e10, 0.0));
    }
}

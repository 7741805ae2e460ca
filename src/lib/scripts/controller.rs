use bevy::{log, prelude::*};

use crate::components::{Tag, PLAYER_TAG};
use crate::tags::find_entity_by_tag;

use super::Script;

pub const DEFAULT_DISTANCE_FROM_PLAYER: f32 = 20.0;
pub const DEFAULT_MIN_HEIGHT: f32 = 2.0;

/// Keeps its entity trailing the entity tagged `target_tag`.
///
/// The player handle is resolved once when the script is attached. If no
/// tagged entity exists yet, or the resolved one goes away, resolution is
/// retried every frame and the entity stays where it is meanwhile.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct BasicController {
    pub target_tag: String,
    // Offset added to the player's z
    pub distance_from_player: f32,
    // Lowest z the controller is allowed to reach
    pub min_height: f32,
    // Configurable, but movement snaps to the player and never reads it
    pub speed: f32,
    pub player: Option<Entity>,
}

impl Default for BasicController {
    fn default() -> Self {
        Self {
            target_tag: PLAYER_TAG.to_string(),
            distance_from_player: DEFAULT_DISTANCE_FROM_PLAYER,
            min_height: DEFAULT_MIN_HEIGHT,
            speed: 0.0,
            player: None,
        }
    }
}

// Tagged entities a controller can lock onto: they need a transform to
// follow and must not run the controller themselves
type Followable = (With<Transform>, Without<Script<BasicController>>);

/// Where a controller sits for a player at `player`:
/// `(x, y, max(z + distance_from_player, min_height))`.
pub fn follow_translation(player: Vec3, distance_from_player: f32, min_height: f32) -> Vec3 {
    Vec3::new(
        player.x,
        player.y,
        (player.z + distance_from_player).max(min_height),
    )
}

// Runs once for every freshly attached controller script
pub fn controller_on_create(
    mut created: Query<(Entity, &mut BasicController), Added<Script<BasicController>>>,
    tagged: Query<(Entity, &Tag), Followable>,
) {
    for (entity, mut controller) in created.iter_mut() {
        let player = find_entity_by_tag(tagged.iter(), &controller.target_tag);
        controller.player = player;

        match player {
            Some(player) => log::info!(
                "Controller {:?} follows {:?} (tag {:?})",
                entity,
                player,
                controller.target_tag
            ),
            None => log::warn!(
                "Controller {:?} found no entity tagged {:?}, will keep looking",
                entity,
                controller.target_tag
            ),
        }
    }
}

// Controllers without a player look again each frame
pub fn resolve_missing_player(
    mut controllers: Query<(Entity, Ref<Script<BasicController>>, &mut BasicController)>,
    tagged: Query<(Entity, &Tag), Followable>,
) {
    for (entity, script, mut controller) in controllers.iter_mut() {
        // fresh scripts are handled by controller_on_create
        if script.is_added() || controller.player.is_some() {
            continue;
        }

        if let Some(player) = find_entity_by_tag(tagged.iter(), &controller.target_tag) {
            log::info!(
                "Controller {:?} found {:?} (tag {:?})",
                entity,
                player,
                controller.target_tag
            );
            controller.player = Some(player);
        }
    }
}

// Moves every controller behind its player
pub fn controller_on_update(
    mut controllers: Query<
        (Entity, &mut Transform, &mut BasicController),
        With<Script<BasicController>>,
    >,
    players: Query<&Transform, Without<Script<BasicController>>>,
) {
    for (entity, mut transform, mut controller) in controllers.iter_mut() {
        let Some(player) = controller.player else {
            continue;
        };

        match players.get(player) {
            Ok(player_transform) => {
                transform.translation = follow_translation(
                    player_transform.translation,
                    controller.distance_from_player,
                    controller.min_height,
                );

                #[cfg(feature = "verbose-output")]
                log::info!("Controller {:?} moved to {:?}", entity, transform.translation);
            }
            Err(_) => {
                log::warn!(
                    "Controller {:?} lost its player {:?}, looking for {:?} again",
                    entity,
                    player,
                    controller.target_tag
                );
                controller.player = None;
            }
        }
    }
}

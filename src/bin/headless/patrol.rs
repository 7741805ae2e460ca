use bevy::{log, prelude::*};
use follow_controller::{
    components::{Tag, PLAYER_TAG},
    scene::SceneObject,
    scripts::{BasicController, Script},
};

// Circles the tagged player around where it spawned
#[derive(Component, Debug)]
pub struct Patrol {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatrolSet;

#[derive(Resource)]
pub struct ReportTimer(pub Timer);

pub struct PatrolPlugin;

impl Plugin for PatrolPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ReportTimer(Timer::from_seconds(1., TimerMode::Repeating)))
            .add_systems(Update, (start_patrol, patrol).chain().in_set(PatrolSet))
            .add_systems(PostUpdate, report_controllers);
    }
}

fn start_patrol(
    mut commands: Commands,
    players: Query<(Entity, &Tag, &Transform), (Added<Tag>, Without<Script<BasicController>>)>,
) {
    for (entity, tag, transform) in players.iter() {
        if !tag.is(PLAYER_TAG) {
            continue;
        }

        log::info!("Player {:?} starts patrolling", entity);
        commands.entity(entity).insert(Patrol {
            center: transform.translation,
            radius: 50.,
        });
    }
}

fn patrol(time: Res<Time>, mut players: Query<(&mut Transform, &Patrol)>) {
    let angle = time.elapsed_seconds();

    for (mut transform, patrol) in players.iter_mut() {
        transform.translation = patrol.center
            + Vec3::new(
                angle.cos() * patrol.radius,
                angle.sin() * patrol.radius,
                // bob up and down so the height floor kicks in
                (angle * 0.5).sin() * patrol.radius,
            );
    }
}

// Logs where every controller is once per second
fn report_controllers(
    time: Res<Time>,
    mut timer: ResMut<ReportTimer>,
    controllers: Query<(
        Entity,
        Option<&Name>,
        Option<&SceneObject>,
        &Transform,
        &BasicController,
    )>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    for (entity, name, object, transform, controller) in controllers.iter() {
        log::info!(
            "{} {:?} (scene object {:?}) at {:?} following {:?}",
            name.map(Name::as_str).unwrap_or("controller"),
            entity,
            object.map(|object| object.id),
            transform.translation,
            controller.player
        );
    }
}

mod player;

use bevy::prelude::*;
use follow_controller::{
    components::{Tag, PLAYER_TAG},
    scripts::{BasicController, Script, ScriptSet},
    FollowPlugin,
};

use player::{player_movement, Player};

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins)
        .add_plugins(FollowPlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                player_movement.before(ScriptSet::Controllers),
                bevy::window::close_on_esc,
            ),
        );

    #[cfg(debug_assertions)]
    {
        app.add_plugins(bevy_inspector_egui::quick::WorldInspectorPlugin::new());
    }

    app.run();
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // backdrop facing the camera so movement is visible
    commands.spawn(PbrBundle {
        mesh: meshes.add(Mesh::from(shape::Quad::new(Vec2::splat(200.)))),
        material: materials.add(Color::rgb(0.3, 0.5, 0.3).into()),
        transform: Transform::from_xyz(0., 0., -1.),
        ..default()
    });

    commands.spawn((
        Name::new("Player"),
        Player,
        Tag::new(PLAYER_TAG),
        PbrBundle {
            mesh: meshes.add(Mesh::from(shape::Cube { size: 1. })),
            material: materials.add(Color::rgb(0.8, 0.3, 0.3).into()),
            transform: Transform::from_xyz(0., 0., 0.5),
            ..default()
        },
    ));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 3000.,
            range: 100.,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(4., 8., 12.),
        ..default()
    });

    // camera starts anywhere, the controller puts it behind the player
    commands.spawn((
        Name::new("Follow camera"),
        Camera3dBundle::default(),
        Script::<BasicController>::default(),
        BasicController::default(),
    ));
}

use bevy::prelude::{Component, Input, KeyCode, Query, Res, Time, Transform, Vec3, With};

#[derive(Component)]
pub struct Player;

// units per second
const WALK_SPEED: f32 = 5.;

pub fn player_movement(
    keyboard_input: Res<Input<KeyCode>>,
    time: Res<Time>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let mut speed = WALK_SPEED;

    if keyboard_input.pressed(KeyCode::ShiftLeft) {
        speed *= 2.;
    }

    let mut direction = Vec3::ZERO;
    if keyboard_input.pressed(KeyCode::A) {
        direction.x -= 1.;
    }
    if keyboard_input.pressed(KeyCode::D) {
        direction.x += 1.;
    }
    if keyboard_input.pressed(KeyCode::W) {
        direction.y += 1.;
    }
    if keyboard_input.pressed(KeyCode::S) {
        direction.y -= 1.;
    }
    // Q / E move towards and away from the camera
    if keyboard_input.pressed(KeyCode::Q) {
        direction.z -= 1.;
    }
    if keyboard_input.pressed(KeyCode::E) {
        direction.z += 1.;
    }

    for mut transform in query.iter_mut() {
        transform.translation += direction.normalize_or_zero() * speed * time.delta_seconds();
    }
}

use bevy::prelude::*;

use super::config::{GameConfig, GameConfigHandle};
use super::spawner::CurrentArena;

pub struct ArenaCameraPlugin;

#[derive(Component)]
pub struct ArenaCamera;

impl Plugin for ArenaCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, (recenter_camera, move_camera));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, ArenaCamera));
}

/// Snaps the camera to the anchor of a freshly generated arena.
fn recenter_camera(
    current: Res<CurrentArena>,
    mut query: Query<&mut Transform, With<ArenaCamera>>,
) {
    if !current.is_changed() {
        return;
    }
    let Some(arena) = &current.0 else { return };
    let Ok(mut transform) = query.single_mut() else { return };

    transform.translation.x = arena.camera_anchor.x;
    transform.translation.y = arena.camera_anchor.y;
}

/// Keyboard pan and zoom, with bindings from the hot-reloadable config.
fn move_camera(
    mut query: Query<&mut Transform, With<ArenaCamera>>,
    keys: Res<ButtonInput<KeyCode>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    time: Res<Time>,
) {
    let Some(config) = game_configs.get(&config_handle.0) else { return };
    let Ok(mut transform) = query.single_mut() else { return };

    let mut velocity = Vec2::ZERO;
    if keys.pressed(config.key_camera_up) {
        velocity.y += 1.0;
    }
    if keys.pressed(config.key_camera_down) {
        velocity.y -= 1.0;
    }
    if keys.pressed(config.key_camera_left) {
        velocity.x -= 1.0;
    }
    if keys.pressed(config.key_camera_right) {
        velocity.x += 1.0;
    }

    if velocity.length_squared() > 0.0 {
        let delta = velocity.normalize() * config.camera_speed * time.delta_secs();
        transform.translation += delta.extend(0.0);
    }

    // Zoom by scaling the camera transform; scale > 1 shows more of the map.
    let mut zoom = 0.0;
    if keys.pressed(config.key_camera_zoom_in) {
        zoom -= 1.0;
    }
    if keys.pressed(config.key_camera_zoom_out) {
        zoom += 1.0;
    }
    if zoom != 0.0 {
        let factor = 1.0 + zoom * config.camera_zoom_speed * time.delta_secs();
        let scale = (transform.scale.x * factor).clamp(0.25, 8.0);
        transform.scale = Vec3::new(scale, scale, 1.0);
    }
}

use bevy::prelude::*;

pub mod arena;
pub mod camera;
pub mod config;
pub mod grid;
pub mod regions;
pub mod repair;
pub mod spawner;

use camera::ArenaCameraPlugin;
use config::GameConfigPlugin;
use spawner::ArenaPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GameConfigPlugin,
            ArenaCameraPlugin,
            ArenaPlugin,
        ));
    }
}

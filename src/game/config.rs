use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};

/// Static generation parameters loaded once at startup. A fixed seed makes
/// every generation pass reproducible, so these must not change while the
/// app is running.
#[derive(Resource, Deserialize, Serialize, Clone, Debug)]
pub struct ArenaConfig {
    /// Inclusive interior size ranges, in cells.
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,

    /// Inclusive agent count range.
    pub min_agents: usize,
    pub max_agents: usize,

    /// Probability in [0, 1] that an interior cell starts as a wall.
    pub walls_density: f32,

    /// Regenerate the arena every this many simulation steps; 0 disables
    /// periodic regeneration.
    pub regenerate_period: u64,

    /// Seed for the generator RNG. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            min_width: 8,
            max_width: 14,
            min_height: 8,
            max_height: 14,
            min_agents: 2,
            max_agents: 6,
            walls_density: 0.25,
            regenerate_period: 0,
            rng_seed: None,
        }
    }
}

/// Runtime configuration that can be hot-reloaded during gameplay:
/// key bindings and camera tuning. None of it affects generation output.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug)]
pub struct GameConfig {
    pub key_regenerate: KeyCode,

    pub key_camera_up: KeyCode,
    pub key_camera_down: KeyCode,
    pub key_camera_left: KeyCode,
    pub key_camera_right: KeyCode,
    pub key_camera_zoom_in: KeyCode,
    pub key_camera_zoom_out: KeyCode,

    pub camera_speed: f32,
    pub camera_zoom_speed: f32,
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["game_config.ron"]))
            // PreStartup so every Startup system can rely on ArenaConfig.
            .add_systems(PreStartup, (load_arena_config, setup_runtime_config).chain());
    }
}

/// Load static arena configuration synchronously at startup. Generation
/// systems depend on these values from their very first run.
fn load_arena_config(mut commands: Commands) {
    let arena_config_path = "assets/arena_config.ron";

    match std::fs::read_to_string(arena_config_path) {
        Ok(contents) => {
            match ron::from_str::<ArenaConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded arena config from {}", arena_config_path);
                    commands.insert_resource(config);
                }
                Err(e) => {
                    error!("Failed to parse arena config: {}", e);
                    error!("Using default ArenaConfig");
                    commands.insert_resource(ArenaConfig::default());
                }
            }
        }
        Err(e) => {
            error!("Failed to read {}: {}", arena_config_path, e);
            error!("Using default ArenaConfig");
            commands.insert_resource(ArenaConfig::default());
        }
    }
}

/// Load runtime configuration asynchronously (can be hot-reloaded).
fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("game_config.ron");
    commands.insert_resource(GameConfigHandle(handle));
}

use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::arena::{build_arena, Arena, CELL_SIZE};
use super::config::{ArenaConfig, GameConfig, GameConfigHandle};

const WALL_COLOR: Color = Color::srgb(0.45, 0.42, 0.4);
const AGENT_COLOR: Color = Color::srgb(0.2, 0.6, 0.9);

pub struct ArenaPlugin;

/// The artifact of the latest successful generation pass. Written only by
/// `handle_regeneration`; every other system reads it. `None` until the
/// first generation succeeds.
#[derive(Resource, Default)]
pub struct CurrentArena(pub Option<Arena>);

/// Elapsed simulation steps, advanced once per fixed tick.
#[derive(Resource, Default)]
pub struct SimStep(pub u64);

/// RNG driving all generation randomness. Seeded from config for
/// reproducible runs, from entropy otherwise.
#[derive(Resource)]
pub struct GeneratorRng(pub SmallRng);

/// Step count at which the next periodic regeneration fires.
#[derive(Resource, Default)]
struct NextRegenerateStep(u64);

/// Request to rebuild the arena, from any trigger source.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct RegenerateArena;

/// Root entity of the spawned environment; walls and agents are children,
/// so one despawn tears the whole generation down.
#[derive(Component)]
pub struct EnvironmentRoot;

#[derive(Component)]
pub struct Wall;

#[derive(Component)]
pub struct Agent {
    pub id: usize,
}

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentArena>()
            .init_resource::<SimStep>()
            .init_resource::<NextRegenerateStep>()
            .add_message::<RegenerateArena>()
            .add_systems(Startup, setup_generator)
            .add_systems(FixedUpdate, count_steps)
            .add_systems(Update, (trigger_regeneration, handle_regeneration).chain());
    }
}

/// Seeds the generator RNG and requests the initial arena.
fn setup_generator(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    mut events: MessageWriter<RegenerateArena>,
) {
    let seed = match config.rng_seed {
        Some(seed) => {
            info!("Generator seeded from config: {}", seed);
            seed
        }
        None => {
            let seed = rand::rng().next_u64();
            info!("Generator seeded from entropy: {}", seed);
            seed
        }
    };
    commands.insert_resource(GeneratorRng(SmallRng::seed_from_u64(seed)));
    commands.insert_resource(NextRegenerateStep(config.regenerate_period));

    events.write(RegenerateArena);
}

fn count_steps(mut step: ResMut<SimStep>) {
    step.0 += 1;
}

/// Fires regeneration on the configured key release or whenever the step
/// counter passes the periodic threshold.
fn trigger_regeneration(
    keys: Res<ButtonInput<KeyCode>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    arena_config: Res<ArenaConfig>,
    step: Res<SimStep>,
    mut next: ResMut<NextRegenerateStep>,
    mut events: MessageWriter<RegenerateArena>,
) {
    if let Some(config) = game_configs.get(&config_handle.0) {
        if keys.just_released(config.key_regenerate) {
            info!("Manual regeneration requested");
            events.write(RegenerateArena);
        }
    }

    if arena_config.regenerate_period > 0 && step.0 > next.0 {
        info!("Periodic regeneration at step {}", step.0);
        events.write(RegenerateArena);
        next.0 += arena_config.regenerate_period;
    }
}

/// Rebuilds the arena and replaces the spawned environment.
///
/// The previous environment is torn down only after generation succeeds, so
/// a configuration error leaves the last valid arena on screen and in
/// `CurrentArena`.
fn handle_regeneration(
    mut commands: Commands,
    mut events: MessageReader<RegenerateArena>,
    config: Res<ArenaConfig>,
    mut rng: ResMut<GeneratorRng>,
    mut current: ResMut<CurrentArena>,
    roots: Query<Entity, With<EnvironmentRoot>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear(); // Coalesce multiple triggers into one rebuild

    let gen_start = std::time::Instant::now();
    let arena = match build_arena(&config, &mut rng.0) {
        Ok(arena) => arena,
        Err(e) => {
            error!("Arena generation failed: {}", e);
            return;
        }
    };

    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    spawn_environment(&mut commands, &arena);

    info!(
        "Arena rebuilt in {:?}: {}x{}, {} walls, {} agents",
        gen_start.elapsed(),
        arena.width,
        arena.height,
        arena.walls.wall_count() + arena.border.len(),
        arena.agents.len()
    );
    current.0 = Some(arena);
}

fn spawn_environment(commands: &mut Commands, arena: &Arena) {
    commands
        .spawn((
            EnvironmentRoot,
            Name::new("Environment"),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for &position in &arena.border {
                spawn_wall(parent, position);
            }
            for y in 0..arena.height {
                for x in 0..arena.width {
                    if arena.walls.is_wall(x, y) {
                        spawn_wall(parent, super::arena::cell_to_world(x, y));
                    }
                }
            }
            for agent in &arena.agents {
                parent.spawn((
                    Agent { id: agent.id },
                    Name::new(format!("Agent {}", agent.id)),
                    Sprite {
                        color: AGENT_COLOR,
                        custom_size: Some(Vec2::splat(CELL_SIZE * 0.6)),
                        ..default()
                    },
                    Transform::from_translation(agent.position.extend(1.0))
                        .with_rotation(Quat::from_rotation_z(agent.heading_degrees.to_radians())),
                ));
            }
        });
}

fn spawn_wall(parent: &mut ChildSpawnerCommands, position: Vec2) {
    parent.spawn((
        Wall,
        Sprite {
            color: WALL_COLOR,
            custom_size: Some(Vec2::splat(CELL_SIZE)),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
    ));
}

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use super::config::ArenaConfig;
use super::grid::WallGrid;
use super::regions::find_regions;
use super::repair::{connect_regions, RepairReport};

/// Physical size of one grid cell in world units.
pub const CELL_SIZE: f32 = 4.0;

/// Errors that abort a generation attempt before any collaborator sees a
/// new artifact. The previous arena, if any, stays valid.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid {name} range: min {min} exceeds max {max}")]
    InvalidRange {
        name: &'static str,
        min: usize,
        max: usize,
    },
    #[error("cannot place {requested} agents on {available} walkable cells")]
    NotEnoughSpawnPoints { requested: usize, available: usize },
}

/// Placement of one agent: sequential identity, world position, heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSpawn {
    pub id: usize,
    pub position: Vec2,
    pub heading_degrees: f32,
}

/// The artifact of one generation pass. Built as one atomic unit and then
/// read-only; the next pass replaces it wholesale.
#[derive(Clone, Debug)]
pub struct Arena {
    /// Interior dimensions in cells.
    pub width: usize,
    pub height: usize,
    /// Interior wall occupancy after repair.
    pub walls: WallGrid,
    /// World positions of the enclosing border ring.
    pub border: Vec<Vec2>,
    /// World positions of every walkable interior cell, row-major, captured
    /// after repair and before agents were placed.
    pub spawn_points: Vec<Vec2>,
    pub agents: Vec<AgentSpawn>,
    /// Center of the bordered rectangle, for the viewport.
    pub camera_anchor: Vec2,
    pub repair: RepairReport,
}

/// World position of an interior cell. The border ring occupies the
/// surrounding coordinates, so interior cells are offset by one.
pub fn cell_to_world(x: usize, y: usize) -> Vec2 {
    Vec2::new((x as f32 + 1.0) * CELL_SIZE, (y as f32 + 1.0) * CELL_SIZE)
}

/// Runs one full generation pass: sample dimensions, scatter walls, repair
/// connectivity, collect spawn candidates, place agents.
pub fn build_arena<R: Rng>(config: &ArenaConfig, rng: &mut R) -> Result<Arena, GenerationError> {
    validate_range("width", config.min_width, config.max_width)?;
    validate_range("height", config.min_height, config.max_height)?;
    validate_range("agents", config.min_agents, config.max_agents)?;

    let width = rng.random_range(config.min_width..=config.max_width);
    let height = rng.random_range(config.min_height..=config.max_height);

    let border = border_ring(width, height);

    let mut walls = WallGrid::random(width, height, config.walls_density, rng);
    let regions = find_regions(&walls);
    let region_count = regions.len();
    let repair = connect_regions(&mut walls, &regions);
    info!(
        "Generated {}x{} interior: {} regions found, {} merged, {} walls cleared",
        width, height, region_count, repair.regions_merged, repair.walls_cleared
    );

    let mut spawn_points = Vec::with_capacity(walls.walkable_count());
    for y in 0..height {
        for x in 0..width {
            if !walls.is_wall(x, y) {
                spawn_points.push(cell_to_world(x, y));
            }
        }
    }

    let agent_count = rng.random_range(config.min_agents..=config.max_agents);
    if agent_count > spawn_points.len() {
        return Err(GenerationError::NotEnoughSpawnPoints {
            requested: agent_count,
            available: spawn_points.len(),
        });
    }

    // Draw positions without replacement so no two agents share a cell.
    let mut pool = spawn_points.clone();
    let mut agents = Vec::with_capacity(agent_count);
    for id in 0..agent_count {
        let position = pool.remove(rng.random_range(0..pool.len()));
        let heading_degrees = rng.random_range(0.0..360.0);
        agents.push(AgentSpawn {
            id,
            position,
            heading_degrees,
        });
    }

    let camera_anchor = Vec2::new(
        (width + 1) as f32 * CELL_SIZE / 2.0,
        (height + 1) as f32 * CELL_SIZE / 2.0,
    );

    Ok(Arena {
        width,
        height,
        walls,
        border,
        spawn_points,
        agents,
        camera_anchor,
        repair,
    })
}

fn validate_range(name: &'static str, min: usize, max: usize) -> Result<(), GenerationError> {
    if min > max {
        return Err(GenerationError::InvalidRange { name, min, max });
    }
    Ok(())
}

/// Rectangular ring of wall positions one cell outside the interior.
/// In border coordinates the interior spans (1, 1)..=(width, height).
fn border_ring(width: usize, height: usize) -> Vec<Vec2> {
    let mut ring = Vec::with_capacity(2 * (width + height) + 4);
    for x in 1..=width {
        for y in [0, height + 1] {
            ring.push(Vec2::new(x as f32 * CELL_SIZE, y as f32 * CELL_SIZE));
        }
    }
    for x in [0, width + 1] {
        for y in 0..=height + 1 {
            ring.push(Vec2::new(x as f32 * CELL_SIZE, y as f32 * CELL_SIZE));
        }
    }
    ring
}

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bevy::prelude::*;

use super::grid::WallGrid;
use super::regions::Region;

const WALKABLE_COST: u32 = 1;
const WALL_COST: u32 = 2;

/// Per-cell search state for one repair pass.
struct PathNode {
    /// Traversal cost: walkable cells are cheap, walls are expensive but
    /// not impassable, so corridors prefer existing open terrain and cross
    /// as few walls as they can.
    cost: u32,
    /// Minimum cumulative cost from the root seed. `u32::MAX` = unreached.
    dist: u32,
    /// Neighbor index through which `dist` was achieved; the chain of
    /// predecessors leads back to the root seed.
    predecessor: Option<usize>,
    /// Set once the cell is popped from the frontier; dist/predecessor are
    /// final from then on.
    visited: bool,
}

/// Outcome of a connectivity repair pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub regions_merged: usize,
    pub walls_cleared: usize,
    pub unreachable_regions: usize,
}

/// Merges every region into the largest one by carving wall-free corridors.
///
/// Builds a single shortest-path tree (Dijkstra) rooted at the largest
/// region's seed cell, with walls traversable at double cost, then walks
/// each smaller region's predecessor chain back toward the root and clears
/// every wall flag along the way. Repair only clears walls, never adds
/// them, and never touches cells of the root region itself.
///
/// A region the search cannot reach at all is reported as unreachable and
/// left disconnected. With the border ring enclosing the interior this
/// cannot happen in practice, so it is handled as a logged warning rather
/// than an error.
pub fn connect_regions(grid: &mut WallGrid, regions: &[Region]) -> RepairReport {
    let mut report = RepairReport::default();
    if regions.len() <= 1 {
        return report;
    }

    // Largest region wins; ties resolve to the first one in scan order.
    let mut root_idx = 0;
    for (i, region) in regions.iter().enumerate().skip(1) {
        if region.len() > regions[root_idx].len() {
            root_idx = i;
        }
    }
    let root = &regions[root_idx];

    let width = grid.width();
    let mut nodes: Vec<PathNode> = (0..width * grid.height())
        .map(|idx| PathNode {
            cost: if grid.is_wall(idx % width, idx / width) {
                WALL_COST
            } else {
                WALKABLE_COST
            },
            dist: u32::MAX,
            predecessor: None,
            visited: false,
        })
        .collect();

    // Shortest-path tree from the root seed over the whole grid, walls
    // included. The heap key carries the cell index so equal-cost pops
    // resolve in row-major order, keeping the tree deterministic.
    let start = grid.index(root.seed.0, root.seed.1);
    nodes[start].dist = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0u32, start)));

    while let Some(Reverse((dist, idx))) = frontier.pop() {
        if nodes[idx].visited {
            continue; // Stale entry
        }
        nodes[idx].visited = true;

        for (nx, ny) in grid.neighbors4(idx % width, idx / width) {
            let nidx = grid.index(nx, ny);
            if nodes[nidx].visited {
                continue;
            }
            let next = dist + nodes[nidx].cost;
            if next < nodes[nidx].dist {
                nodes[nidx].dist = next;
                nodes[nidx].predecessor = Some(idx);
                frontier.push(Reverse((next, nidx)));
            }
        }
    }

    // Carve a corridor from each remaining region back to the root.
    for (i, region) in regions.iter().enumerate() {
        if i == root_idx {
            continue;
        }

        let (sx, sy) = region.seed;
        let mut idx = grid.index(sx, sy);
        if nodes[idx].predecessor.is_none() && idx != start {
            warn!("region at ({}, {}) cannot be connected to the main area", sx, sy);
            report.unreachable_regions += 1;
            continue;
        }

        while let Some(prev) = nodes[idx].predecessor {
            idx = prev;
            let cell = (idx % width, idx / width);
            if root.contains(cell) {
                break;
            }
            if grid.is_wall(cell.0, cell.1) {
                grid.set_wall(cell.0, cell.1, false);
                report.walls_cleared += 1;
            }
        }
        report.regions_merged += 1;
    }

    report
}

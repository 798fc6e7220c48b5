use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashSet;

use super::grid::WallGrid;

/// A maximal set of walkable cells that are pairwise reachable through
/// 4-connected moves.
#[derive(Clone, Debug)]
pub struct Region {
    /// First cell of the region in row-major scan order. Used as the
    /// deterministic representative when the region is connected to the
    /// root during repair.
    pub seed: (usize, usize),
    pub cells: FxHashSet<(usize, usize)>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: (usize, usize)) -> bool {
        self.cells.contains(&cell)
    }
}

/// Partitions all walkable cells of the grid into connected regions.
///
/// Scans cells in row-major order; every unvisited walkable cell starts a
/// breadth-first fill that collects everything reachable from it. Each
/// walkable cell is visited exactly once across all fills, so the returned
/// regions are disjoint and their union is the walkable set. The output
/// order (scan order of the seeds) is the documented tie-break order for
/// root selection during repair.
pub fn find_regions(grid: &WallGrid) -> Vec<Region> {
    let mut visited = FixedBitSet::with_capacity(grid.width() * grid.height());
    let mut regions = Vec::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.is_wall(x, y) || visited.contains(grid.index(x, y)) {
                continue;
            }
            regions.push(fill_from(grid, (x, y), &mut visited));
        }
    }

    regions
}

/// Queue-based flood fill over walkable 4-connected cells.
fn fill_from(grid: &WallGrid, seed: (usize, usize), visited: &mut FixedBitSet) -> Region {
    let mut cells = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(grid.index(seed.0, seed.1));
    queue.push_back(seed);

    while let Some((x, y)) = queue.pop_front() {
        cells.insert((x, y));

        for (nx, ny) in grid.neighbors4(x, y) {
            let idx = grid.index(nx, ny);
            if !grid.is_wall(nx, ny) && !visited.contains(idx) {
                visited.insert(idx);
                queue.push_back((nx, ny));
            }
        }
    }

    Region { seed, cells }
}

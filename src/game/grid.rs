use rand::Rng;
use smallvec::SmallVec;

/// Wall occupancy grid for the arena interior.
///
/// Row-major boolean matrix: `true` = wall, `false` = walkable. Coordinates
/// are `0 <= x < width`, `0 <= y < height`; the border ring around the
/// interior is handled separately and never lives in this grid.
///
/// The grid is mutated only during generation (random fill, then selective
/// clearing while corridors are carved) and treated as immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl WallGrid {
    /// Creates an all-walkable grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Creates a grid where every cell independently becomes a wall with
    /// probability `density`.
    pub fn random<R: Rng>(width: usize, height: usize, density: f32, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        for cell in grid.cells.iter_mut() {
            *cell = rng.random::<f32>() < density;
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set_wall(&mut self, x: usize, y: usize, wall: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = wall;
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| wall).count()
    }

    pub fn walkable_count(&self) -> usize {
        self.width * self.height - self.wall_count()
    }

    /// In-bounds 4-connected neighbors of a cell, no wraparound.
    /// Fixed order (left, right, down, up) so traversals stay deterministic.
    pub fn neighbors4(&self, x: usize, y: usize) -> SmallVec<[(usize, usize); 4]> {
        let mut neighbors = SmallVec::new();
        let candidates = [
            (x.wrapping_sub(1), y), // Left
            (x + 1, y),             // Right
            (x, y.wrapping_sub(1)), // Down
            (x, y + 1),             // Up
        ];
        for (nx, ny) in candidates {
            if nx < self.width && ny < self.height {
                neighbors.push((nx, ny));
            }
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn new_grid_is_all_walkable() {
        let grid = WallGrid::new(7, 3);
        assert_eq!(grid.wall_count(), 0);
        assert_eq!(grid.walkable_count(), 21);
    }

    #[test]
    fn set_and_read_wall_flags() {
        let mut grid = WallGrid::new(4, 4);
        grid.set_wall(2, 3, true);
        assert!(grid.is_wall(2, 3));
        assert_eq!(grid.wall_count(), 1);
        grid.set_wall(2, 3, false);
        assert!(!grid.is_wall(2, 3));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn density_extremes() {
        let mut rng = SmallRng::seed_from_u64(7);
        let empty = WallGrid::random(10, 10, 0.0, &mut rng);
        assert_eq!(empty.wall_count(), 0);
        let full = WallGrid::random(10, 10, 1.0, &mut rng);
        assert_eq!(full.wall_count(), 100);
    }

    #[test]
    fn corner_cells_have_two_neighbors() {
        let grid = WallGrid::new(5, 5);
        assert_eq!(grid.neighbors4(0, 0).len(), 2);
        assert_eq!(grid.neighbors4(4, 4).len(), 2);
        assert_eq!(grid.neighbors4(4, 0).len(), 2);
    }

    #[test]
    fn edge_cells_have_three_neighbors() {
        let grid = WallGrid::new(5, 5);
        assert_eq!(grid.neighbors4(2, 0).len(), 3);
        assert_eq!(grid.neighbors4(0, 2).len(), 3);
    }

    #[test]
    fn interior_cells_have_four_neighbors() {
        let grid = WallGrid::new(5, 5);
        let neighbors = grid.neighbors4(2, 2);
        assert_eq!(neighbors.len(), 4);
        assert_eq!(neighbors.as_slice(), &[(1, 2), (3, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = WallGrid::new(1, 1);
        assert!(grid.neighbors4(0, 0).is_empty());
    }
}

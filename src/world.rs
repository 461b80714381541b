//! Grid to world-space mapping shared by renderers and physics.
//!
//! The grid is laid on the XZ plane, centred on the origin: columns run
//! along +X, rows along -Z. A 3D front end that draws walls and moves bodies
//! in world units should use [`WorldLayout`] for both. The terminal front end
//! works in grid cells and does not need it.

use crate::maze::Grid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldLayout {
    rows: usize,
    cols: usize,
    unit: f32,
}

impl WorldLayout {
    pub fn new(grid: &Grid, unit: f32) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            unit,
        }
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    /// Centre of a cell on the floor plane as `(x, z)`.
    pub fn cell_to_world(&self, row: usize, col: usize) -> (f32, f32) {
        let x = col as f32 * self.unit - self.cols as f32 * self.unit / 2.0;
        let z = -(row as f32) * self.unit + self.rows as f32 * self.unit / 2.0;
        (x, z)
    }

    /// Nearest cell to a floor point, `None` outside the grid.
    pub fn world_to_cell(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let col = ((x + self.cols as f32 * self.unit / 2.0) / self.unit).round();
        let row = ((self.rows as f32 * self.unit / 2.0 - z) / self.unit).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Position of one wall block per wall cell, resting on the floor.
    pub fn wall_instances(&self, grid: &Grid) -> Vec<[f32; 3]> {
        let mut out = Vec::new();
        for (row, cells) in grid.as_rows().iter().enumerate() {
            for (col, _) in cells.iter().enumerate().filter(|(_, &c)| c == crate::maze::WALL) {
                let (x, z) = self.cell_to_world(row, col);
                out.push([x, self.unit / 2.0, z]);
            }
        }
        out
    }

    /// Floor footprint as `(width along X, depth along Z)`.
    pub fn floor_size(&self) -> (f32, f32) {
        (self.cols as f32 * self.unit, self.rows as f32 * self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> Grid {
        MazeGenerator::new(3, 4)
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(5))
            .unwrap()
            .into_grid()
    }

    #[test]
    fn centred_on_origin() {
        let grid = grid();
        let layout = WorldLayout::new(&grid, 1.0);
        assert_eq!(layout.cell_to_world(0, 0), (-4.5, 3.5));
        assert_eq!(layout.cell_to_world(6, 8), (3.5, -2.5));
        assert_eq!(layout.floor_size(), (9.0, 7.0));
    }

    #[test]
    fn world_round_trips_to_cells() {
        let grid = grid();
        let layout = WorldLayout::new(&grid, 2.0);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let (x, z) = layout.cell_to_world(row, col);
                assert_eq!(layout.world_to_cell(x + 0.4, z - 0.4), Some((row, col)));
            }
        }
        assert_eq!(layout.world_to_cell(-100.0, 0.0), None);
        assert_eq!(layout.world_to_cell(0.0, -100.0), None);
    }

    #[test]
    fn one_instance_per_wall() {
        let grid = grid();
        let layout = WorldLayout::new(&grid, 1.5);
        let walls = layout.wall_instances(&grid);
        assert_eq!(walls.len(), grid.rows() * grid.cols() - grid.count_open());
        assert!(walls.iter().all(|w| w[1] == 0.75));
        assert!(walls.contains(&[-6.75, 0.75, 5.25]));
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

use crate::maze::{Grid, Pos};

/// Share of the grid area that gets a collectible.
pub const OBJECT_DENSITY: f32 = 0.05;

/// Scatters collectibles over open interior cells, skipping `reserved`.
///
/// The count is `floor(rows * cols * density)`, capped by the number of
/// free cells.
pub fn place_objects(grid: &Grid, density: f32, reserved: &[Pos], rng: &mut impl Rng) -> Vec<Pos> {
    let wanted = (grid.rows() * grid.cols()) as f32 * density;
    let mut free: Vec<Pos> = grid
        .open_cells()
        .filter(|pos| pos.x > 0 && pos.y > 0 && pos.x < grid.cols() - 1 && pos.y < grid.rows() - 1)
        .filter(|pos| !reserved.contains(pos))
        .collect();
    free.shuffle(rng);
    free.truncate(wanted.floor() as usize);
    free
}

//! Recursive-division maze generation.
//!
//! The generator fills a bordered lattice, splits it recursively with
//! cross-shaped walls, opens three of the four arms of every cross, carves
//! the exit and finally checks that every open cell is reachable.

mod connectivity;
pub mod coords;
pub mod grid;

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

pub use coords::{Region, Resolution};
pub use grid::{Grid, Pos, Rect, OPEN, WALL};

use grid::Tile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Height or width was zero.
    InvalidDimensions { height: usize, width: usize },
    /// Open cells were left that could not be joined to the exit.
    Disconnected { unreachable: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { height, width } => {
                write!(f, "maze dimensions must be positive, got {height}x{width}")
            }
            Self::Disconnected { unreachable } => {
                write!(f, "generated maze has {unreachable} unreachable open cells")
            }
        }
    }
}

impl std::error::Error for MazeError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arm {
    Left,
    Right,
    Top,
    Bottom,
}

/// Builds [`Maze`]s of a fixed logical size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    height: usize,
    width: usize,
    resolution: Resolution,
}

impl MazeGenerator {
    /// `height` and `width` count chambers, not grid cells.
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidDimensions { height, width });
        }
        Ok(Self {
            height,
            width,
            resolution: Resolution::Narrow,
        })
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn rows(&self) -> usize {
        self.resolution.grid_len(self.height)
    }

    pub fn cols(&self) -> usize {
        self.resolution.grid_len(self.width)
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Result<Maze, MazeError> {
        let mut tiles = self.lattice();
        self.divide(
            &mut tiles,
            Region::new(1, self.height - 1, 1, self.width - 1),
            rng,
        );

        let exit = self.exit_rect();
        for pos in exit.cells() {
            tiles[pos.y][pos.x] = Tile::Open;
        }

        let repairs = connectivity::ensure_connected(&mut tiles, Pos::new(exit.right, exit.bottom))?;
        let grid = Grid::from_tiles(&tiles);
        log::debug!(
            "generated {}x{} maze ({:?}): {}x{} grid, {} open cells, {} repairs",
            self.height,
            self.width,
            self.resolution,
            grid.rows(),
            grid.cols(),
            grid.count_open(),
            repairs
        );

        Ok(Maze {
            grid,
            resolution: self.resolution,
            height: self.height,
            width: self.width,
            entrance: Pos::new(1, 1),
            exit,
        })
    }

    /// Border plus a wall on every lattice point; everything else open.
    fn lattice(&self) -> Vec<Vec<Tile>> {
        let k = self.resolution.multiplier();
        let (rows, cols) = (self.rows(), self.cols());
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        let border = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
                        if border || (r % k == 0 && c % k == 0) {
                            Tile::Wall
                        } else {
                            Tile::Open
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn divide(&self, tiles: &mut [Vec<Tile>], region: Region, rng: &mut impl Rng) {
        if region.is_empty() {
            return;
        }
        let res = self.resolution;
        let row = pick_split(region.r1, region.r2, 4, rng);
        let col = pick_split(region.c1, region.c2, 3, rng);

        let wall_row = res.wall_distance(row);
        let wall_col = res.wall_distance(col);
        let rows = res.space_distance(region.r1)..res.wall_distance(region.r2 + 1);
        let cols = res.space_distance(region.c1)..res.wall_distance(region.c2 + 1);
        for c in cols.clone() {
            tiles[wall_row][c] = Tile::Wall;
        }
        for r in rows {
            tiles[r][wall_col] = Tile::Wall;
        }

        let mut arms = [Arm::Left, Arm::Right, Arm::Top, Arm::Bottom];
        arms.shuffle(rng);
        for arm in &arms[..3] {
            let (chamber, across) = match arm {
                Arm::Left => (rng.gen_range(region.c1..=col), false),
                Arm::Right => (rng.gen_range(col + 1..=region.c2 + 1), false),
                Arm::Top => (rng.gen_range(region.r1..=row), true),
                Arm::Bottom => (rng.gen_range(row + 1..=region.r2 + 1), true),
            };
            let start = res.space_distance(chamber);
            for offset in 0..res.corridor_width() {
                if across {
                    tiles[start + offset][wall_col] = Tile::Open;
                } else {
                    tiles[wall_row][start + offset] = Tile::Open;
                }
            }
        }

        for quadrant in region.quadrants(row, col) {
            self.divide(tiles, quadrant, rng);
        }
    }

    /// One corridor tall and two wide, tucked into the bottom-right corner.
    fn exit_rect(&self) -> Rect {
        let corridor = self.resolution.corridor_width();
        let (rows, cols) = (self.rows(), self.cols());
        Rect {
            top: (rows - 1).saturating_sub(corridor).max(1),
            left: (cols - 1).saturating_sub(2 * corridor).max(1),
            bottom: rows - 2,
            right: cols - 2,
        }
    }
}

/// Picks a dividing line in `[lo, hi]`, keeping away from the edges of the
/// range: the middle half for `parts == 4`, the middle third for `parts == 3`.
fn pick_split(lo: usize, hi: usize, parts: usize, rng: &mut impl Rng) -> usize {
    if lo == hi {
        return lo;
    }
    let x = (lo + 1) as f64;
    let y = hi as f64 - 1.0;
    let span = y - x;
    let start = (x + span / parts as f64).round() as usize;
    let end = (x + (parts - 1) as f64 * span / parts as f64).round() as usize;
    let pick = if end > start {
        rng.gen_range(start..=end)
    } else {
        start
    };
    pick.clamp(lo, hi)
}

/// A generated maze. Immutable once built; regenerate to get a new layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    resolution: Resolution,
    height: usize,
    width: usize,
    entrance: Pos,
    exit: Rect,
}

impl Maze {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Logical size in chambers as `(height, width)`.
    pub fn chambers(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn entrance(&self) -> Pos {
        self.entrance
    }

    pub fn exit(&self) -> Rect {
        self.exit
    }
}

/// Generates a narrow-corridor maze from the thread RNG.
pub fn generate(height: usize, width: usize) -> Result<Grid, MazeError> {
    let maze = MazeGenerator::new(height, width)?.generate(&mut rand::thread_rng())?;
    Ok(maze.into_grid())
}

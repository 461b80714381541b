//! Chamber space vs. grid space.
//!
//! Recursive division works on chamber lines: wall line `x` sits on grid
//! line `k * x`, and chamber `x` covers the `k - 1` grid lines starting at
//! `k * (x - 1) + 1`, where `k` is the resolution multiplier.

/// Corridor resolution of a generated maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// One grid cell per corridor.
    #[default]
    Narrow,
    /// Four grid cells per corridor, room for several occupants side by side.
    Wide,
}

impl Resolution {
    pub const fn multiplier(self) -> usize {
        match self {
            Resolution::Narrow => 2,
            Resolution::Wide => 5,
        }
    }

    /// Width of a corridor (and of every gap) in grid cells.
    pub const fn corridor_width(self) -> usize {
        self.multiplier() - 1
    }

    /// Grid length along one axis for the given number of chambers.
    pub const fn grid_len(self, chambers: usize) -> usize {
        self.multiplier() * chambers + 1
    }

    pub fn wall_distance(self, x: usize) -> usize {
        wall_distance(self.multiplier(), x)
    }

    pub fn space_distance(self, x: usize) -> usize {
        space_distance(self.multiplier(), x)
    }
}

/// Grid line of chamber wall line `x`.
pub fn wall_distance(k: usize, x: usize) -> usize {
    k * x
}

/// First grid line of chamber `x` (chambers are numbered from 1).
pub fn space_distance(k: usize, x: usize) -> usize {
    debug_assert!(x >= 1, "chambers are numbered from 1");
    k * (x - 1) + 1
}

/// Rectangle of chamber wall lines still to be divided, bounds inclusive.
///
/// `r2 < r1` (or `c2 < c1`) means there is no interior wall line left on
/// that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub r1: usize,
    pub r2: usize,
    pub c1: usize,
    pub c2: usize,
}

impl Region {
    pub fn new(r1: usize, r2: usize, c1: usize, c2: usize) -> Self {
        Self { r1, r2, c1, c2 }
    }

    pub fn is_empty(&self) -> bool {
        self.r2 < self.r1 || self.c2 < self.c1
    }

    /// The four sub-regions left after splitting on `row` and `col`.
    ///
    /// `row` and `col` are always at least 1, so `row - 1` cannot underflow.
    pub fn quadrants(&self, row: usize, col: usize) -> [Region; 4] {
        [
            Region::new(self.r1, row - 1, self.c1, col - 1),
            Region::new(self.r1, row - 1, col + 1, self.c2),
            Region::new(row + 1, self.r2, self.c1, col - 1),
            Region::new(row + 1, self.r2, col + 1, self.c2),
        ]
    }
}

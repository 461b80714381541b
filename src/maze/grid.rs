use std::fmt;
use std::ops::Index;

/// Numeric value of a wall cell in a [`Grid`].
pub const WALL: u8 = 1;
/// Numeric value of an open cell in a [`Grid`].
pub const OPEN: u8 = 0;

/// Working cell state while a maze is being built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tile {
    Wall,
    Open,
}

/// A grid position. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle of grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Rect {
    pub fn contains(&self, pos: Pos) -> bool {
        pos.y >= self.top && pos.y <= self.bottom && pos.x >= self.left && pos.x <= self.right
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.top..=self.bottom).flat_map(move |y| (self.left..=self.right).map(move |x| Pos { x, y }))
    }
}

/// Occupancy grid handed to every consumer: [`WALL`] or [`OPEN`] per cell.
///
/// Indexed as `grid[row][col]`. Always query [`Grid::rows`] and
/// [`Grid::cols`]; they are larger than the chamber counts the maze was
/// requested with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<u8>>,
}

impl Grid {
    pub(crate) fn from_tiles(tiles: &[Vec<Tile>]) -> Self {
        let cells: Vec<Vec<u8>> = tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| match tile {
                        Tile::Wall => WALL,
                        Tile::Open => OPEN,
                    })
                    .collect()
            })
            .collect();
        Self {
            rows: cells.len(),
            cols: cells.first().map_or(0, |row| row.len()),
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        self.get(row, col).map_or(true, |cell| cell == WALL)
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.get(pos.y, pos.x) == Some(OPEN)
    }

    pub fn as_rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &cell)| cell == OPEN)
                .map(move |(x, _)| Pos { x, y })
        })
    }

    pub fn count_open(&self) -> usize {
        self.open_cells().count()
    }
}

impl Index<usize> for Grid {
    type Output = [u8];

    fn index(&self, row: usize) -> &[u8] {
        &self.cells[row]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_tiles(&[
            vec![Tile::Wall, Tile::Wall, Tile::Wall],
            vec![Tile::Wall, Tile::Open, Tile::Wall],
            vec![Tile::Wall, Tile::Wall, Tile::Wall],
        ])
    }

    #[test]
    fn finalizes_to_numeric_cells() {
        let grid = sample();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[1][1], OPEN);
        assert_eq!(grid[0][1], WALL);
        assert_eq!(grid.count_open(), 1);
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![Pos::new(1, 1)]);
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let grid = sample();
        assert!(grid.is_wall(3, 0));
        assert!(grid.is_wall(0, 7));
        assert!(!grid.is_open(Pos::new(5, 5)));
        assert_eq!(grid.get(9, 9), None);
    }

    #[test]
    fn displays_rows_of_digits() {
        assert_eq!(sample().to_string(), "111\n101\n111");
    }

    #[test]
    fn rect_geometry() {
        let rect = Rect { top: 2, left: 1, bottom: 3, right: 4 };
        assert_eq!(rect.height(), 2);
        assert_eq!(rect.width(), 4);
        assert_eq!(rect.cells().count(), 8);
        assert!(rect.contains(Pos::new(4, 3)));
        assert!(!rect.contains(Pos::new(0, 3)));
    }
}

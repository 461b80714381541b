use std::collections::VecDeque;

use super::grid::{Pos, Tile};
use super::MazeError;

const DELTAS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

fn interior_neighbors(tiles: &[Vec<Tile>], pos: Pos) -> impl Iterator<Item = Pos> {
    let height = tiles.len() as isize;
    let width = tiles.first().map_or(0, |row| row.len()) as isize;
    DELTAS.into_iter().filter_map(move |(dx, dy)| {
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if nx <= 0 || ny <= 0 || nx >= width - 1 || ny >= height - 1 {
            return None;
        }
        Some(Pos::new(nx as usize, ny as usize))
    })
}

/// Marks every open cell reachable from `start` by 4-directional moves.
pub(crate) fn flood(tiles: &[Vec<Tile>], start: Pos) -> Vec<Vec<bool>> {
    let mut seen: Vec<Vec<bool>> = tiles.iter().map(|row| vec![false; row.len()]).collect();
    if tiles[start.y][start.x] != Tile::Open {
        return seen;
    }
    let mut q = VecDeque::new();
    seen[start.y][start.x] = true;
    q.push_back(start);
    while let Some(pos) = q.pop_front() {
        for next in interior_neighbors(tiles, pos) {
            if seen[next.y][next.x] || tiles[next.y][next.x] != Tile::Open {
                continue;
            }
            seen[next.y][next.x] = true;
            q.push_back(next);
        }
    }
    seen
}

fn count_unreached(tiles: &[Vec<Tile>], reached: &[Vec<bool>]) -> usize {
    tiles
        .iter()
        .zip(reached)
        .map(|(row, seen)| {
            row.iter()
                .zip(seen)
                .filter(|(&tile, &seen)| tile == Tile::Open && !seen)
                .count()
        })
        .sum()
}

/// Shortest run of wall cells joining the reached area to some unreached
/// open cell, found by a BFS seeded with every reached cell.
fn bridge(tiles: &[Vec<Tile>], reached: &[Vec<bool>]) -> Option<Vec<Pos>> {
    let mut parent: Vec<Vec<Option<Pos>>> = tiles.iter().map(|row| vec![None; row.len()]).collect();
    let mut seen: Vec<Vec<bool>> = reached.to_vec();
    let mut q: VecDeque<Pos> = VecDeque::new();
    for (y, row) in reached.iter().enumerate() {
        for (x, &r) in row.iter().enumerate() {
            if r {
                q.push_back(Pos::new(x, y));
            }
        }
    }

    while let Some(pos) = q.pop_front() {
        for next in interior_neighbors(tiles, pos) {
            if seen[next.y][next.x] {
                continue;
            }
            seen[next.y][next.x] = true;
            parent[next.y][next.x] = Some(pos);
            if tiles[next.y][next.x] == Tile::Open {
                let mut path = Vec::new();
                let mut cur = pos;
                while !reached[cur.y][cur.x] {
                    path.push(cur);
                    cur = parent[cur.y][cur.x]?;
                }
                return Some(path);
            }
            q.push_back(next);
        }
    }
    None
}

/// Verifies that every open cell is reachable from `start` and carves
/// passages to any pocket that is not. Returns the number of passages carved.
pub(crate) fn ensure_connected(tiles: &mut [Vec<Tile>], start: Pos) -> Result<usize, MazeError> {
    let mut reached = flood(tiles, start);
    let mut repairs = 0;
    loop {
        let unreachable = count_unreached(tiles, &reached);
        if unreachable == 0 {
            return Ok(repairs);
        }
        if !reached[start.y][start.x] {
            return Err(MazeError::Disconnected { unreachable });
        }
        let Some(path) = bridge(tiles, &reached) else {
            return Err(MazeError::Disconnected { unreachable });
        };
        log::warn!(
            "{unreachable} open cells unreachable from ({}, {}), carving {} cells",
            start.x,
            start.y,
            path.len()
        );
        for pos in path {
            tiles[pos.y][pos.x] = Tile::Open;
        }
        repairs += 1;
        reached = flood(tiles, start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(rows: &[&str]) -> Vec<Vec<Tile>> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| if c == '#' { Tile::Wall } else { Tile::Open })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn flood_stays_inside_walls() {
        let tiles = parse(&["#######", "#..#..#", "#..#..#", "#######"]);
        let seen = flood(&tiles, Pos::new(1, 1));
        assert!(seen[2][2]);
        assert!(!seen[1][4]);
        assert!(!seen[0][1]);
    }

    #[test]
    fn connected_maze_needs_no_repair() {
        let mut tiles = parse(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        let before = tiles.clone();
        assert_eq!(ensure_connected(&mut tiles, Pos::new(3, 3)), Ok(0));
        assert_eq!(tiles, before);
    }

    #[test]
    fn isolated_pocket_is_carved_open() {
        let mut tiles = parse(&[
            "#########",
            "#..###..#",
            "#..###..#",
            "#########",
        ]);
        assert_eq!(ensure_connected(&mut tiles, Pos::new(1, 1)), Ok(1));
        let seen = flood(&tiles, Pos::new(1, 1));
        assert!(seen[1][7] && seen[2][6]);
        assert_eq!(count_unreached(&tiles, &seen), 0);
        // only the three wall cells between the rooms are opened
        assert_eq!(tiles[0].iter().filter(|&&t| t == Tile::Open).count(), 0);
    }

    #[test]
    fn several_pockets_are_all_joined() {
        let mut tiles = parse(&[
            "#########",
            "#.#.#.#.#",
            "#########",
            "#.#.#.#.#",
            "#########",
        ]);
        let repairs = ensure_connected(&mut tiles, Pos::new(1, 1)).unwrap();
        assert!(repairs >= 7);
        let seen = flood(&tiles, Pos::new(1, 1));
        assert_eq!(count_unreached(&tiles, &seen), 0);
    }

    #[test]
    fn walled_start_is_a_fault() {
        let mut tiles = parse(&["#####", "##..#", "#####"]);
        assert_eq!(
            ensure_connected(&mut tiles, Pos::new(1, 1)),
            Err(MazeError::Disconnected { unreachable: 2 })
        );
    }
}

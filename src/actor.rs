//! Player character and NPCs moving cell by cell over the occupancy grid.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::maze::{Grid, Pos};

/// Walk cycle advance per second while walking.
const WALK_RATE: f32 = 10.0;
/// Peak limb swing of the walk cycle.
const SWING: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    /// Position of this direction in [`Dir::ALL`].
    pub fn index(self) -> usize {
        match self {
            Dir::Up => 0,
            Dir::Down => 1,
            Dir::Left => 2,
            Dir::Right => 3,
        }
    }

    pub fn reverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// The cell one step away, if it is still on the grid.
pub fn step(grid: &Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let nx = pos.x as isize + dx;
    let ny = pos.y as isize + dy;
    if nx < 0 || ny < 0 {
        return None;
    }
    let (nx, ny) = (nx as usize, ny as usize);
    if nx >= grid.cols() || ny >= grid.rows() {
        return None;
    }
    Some(Pos::new(nx, ny))
}

pub fn can_move(grid: &Grid, pos: Pos, dir: Dir) -> bool {
    step(grid, pos, dir).map_or(false, |next| grid.is_open(next))
}

/// The player.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub pos: Pos,
    pub facing: Dir,
    walking: bool,
    walk_cycle: f32,
}

impl Character {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            facing: Dir::Up,
            walking: false,
            walk_cycle: 0.0,
        }
    }

    /// Turns towards `dir` and steps into the next cell when it is open.
    pub fn try_move(&mut self, grid: &Grid, dir: Dir) -> bool {
        self.facing = dir;
        self.walking = true;
        match step(grid, self.pos, dir) {
            Some(next) if grid.is_open(next) => {
                self.pos = next;
                true
            }
            _ => false,
        }
    }

    pub fn stop(&mut self) {
        self.walking = false;
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn update(&mut self, dt: f32) {
        if self.walking {
            self.walk_cycle += dt * WALK_RATE;
        } else {
            self.walk_cycle = 0.0;
        }
    }

    /// Limb swing in `[-SWING, SWING]`; zero when standing.
    pub fn stride(&self) -> f32 {
        self.walk_cycle.sin() * SWING
    }

    /// Places the character somewhere new, standing still.
    pub fn respawn(&mut self, pos: Pos) {
        self.pos = pos;
        self.walking = false;
        self.walk_cycle = 0.0;
    }
}

/// A wandering non-player character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Npc {
    pub pos: Pos,
    heading: Option<Dir>,
}

impl Npc {
    pub fn new(pos: Pos) -> Self {
        Self { pos, heading: None }
    }

    /// Moves one cell in a random open direction. Turning back is only
    /// chosen at dead ends.
    pub fn wander(&mut self, grid: &Grid, rng: &mut impl Rng) {
        let open: Vec<Dir> = Dir::ALL
            .into_iter()
            .filter(|&dir| can_move(grid, self.pos, dir))
            .collect();
        let forward: Vec<Dir> = open
            .iter()
            .copied()
            .filter(|&dir| Some(dir.reverse()) != self.heading)
            .collect();
        let choices = if forward.is_empty() { &open } else { &forward };
        if let Some(&dir) = choices.choose(rng) {
            if let Some(next) = step(grid, self.pos, dir) {
                self.pos = next;
                self.heading = Some(dir);
            }
        }
    }
}

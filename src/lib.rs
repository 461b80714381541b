//! Procedural mazes and a small game played on them.
//!
//! [`maze`] builds the occupancy grid; everything else reads it.

pub mod actor;
pub mod game;
pub mod maze;
pub mod objects;
pub mod world;

pub use maze::{generate, Grid, Maze, MazeError, MazeGenerator, Pos, Rect, Resolution};

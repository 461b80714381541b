use clap::{Parser, ValueEnum};
use maze_runner::game::GameSettings;
use maze_runner::Resolution;

pub const DEFAULT_TICK_MS: u64 = 70;
pub const DEFAULT_RENDER_FPS: u64 = 120;
/// Largest accepted height or width, in chambers.
pub const MAX_CHAMBERS: i64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Corridors {
    Narrow,
    Wide,
}

impl From<Corridors> for Resolution {
    fn from(c: Corridors) -> Self {
        match c {
            Corridors::Narrow => Resolution::Narrow,
            Corridors::Wide => Resolution::Wide,
        }
    }
}

/// Walk out of a freshly generated maze.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze height in chambers
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=MAX_CHAMBERS))]
    pub height: u16,

    /// Maze width in chambers
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u16).range(1..=MAX_CHAMBERS))]
    pub width: u16,

    /// Corridor width
    #[arg(long, value_enum, default_value_t = Corridors::Narrow)]
    pub resolution: Corridors,

    /// Random seed, fresh entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of wandering NPCs
    #[arg(long, default_value_t = 3)]
    pub npcs: usize,

    /// Lives before the game ends
    #[arg(long, default_value_t = 3)]
    pub lives: u32,

    /// Print the occupancy grid and exit
    #[arg(long)]
    pub print: bool,
}

impl Args {
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            height: self.height.into(),
            width: self.width.into(),
            resolution: self.resolution.into(),
            npc_count: self.npcs,
            lives: self.lives.max(1),
        }
    }
}

/// Tick length and render rate from `MAZE_TICK_MS` / `MAZE_FPS`.
pub fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}

//! Game state on top of a generated maze: spawning, movement, pickups,
//! NPC contact and level changes.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::actor::{Character, Dir, Npc};
use crate::maze::{Maze, MazeError, MazeGenerator, Pos, Resolution};
use crate::objects::{place_objects, OBJECT_DENSITY};

pub const OBJECT_SCORE: u32 = 10;
pub const EXIT_SCORE: u32 = 100;
const NPC_MOVE_INTERVAL: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub height: usize,
    pub width: usize,
    pub resolution: Resolution,
    pub npc_count: usize,
    pub lives: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            height: 10,
            width: 15,
            resolution: Resolution::Narrow,
            npc_count: 3,
            lives: 3,
        }
    }
}

impl GameSettings {
    pub fn generator(&self) -> Result<MazeGenerator, MazeError> {
        Ok(MazeGenerator::new(self.height, self.width)?.resolution(self.resolution))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
}

pub struct Game {
    settings: GameSettings,
    maze: Maze,
    player: Character,
    npcs: Vec<Npc>,
    npc_spawns: Vec<Pos>,
    objects: Vec<Pos>,
    score: u32,
    lives: u32,
    level: u32,
    npc_tick: u32,
    status: Status,
}

impl Game {
    pub fn new(settings: GameSettings, rng: &mut impl Rng) -> Result<Self, MazeError> {
        let maze = settings.generator()?.generate(rng)?;
        let entrance = maze.entrance();
        let mut game = Self {
            settings,
            maze,
            player: Character::new(entrance),
            npcs: Vec::new(),
            npc_spawns: Vec::new(),
            objects: Vec::new(),
            score: 0,
            lives: settings.lives,
            level: 1,
            npc_tick: 0,
            status: Status::Playing,
        };
        game.populate(rng);
        Ok(game)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn objects(&self) -> &[Pos] {
        &self.objects
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Builds a fresh maze and swaps it in only once it is complete. On
    /// error the current maze stays in play.
    pub fn regenerate(&mut self, rng: &mut impl Rng) -> Result<(), MazeError> {
        let maze = self.settings.generator()?.generate(rng)?;
        self.maze = maze;
        self.populate(rng);
        Ok(())
    }

    /// Player at the entrance, NPCs away from it and from the exit, then
    /// objects on whatever is left.
    fn populate(&mut self, rng: &mut impl Rng) {
        let entrance = self.maze.entrance();
        let exit = self.maze.exit();
        let clearance = 2 * self.maze.resolution().multiplier();
        self.player.respawn(entrance);

        let mut spots: Vec<Pos> = self
            .maze
            .grid()
            .open_cells()
            .filter(|&pos| !exit.contains(pos))
            .filter(|pos| pos.x.abs_diff(entrance.x) + pos.y.abs_diff(entrance.y) > clearance)
            .collect();
        spots.shuffle(rng);
        spots.truncate(self.settings.npc_count);
        self.npc_spawns = spots;
        self.npcs = self.npc_spawns.iter().map(|&pos| Npc::new(pos)).collect();
        self.npc_tick = 0;

        let mut reserved = self.npc_spawns.clone();
        reserved.push(entrance);
        reserved.extend(exit.cells());
        self.objects = place_objects(self.maze.grid(), OBJECT_DENSITY, &reserved, rng);
    }

    /// One game step. `desired` is the direction currently held, if any.
    pub fn tick(&mut self, rng: &mut impl Rng, desired: Option<Dir>, dt: f32) -> Result<(), MazeError> {
        if self.status == Status::GameOver {
            return Ok(());
        }

        let moved = match desired {
            Some(dir) => self.player.try_move(self.maze.grid(), dir),
            None => {
                self.player.stop();
                false
            }
        };
        self.player.update(dt);
        self.collect_object();

        // only a step into the exit counts; tiny mazes spawn the player inside it
        if moved && self.maze.exit().contains(self.player.pos) {
            self.score += EXIT_SCORE;
            self.level += 1;
            info!("exit reached, starting level {} (score {})", self.level, self.score);
            return self.regenerate(rng);
        }

        self.handle_collisions();
        self.npc_tick = self.npc_tick.wrapping_add(1);
        if self.npc_tick % NPC_MOVE_INTERVAL == 0 {
            for npc in &mut self.npcs {
                npc.wander(self.maze.grid(), rng);
            }
            self.handle_collisions();
        }
        Ok(())
    }

    fn collect_object(&mut self) {
        let pos = self.player.pos;
        if let Some(idx) = self.objects.iter().position(|&o| o == pos) {
            self.objects.swap_remove(idx);
            self.score += OBJECT_SCORE;
        }
    }

    fn handle_collisions(&mut self) {
        if self.status == Status::GameOver || !self.npcs.iter().any(|npc| npc.pos == self.player.pos) {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        info!("caught at ({}, {}), {} lives left", self.player.pos.x, self.player.pos.y, self.lives);
        if self.lives == 0 {
            self.status = Status::GameOver;
            return;
        }
        self.player.respawn(self.maze.entrance());
        self.npcs = self.npc_spawns.iter().map(|&pos| Npc::new(pos)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corridor_game(npc_count: usize) -> (Game, StdRng) {
        let mut rng = StdRng::seed_from_u64(21);
        let settings = GameSettings {
            height: 1,
            width: 4,
            npc_count,
            ..GameSettings::default()
        };
        let game = Game::new(settings, &mut rng).unwrap();
        (game, rng)
    }

    #[test]
    fn invalid_settings_fail() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = GameSettings {
            height: 0,
            ..GameSettings::default()
        };
        assert!(matches!(
            Game::new(settings, &mut rng),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn spawns_respect_entrance_and_exit() {
        let mut rng = StdRng::seed_from_u64(8);
        let game = Game::new(GameSettings::default(), &mut rng).unwrap();
        let maze = game.maze();
        assert_eq!(game.player().pos, maze.entrance());
        assert_eq!(game.npcs().len(), 3);
        for npc in game.npcs() {
            assert!(maze.grid().is_open(npc.pos));
            assert!(!maze.exit().contains(npc.pos));
            assert_ne!(npc.pos, maze.entrance());
        }
        // 21 * 31 * 0.05 = 32.55
        assert_eq!(game.objects().len(), 32);
        assert!(!game.objects().contains(&maze.entrance()));
    }

    #[test]
    fn walking_onto_an_object_collects_it() {
        let (mut game, mut rng) = corridor_game(0);
        game.objects = vec![Pos::new(2, 1)];
        game.tick(&mut rng, Some(Dir::Right), 0.07).unwrap();
        assert_eq!(game.player().pos, Pos::new(2, 1));
        assert!(game.objects().is_empty());
        assert_eq!(game.score(), OBJECT_SCORE);
    }

    #[test]
    fn reaching_the_exit_starts_the_next_level() {
        let (mut game, mut rng) = corridor_game(0);
        game.objects.clear();
        for _ in 0..5 {
            game.tick(&mut rng, Some(Dir::Right), 0.07).unwrap();
        }
        assert_eq!(game.level(), 2);
        assert_eq!(game.score(), EXIT_SCORE);
        assert_eq!(game.player().pos, game.maze().entrance());
    }

    #[test]
    fn spawning_inside_the_exit_does_not_finish_the_level() {
        let mut rng = StdRng::seed_from_u64(4);
        let settings = GameSettings {
            height: 1,
            width: 1,
            ..GameSettings::default()
        };
        let mut game = Game::new(settings, &mut rng).unwrap();
        assert!(game.maze().exit().contains(game.player().pos));
        for _ in 0..5 {
            game.tick(&mut rng, None, 0.07).unwrap();
        }
        // bumping into walls is not a step either
        game.tick(&mut rng, Some(Dir::Up), 0.07).unwrap();
        assert_eq!(game.level(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn npc_contact_costs_a_life() {
        let (mut game, mut rng) = corridor_game(0);
        game.objects.clear();
        game.npc_spawns = vec![Pos::new(5, 1)];
        game.npcs = vec![Npc::new(Pos::new(2, 1))];
        game.tick(&mut rng, Some(Dir::Right), 0.07).unwrap();
        assert_eq!(game.lives(), 2);
        assert_eq!(game.player().pos, game.maze().entrance());
        assert_eq!(game.npcs()[0].pos, Pos::new(5, 1));
        assert_eq!(game.status(), Status::Playing);
    }

    #[test]
    fn last_life_ends_the_game() {
        let (mut game, mut rng) = corridor_game(0);
        game.lives = 1;
        game.npcs = vec![Npc::new(Pos::new(2, 1))];
        game.tick(&mut rng, Some(Dir::Right), 0.07).unwrap();
        assert_eq!(game.status(), Status::GameOver);
        let pos = game.player().pos;
        game.tick(&mut rng, Some(Dir::Right), 0.07).unwrap();
        assert_eq!(game.player().pos, pos);
    }

    #[test]
    fn standing_still_stops_walking() {
        let (mut game, mut rng) = corridor_game(0);
        game.tick(&mut rng, Some(Dir::Up), 0.07).unwrap();
        assert!(game.player().is_walking());
        game.tick(&mut rng, None, 0.07).unwrap();
        assert!(!game.player().is_walking());
    }

    #[test]
    fn regenerate_swaps_in_a_new_maze() {
        let mut rng = StdRng::seed_from_u64(30);
        let mut game = Game::new(GameSettings::default(), &mut rng).unwrap();
        let before = game.maze().clone();
        game.regenerate(&mut rng).unwrap();
        assert_ne!(game.maze(), &before);
        assert_eq!(game.maze().rows(), before.rows());
        assert_eq!(game.level(), 1);
    }
}

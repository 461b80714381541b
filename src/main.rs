mod config;
mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;
use maze_runner::actor::Dir;
use maze_runner::game::{Game, Status};
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::{read_speed_settings, Args};
use render::Renderer;

const INPUT_HOLD_MS: u64 = 160;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let settings = args.settings();

    if args.print {
        let maze = settings.generator()?.generate(&mut rng)?;
        println!("{}", maze.grid());
        return Ok(());
    }

    let mut game = Game::new(settings, &mut rng)?;
    info!(
        "starting on a {}x{} grid ({:?})",
        game.maze().rows(),
        game.maze().cols(),
        settings.resolution
    );

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut game, &mut rng);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// `RUST_LOG` filters as usual (default `warn`). Set `MAZE_LOG_FILE` to send
/// output to a file instead of the terminal the game draws on.
fn init_logging() -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Ok(path) = std::env::var("MAZE_LOG_FILE") {
        let file = File::create(&path).with_context(|| format!("failed to create log file {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(stdout: &mut Stdout, game: &mut Game, rng: &mut StdRng) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();
    let mut last_seen: [Option<Instant>; 4] = [None; 4];
    let mut last_pressed: Option<Dir> = None;
    let mut renderer = Renderer::new();
    let (tick_ms, render_fps) = read_speed_settings();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let dt = tick_ms as f32 / 1000.0;

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                let dir = match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') => {
                        game.regenerate(rng)?;
                        info!("maze regenerated on request");
                        None
                    }
                    KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Dir::Up),
                    KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Dir::Down),
                    KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Dir::Left),
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Dir::Right),
                    _ => None,
                };
                if let Some(dir) = dir {
                    last_seen[dir.index()] = Some(Instant::now());
                    last_pressed = Some(dir);
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            last_tick = Instant::now();
            let desired = active_dir_recent(&last_seen, last_pressed);
            game.tick(rng, desired, dt)?;
            renderer.render(stdout, game)?;
            if game.status() == Status::GameOver {
                renderer.render_game_over(stdout, game)?;
                return Ok(());
            }
        } else {
            renderer.render(stdout, game)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// The direction still being held: the last one pressed if it repeated
/// recently, otherwise the most recently pressed of the others.
fn active_dir_recent(last_seen: &[Option<Instant>; 4], last_pressed: Option<Dir>) -> Option<Dir> {
    let hold = Duration::from_millis(INPUT_HOLD_MS);
    let held = |dir: Dir| last_seen[dir.index()].filter(|t| t.elapsed() <= hold);
    if let Some(dir) = last_pressed.filter(|&dir| held(dir).is_some()) {
        return Some(dir);
    }
    Dir::ALL
        .into_iter()
        .filter_map(|dir| held(dir).map(|t| (dir, t)))
        .max_by_key(|&(_, t)| t)
        .map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_direction_wins() {
        let now = Instant::now();
        let mut seen = [None; 4];
        seen[Dir::Left.index()] = Some(now);
        seen[Dir::Up.index()] = Some(now);
        assert_eq!(active_dir_recent(&seen, Some(Dir::Left)), Some(Dir::Left));
    }

    #[test]
    fn falls_back_to_latest_other_press() {
        let now = Instant::now();
        let mut seen = [None; 4];
        seen[Dir::Up.index()] = now.checked_sub(Duration::from_millis(50));
        seen[Dir::Right.index()] = Some(now);
        assert_eq!(active_dir_recent(&seen, Some(Dir::Down)), Some(Dir::Right));
    }

    #[test]
    fn stale_presses_are_ignored() {
        let seen = [None; 4];
        assert_eq!(active_dir_recent(&seen, Some(Dir::Down)), None);
    }
}

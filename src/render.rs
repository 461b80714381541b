use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use maze_runner::actor::Dir;
use maze_runner::game::Game;
use maze_runner::maze::Pos;
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player(Dir),
    Npc,
    Wall,
    Empty,
    Object,
    Exit,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        let grid = game.maze().grid();
        let (rows, cols) = (grid.rows(), grid.cols());
        let needed_h = u16::try_from(rows + 2).unwrap_or(u16::MAX);
        let needed_w = u16::try_from(cols * CELL_W).unwrap_or(u16::MAX);

        if self.last.len() != rows * cols {
            self.last = vec![BLANK; rows * cols];
            self.needs_full = true;
        }

        stdout.queue(MoveTo(0, 0))?;
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Lives: {}  Level: {}  Objects: {}  (r new maze, q quit)",
            game.score(),
            game.lives(),
            game.level(),
            game.objects().len()
        );
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..rows {
            for x in 0..cols {
                let cell = cell_for(game, Pos::new(x, y));
                let idx = y * cols + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        stdout.flush()
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player(Dir::Up) => "▲",
            Glyph::Player(Dir::Down) => "▼",
            Glyph::Player(Dir::Left) => "◀",
            Glyph::Player(Dir::Right) => "▶",
            Glyph::Npc => "☻",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Object => "· ",
            Glyph::Exit => "░░",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }

    pub fn render_game_over(&self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        let rows = game.maze().rows() as u16;
        stdout.queue(MoveTo(self.origin_x, self.origin_y + rows))?;
        stdout.queue(Print(format!(
            "GAME OVER - Final Score: {} on level {} (press q to quit)",
            game.score(),
            game.level()
        )))?;
        stdout.flush()?;
        loop {
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    let player = game.player();
    if pos == player.pos {
        // flickers while walking
        let color = if player.stride() > 0.0 {
            Color::Yellow
        } else {
            Color::DarkYellow
        };
        return Cell {
            glyph: Glyph::Player(player.facing),
            color,
        };
    }
    if game.npcs().iter().any(|npc| npc.pos == pos) {
        return Cell {
            glyph: Glyph::Npc,
            color: Color::Red,
        };
    }
    if game.objects().contains(&pos) {
        return Cell {
            glyph: Glyph::Object,
            color: Color::White,
        };
    }
    let maze = game.maze();
    if maze.grid().is_wall(pos.y, pos.x) {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        };
    }
    if maze.exit().contains(pos) {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Green,
        };
    }
    BLANK
}

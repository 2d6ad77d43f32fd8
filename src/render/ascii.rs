//! A text surface: one character per tile, with the HUD on its own line above the board.

use std::io::Write;

use crate::constants::{BOARD_CELL_SIZE, TILE_SIZE};
use crate::entity::{collision::Hitbox, direction::Direction, ghost::GhostColor};
use crate::error::{GameError, GameResult};
use crate::render::{DrawCommand, Frame, RenderSurface, Sprite};

const WIDTH: usize = BOARD_CELL_SIZE.x as usize;
const HEIGHT: usize = BOARD_CELL_SIZE.y as usize;

/// Moves the cursor home and clears the terminal.
const CLEAR: &str = "\x1b[H\x1b[2J";

pub struct AsciiSurface<W: Write> {
    writer: W,
    clear_screen: bool,
}

impl<W: Write> AsciiSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            clear_screen: false,
        }
    }

    /// Clear the terminal before each frame, so frames replace each other.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn sprite_char(sprite: Sprite) -> char {
    match sprite {
        Sprite::Wall => '#',
        Sprite::Pacman(Direction::Up) => 'v',
        Sprite::Pacman(Direction::Down) => '^',
        Sprite::Pacman(Direction::Left) => '>',
        Sprite::Pacman(Direction::Right) => '<',
        Sprite::Ghost(color) => match color {
            GhostColor::Blue => 'B',
            GhostColor::Orange => 'O',
            GhostColor::Pink => 'P',
            GhostColor::Red => 'R',
        },
    }
}

/// The tile containing the center of a box, if it is on the board.
fn cell_of(hitbox: &Hitbox) -> Option<(usize, usize)> {
    let center = hitbox.pos + hitbox.size / 2;
    if center.x < 0 || center.y < 0 {
        return None;
    }
    let (x, y) = ((center.x / TILE_SIZE) as usize, (center.y / TILE_SIZE) as usize);
    (x < WIDTH && y < HEIGHT).then_some((x, y))
}

/// Rasterizes a frame into rows of characters.
///
/// Walls and food are painted first so actors always show on top of them.
pub fn rasterize(frame: &Frame) -> Vec<String> {
    let mut grid = [[' '; WIDTH]; HEIGHT];

    let mut paint = |hitbox: &Hitbox, c: char| {
        if let Some((x, y)) = cell_of(hitbox) {
            grid[y][x] = c;
        }
    };

    for command in &frame.commands {
        match command {
            DrawCommand::Sprite {
                sprite: Sprite::Wall,
                hitbox,
            } => paint(hitbox, '#'),
            DrawCommand::Fill { hitbox, .. } => paint(hitbox, '.'),
            _ => {}
        }
    }
    for (sprite, hitbox) in frame.sprites().filter(|(sprite, _)| *sprite != Sprite::Wall) {
        paint(&hitbox, sprite_char(sprite));
    }

    grid.iter().map(|row| row.iter().collect()).collect()
}

impl<W: Write> RenderSurface for AsciiSurface<W> {
    fn present(&mut self, frame: &Frame) -> GameResult<()> {
        let mut out = String::with_capacity((WIDTH + 1) * (HEIGHT + 1) + CLEAR.len());
        if self.clear_screen {
            out.push_str(CLEAR);
        }
        if let Some(hud) = frame.hud {
            out.push_str(&hud.to_string());
        }
        out.push('\n');
        for row in rasterize(frame) {
            out.push_str(&row);
            out.push('\n');
        }

        self.writer
            .write_all(out.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| GameError::Render(format!("Failed to write frame: {e}")))
    }
}

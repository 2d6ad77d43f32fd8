//! The render boundary.
//!
//! Each tick the game produces a [`Frame`]: a complete, self-contained list of draw commands. Surfaces
//! consume frames and keep no game state of their own, so every frame is a full redraw.

use std::fmt;

use glam::IVec2;

use crate::constants::TILE_SIZE;
use crate::entity::{collision::Hitbox, direction::Direction, ghost::GhostColor};
use crate::error::GameResult;

pub mod ascii;

pub use ascii::AsciiSurface;

/// Images the surface is expected to know how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Pac-Man, facing a direction.
    Pacman(Direction),
    Ghost(GhostColor),
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
}

/// The score line drawn in the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hud {
    Playing { lives: u8, score: u32 },
    GameOver { score: u32 },
}

impl Hud {
    /// Where the HUD text is anchored, in pixels.
    pub const POSITION: IVec2 = IVec2::new(TILE_SIZE / 2, TILE_SIZE / 2);
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hud::Playing { lives, score } => write!(f, "x{lives} {score}"),
            Hud::GameOver { score } => write!(f, "Game Over {score}"),
        }
    }
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Sprite { sprite: Sprite, hitbox: Hitbox },
    Fill { hitbox: Hitbox, color: Color },
    Text { text: String, at: IVec2, color: Color },
}

/// Everything needed to draw one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// The HUD as structured data; also present in `commands` as text.
    pub hud: Option<Hud>,
}

impl Frame {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            hud: None,
        }
    }

    pub fn sprite(&mut self, sprite: Sprite, hitbox: Hitbox) {
        self.commands.push(DrawCommand::Sprite { sprite, hitbox });
    }

    pub fn fill(&mut self, hitbox: Hitbox, color: Color) {
        self.commands.push(DrawCommand::Fill { hitbox, color });
    }

    /// Sets the HUD and emits its text command.
    pub fn hud(&mut self, hud: Hud) {
        self.hud = Some(hud);
        self.commands.push(DrawCommand::Text {
            text: hud.to_string(),
            at: Hud::POSITION,
            color: Color::WHITE,
        });
    }

    /// Iterates over the sprite commands only.
    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, Hitbox)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Sprite { sprite, hitbox } => Some((*sprite, *hitbox)),
            _ => None,
        })
    }

    /// The sprite Pac-Man is drawn with, if present.
    pub fn pacman_sprite(&self) -> Option<Direction> {
        self.sprites().find_map(|(sprite, _)| match sprite {
            Sprite::Pacman(direction) => Some(direction),
            _ => None,
        })
    }
}

/// Something frames can be drawn onto.
pub trait RenderSurface {
    fn present(&mut self, frame: &Frame) -> GameResult<()>;
}

/// A surface that draws nothing and only remembers what it was last shown.
#[derive(Debug, Default)]
pub struct Headless {
    pub frames: u64,
    pub last_hud: Option<Hud>,
}

impl RenderSurface for Headless {
    fn present(&mut self, frame: &Frame) -> GameResult<()> {
        self.frames += 1;
        self.last_hud = frame.hud;
        Ok(())
    }
}

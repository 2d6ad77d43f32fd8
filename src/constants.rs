//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{IVec2, UVec2};

use crate::entity::ghost::GhostColor;

/// The fixed period between two simulation ticks (20 ticks per second).
pub const LOOP_TIME: Duration = Duration::from_millis(50);

/// The size of each cell, in pixels.
pub const TILE_SIZE: i32 = 32;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(19, 21);
/// The size of the game board, in pixels.
pub const BOARD_PIXEL_SIZE: IVec2 = IVec2::new(
    BOARD_CELL_SIZE.x as i32 * TILE_SIZE,
    BOARD_CELL_SIZE.y as i32 * TILE_SIZE,
);

/// The distance an actor travels in a single tick, in pixels.
pub const STEP_SIZE: i32 = TILE_SIZE / 4;

/// The size of a food block, in pixels.
pub const FOOD_SIZE: i32 = 4;
/// The offset of a food block from the top-left corner of its cell, in pixels.
pub const FOOD_OFFSET: i32 = 14;
/// Points awarded for each food block eaten.
pub const FOOD_SCORE: u32 = 10;

/// Lives the player starts (and restarts) with.
pub const STARTING_LIVES: u8 = 3;

/// The row of the ghost house exit. Ghosts moving horizontally on this row are sent upward.
pub const GHOST_CHUTE_ROW: i32 = 9;

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// A wall tile.
    Wall,
    /// An empty corridor tile holding a food block.
    Food,
    /// A gap at the edge of the maze. Holds nothing and blocks nothing.
    Tunnel,
    /// Pac-Man's starting position.
    PlayerSpawn,
    /// A ghost's starting position.
    GhostSpawn(GhostColor),
}

/// The raw layout of the game board, as a 2D array of characters.
///
/// `X` is a wall, `O` a tunnel gap, `P` Pac-Man, ` ` food, and `b`/`o`/`p`/`r` the ghosts.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "XXXXXXXXXXXXXXXXXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X                 X",
    "X XX X XXXXX X XX X",
    "X    X       X    X",
    "XXXX XXXX XXXX XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXrXX X XXXX",
    "O       bpo       O",
    "XXXX X XXXXX X XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXXXX X XXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X  X     P     X  X",
    "XX X X XXXXX X X XX",
    "X    X   X   X    X",
    "X XXXXXX X XXXXXX X",
    "X                 X",
    "XXXXXXXXXXXXXXXXXXX",
];

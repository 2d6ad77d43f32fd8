//! Centralized error types for the game.
//!
//! The simulation itself never fails; these errors cover the boundaries around it:
//! board parsing, configuration, render surfaces and gesture input.

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Gesture error: {0}")]
    Gesture(#[from] GestureError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board row {row} has {found} columns, expected {expected}")]
    InvalidRowLength { row: usize, found: usize, expected: usize },
    #[error("Board must have exactly 1 player spawn, found {0}")]
    InvalidPlayerSpawnCount(usize),
    #[error("Duplicate spawn for the {0} ghost")]
    DuplicateGhostSpawn(&'static str),
    #[error("Missing spawn for the {0} ghost")]
    MissingGhostSpawn(&'static str),
}

/// Errors produced while feeding data into the gesture detectors.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GestureError {
    #[error("Frame has {found} bytes, expected {expected} ({width}x{height} RGBA)")]
    FrameSize {
        found: usize,
        expected: usize,
        width: usize,
        height: usize,
    },
    #[error("Hand has {found} landmarks, expected {expected}")]
    LandmarkCount { found: usize, expected: usize },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

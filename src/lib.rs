//! Pac-Man maze-chase simulation with keyboard and webcam-gesture input.

pub mod app;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod formatter;
pub mod game;
pub mod gesture;
pub mod input;
pub mod logging;
pub mod map;
pub mod render;
pub mod scheduler;

//! Everything that occupies space on the board: actors, their directions, and collision boxes.

pub mod actor;
pub mod collision;
pub mod direction;
pub mod ghost;

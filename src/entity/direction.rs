use glam::IVec2;
use strum_macros::AsRefStr;

use crate::constants::STEP_SIZE;

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is just a convenience constant for iterating over (or picking from) the directions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the unit vector for this direction (screen coordinates, Y grows downward).
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// The per-tick velocity of an actor moving in this direction.
    pub fn velocity(self) -> IVec2 {
        self.as_ivec2() * STEP_SIZE
    }

    /// Whether this direction moves along the X axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The single-letter code used in status text (`U`, `D`, `L`, `R`).
    pub const fn as_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

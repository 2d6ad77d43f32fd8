use crate::entity::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MovePlayer(Direction),
    Exit,
    TogglePause,
    /// A key with no binding. It still counts as input, which restarts a finished game.
    AnyKey,
}

impl GameCommand {
    /// Commands handled by the driver (scheduler/app) rather than by the game itself.
    pub const fn is_control(self) -> bool {
        matches!(self, GameCommand::Exit | GameCommand::TogglePause)
    }
}

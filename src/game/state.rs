use bitflags::bitflags;

use crate::constants::{FOOD_SCORE, STARTING_LIVES};

/// A high-level view of where the game is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Running,
    /// The player ran out of lives. Nothing moves until a restart.
    GameOver,
}

/// Score, lives and stage. Owned by the game loop and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub lives: u8,
    pub stage: GameStage,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            stage: GameStage::Running,
        }
    }
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.stage == GameStage::GameOver
    }

    /// Credits one eaten food block.
    pub fn add_food(&mut self) {
        self.score += FOOD_SCORE;
    }

    /// Takes one life away, entering game over when none remain.
    ///
    /// Returns true if that was the last life.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.stage = GameStage::GameOver;
        }
        self.is_game_over()
    }
}

bitflags! {
    /// Everything notable that happened during a single tick.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TickOutcome: u8 {
        /// Pac-Man ran into a wall and stayed put.
        const PLAYER_BLOCKED = 1 << 0;
        /// At least one ghost was blocked and picked a new direction.
        const GHOST_REDIRECTED = 1 << 1;
        /// A ghost caught Pac-Man and a life was lost.
        const LIFE_LOST = 1 << 2;
        /// The last life was lost.
        const GAME_OVER = 1 << 3;
        /// A food block was eaten.
        const FOOD_EATEN = 1 << 4;
        /// The last food block was eaten and the maze was reloaded.
        const LEVEL_COMPLETE = 1 << 5;
        /// The tick was skipped because the game is over.
        const SKIPPED = 1 << 6;
    }
}

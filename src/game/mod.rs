//! This module contains the main game logic and state.
//!
//! [`GameLoop`] owns everything that changes during play: the maze sets, the actors, the score and
//! the random source driving the ghosts. Nothing outside it mutates them, and several instances can
//! coexist.

use rand::{rngs::SmallRng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::constants::RAW_BOARD;
use crate::entity::{
    actor::{Actor, Role, Turn},
    collision::Collidable,
    direction::Direction,
    ghost::{self, tick_ghost},
};
use crate::error::GameResult;
use crate::input::{commands::GameCommand, InputAdapter};
use crate::map::builder::Map;
use crate::render::{Color, Frame, Hud, Sprite};

use self::state::{GameStage, GameState, TickOutcome};

pub mod state;

/// The simulation: one maze, one player, four ghosts.
pub struct GameLoop {
    state: GameState,
    map: Map,
    player: Actor,
    ghosts: SmallVec<[Actor; 4]>,
    rng: SmallRng,
    /// The last direction asked for, accepted or not.
    requested_facing: Direction,
    /// The direction Pac-Man is drawn facing. Catches up with `requested_facing` once per tick.
    facing: Direction,
}

impl GameLoop {
    /// Creates a game on the standard board, with ghosts driven by OS entropy.
    pub fn new() -> GameResult<GameLoop> {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Creates a game whose ghost movement is fully determined by `seed`.
    pub fn with_seed(seed: u64) -> GameResult<GameLoop> {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> GameResult<GameLoop> {
        let map = Map::new(RAW_BOARD)?;
        let player = map.spawn_player();
        let ghosts = map.spawn_ghosts();

        let mut game = GameLoop {
            state: GameState::default(),
            map,
            player,
            ghosts,
            rng,
            requested_facing: Direction::Right,
            facing: Direction::Right,
        };
        game.reset_positions();
        info!(ghosts = game.ghosts.len(), foods = game.map.foods.len(), "Game created");
        Ok(game)
    }

    /// Rebuilds walls, food and actors from the board layout.
    ///
    /// Score and lives are untouched.
    pub fn load_map(&mut self) {
        self.map.load();
        self.player = self.map.spawn_player();
        self.ghosts = self.map.spawn_ghosts();
        self.requested_facing = Direction::Right;
        self.facing = Direction::Right;
    }

    /// Sends every actor back to its spawn. Pac-Man stops; each ghost heads off in a random direction.
    pub fn reset_positions(&mut self) {
        self.player.reset();
        for ghost in self.ghosts.iter_mut() {
            ghost.reset();
            ghost::redirect(ghost, &self.map.walls, &mut self.rng);
        }
    }

    /// Starts over from a fresh maze with a full set of lives.
    pub fn restart(&mut self) {
        self.load_map();
        self.reset_positions();
        self.state = GameState::default();
        info!("Game restarted");
    }

    /// Advances the simulation by one fixed step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_game_over() {
            return TickOutcome::SKIPPED;
        }

        let mut outcome = TickOutcome::empty();

        if !self.player.advance(&self.map.walls) {
            outcome |= TickOutcome::PLAYER_BLOCKED;
        }

        for index in 0..self.ghosts.len() {
            if self.ghosts[index].is_colliding_with(&self.player) {
                outcome |= TickOutcome::LIFE_LOST;
                if self.state.lose_life() {
                    outcome |= TickOutcome::GAME_OVER;
                    info!(score = self.state.score, "Game over");
                    return outcome;
                }
                debug!(lives = self.state.lives, ghost = ?self.ghosts[index].role, "Life lost");
                self.reset_positions();
            }

            if tick_ghost(&mut self.ghosts[index], &self.map.walls, &mut self.rng) {
                outcome |= TickOutcome::GHOST_REDIRECTED;
            }
        }

        if self.map.eat_food(&self.player.hitbox).is_some() {
            self.state.add_food();
            outcome |= TickOutcome::FOOD_EATEN;
        }

        if self.map.is_cleared() {
            outcome |= TickOutcome::LEVEL_COMPLETE;
            debug!(score = self.state.score, "Level complete");
            self.load_map();
            self.reset_positions();
        }

        // PlayerAppearance
        self.facing = self.requested_facing;

        trace!(?outcome, score = self.state.score, lives = self.state.lives, "Tick");
        outcome
    }

    /// Builds the complete draw list for the current state.
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::with_capacity(1 + self.ghosts.len() + self.map.walls.len() + self.map.foods.len() + 1);

        frame.sprite(Sprite::Pacman(self.facing), self.player.hitbox);
        for ghost in &self.ghosts {
            if let Role::Ghost(color) = ghost.role {
                frame.sprite(Sprite::Ghost(color), ghost.hitbox);
            }
        }
        for wall in &self.map.walls {
            frame.sprite(Sprite::Wall, *wall);
        }
        for food in &self.map.foods {
            frame.fill(*food, Color::WHITE);
        }

        frame.hud(match self.state.stage {
            GameStage::Running => Hud::Playing {
                lives: self.state.lives,
                score: self.state.score,
            },
            GameStage::GameOver => Hud::GameOver {
                score: self.state.score,
            },
        });
        frame
    }

    /// Applies a command coming from any input source.
    ///
    /// While the game is over, any command restarts it and is otherwise ignored. Control commands
    /// (pause, exit) are the driver's business and do nothing here.
    pub fn handle_command(&mut self, command: GameCommand) {
        if self.state.is_game_over() {
            self.restart();
            return;
        }

        if let GameCommand::MovePlayer(direction) = command {
            self.turn_player(direction);
        }
    }

    fn turn_player(&mut self, direction: Direction) {
        self.requested_facing = direction;
        if self.player.set_direction(direction, &self.map.walls) == Turn::Rejected {
            trace!(requested = direction.as_ref(), kept = self.player.direction.as_ref(), "Turn rejected");
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Actor {
        &mut self.player
    }

    pub fn ghosts(&self) -> &[Actor] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut [Actor] {
        &mut self.ghosts
    }

    /// The direction Pac-Man's sprite currently faces.
    pub fn player_facing(&self) -> Direction {
        self.facing
    }
}

impl InputAdapter for GameLoop {
    fn request_direction(&mut self, direction: Direction) {
        self.handle_command(GameCommand::MovePlayer(direction));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{STEP_SIZE, TILE_SIZE};
    use glam::IVec2;

    fn quiet_game() -> GameLoop {
        let mut game = GameLoop::with_seed(42).unwrap();
        // Park the ghosts far from the player so they never interfere.
        for ghost in game.ghosts_mut() {
            ghost.set_position(IVec2::new(9, 9) * TILE_SIZE);
        }
        game
    }

    #[test]
    fn test_fresh_game() {
        let game = GameLoop::with_seed(1).unwrap();
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().lives, 3);
        assert_eq!(game.ghosts().len(), 4);
        assert_eq!(game.player().velocity(), IVec2::ZERO);
        assert!(game.ghosts().iter().all(|g| g.is_moving()));
    }

    #[test]
    fn test_game_over_tick_is_skipped() {
        let mut game = quiet_game();
        game.state_mut().stage = GameStage::GameOver;
        let before = game.player().position();
        assert_eq!(game.tick(), TickOutcome::SKIPPED);
        assert_eq!(game.player().position(), before);
    }

    #[test]
    fn test_handle_command_restarts_after_game_over() {
        let mut game = quiet_game();
        game.state_mut().score = 50;
        game.state_mut().lives = 0;
        game.state_mut().stage = GameStage::GameOver;

        game.handle_command(GameCommand::AnyKey);
        assert_eq!(*game.state(), GameState::default());
        // The restarting key does not steer.
        assert_eq!(game.player().velocity(), IVec2::ZERO);
    }

    #[test]
    fn test_control_commands_do_not_steer() {
        let mut game = quiet_game();
        game.handle_command(GameCommand::TogglePause);
        game.handle_command(GameCommand::Exit);
        assert!(!game.player().is_moving());
    }

    #[test]
    fn test_facing_updates_on_tick() {
        let mut game = quiet_game();
        game.request_direction(Direction::Left);
        assert_eq!(game.player_facing(), Direction::Right);
        game.tick();
        assert_eq!(game.player_facing(), Direction::Left);
        assert_eq!(game.player().velocity(), IVec2::new(-STEP_SIZE, 0));
    }

    #[test]
    fn test_frame_contents() {
        let game = quiet_game();
        let frame = game.frame();
        let sprites = frame.sprites().count();
        assert_eq!(sprites, 1 + 4 + game.map().walls.len());
        assert_eq!(frame.pacman_sprite(), Some(Direction::Right));
        assert_eq!(frame.hud, Some(Hud::Playing { lives: 3, score: 0 }));
    }
}

//! Moving actors (Pac-Man and the ghosts) and the direction controller shared by both.

use glam::IVec2;

use crate::entity::{
    collision::{Collidable, Hitbox},
    direction::Direction,
    ghost::GhostColor,
};

/// What an actor is, used wherever behavior or appearance depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Ghost(GhostColor),
}

/// Outcome of a direction change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The actor now faces the requested direction and has taken one step in it.
    Accepted,
    /// The step would have entered a wall; the actor kept its previous direction.
    Rejected,
}

/// A movable box on the board.
///
/// Velocity is never stored: it is always one step in `direction`, or zero while `moving` is false
/// (only right after a reset, until the next direction change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub role: Role,
    pub hitbox: Hitbox,
    pub direction: Direction,
    moving: bool,
    spawn: IVec2,
}

impl Actor {
    /// Creates a stationary actor at `spawn`, facing right.
    pub fn new(role: Role, spawn: IVec2, size: IVec2) -> Self {
        Self {
            role,
            hitbox: Hitbox::new(spawn, size),
            direction: Direction::default(),
            moving: false,
            spawn,
        }
    }

    pub fn position(&self) -> IVec2 {
        self.hitbox.pos
    }

    /// Moves the actor without any collision checks.
    pub fn set_position(&mut self, pos: IVec2) {
        self.hitbox.pos = pos;
    }

    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// The displacement applied on each tick.
    pub fn velocity(&self) -> IVec2 {
        if self.moving {
            self.direction.velocity()
        } else {
            IVec2::ZERO
        }
    }

    /// Applies the current velocity once.
    pub fn step(&mut self) {
        self.hitbox.pos += self.velocity();
    }

    /// Undoes one application of the current velocity.
    pub fn unstep(&mut self) {
        self.hitbox.pos -= self.velocity();
    }

    /// Returns the actor to its spawn and stops it. The facing direction is kept.
    pub fn reset(&mut self) {
        self.hitbox.pos = self.spawn;
        self.moving = false;
    }

    /// Turns the actor toward `direction`, peeking one step ahead.
    ///
    /// If that step overlaps a wall the step is undone and the previous direction restored (with its
    /// velocity, so the actor keeps going the way it already could). Otherwise the actor stays where
    /// the step put it.
    pub fn set_direction(&mut self, direction: Direction, walls: &[Hitbox]) -> Turn {
        let fallback = self.direction;

        self.direction = direction;
        self.moving = true;
        self.step();

        if self.collides_with_any(walls) {
            self.unstep();
            self.direction = fallback;
            return Turn::Rejected;
        }

        Turn::Accepted
    }

    /// Advances one step, backing out if the new box overlaps a wall.
    ///
    /// Returns false if the step was blocked.
    pub fn advance(&mut self, walls: &[Hitbox]) -> bool {
        self.step();
        if self.collides_with_any(walls) {
            self.unstep();
            return false;
        }
        true
    }
}

impl Collidable for Actor {
    fn hitbox(&self) -> Hitbox {
        self.hitbox
    }
}

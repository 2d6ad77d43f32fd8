//! Ghost movement policy.
//!
//! Ghosts wander: they keep going until blocked, then pick a uniformly random direction. Ghosts
//! crossing the ghost-house row sideways are pushed upward so they leave the pen.

use rand::Rng;
use strum_macros::{AsRefStr, EnumIter, IntoStaticStr};
use tracing::trace;

use crate::constants::{BOARD_PIXEL_SIZE, GHOST_CHUTE_ROW, TILE_SIZE};
use crate::entity::{
    actor::{Actor, Turn},
    collision::{Collidable, Hitbox},
    direction::Direction,
};

/// The four ghosts, identified by color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostColor {
    Blue,
    Orange,
    Pink,
    Red,
}

impl GhostColor {
    /// Returns the board character marking this ghost's spawn.
    pub const fn spawn_char(self) -> char {
        match self {
            GhostColor::Blue => 'b',
            GhostColor::Orange => 'o',
            GhostColor::Pink => 'p',
            GhostColor::Red => 'r',
        }
    }
}

/// Picks one of the four directions uniformly at random.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::DIRECTIONS[rng.random_range(0..Direction::DIRECTIONS.len())]
}

/// Sends the ghost off in a fresh random direction (which may itself be rejected).
pub fn redirect<R: Rng + ?Sized>(ghost: &mut Actor, walls: &[Hitbox], rng: &mut R) -> Turn {
    let direction = random_direction(rng);
    ghost.set_direction(direction, walls)
}

/// Whether the ghost sits exactly on the ghost-house row.
fn on_chute_row(ghost: &Actor) -> bool {
    ghost.position().y == GHOST_CHUTE_ROW * TILE_SIZE
}

/// Whether the ghost has left the board through a side gap.
fn outside_board(ghost: &Actor) -> bool {
    let hitbox = ghost.hitbox();
    hitbox.pos.x < 0 || hitbox.max().x > BOARD_PIXEL_SIZE.x
}

/// Runs one tick of movement for a single ghost.
///
/// Returns true if the ghost was blocked this tick and had to pick a new direction.
pub fn tick_ghost<R: Rng + ?Sized>(ghost: &mut Actor, walls: &[Hitbox], rng: &mut R) -> bool {
    if on_chute_row(ghost) && ghost.direction.is_horizontal() {
        ghost.set_direction(Direction::Up, walls);
    }

    ghost.step();
    if ghost.collides_with_any(walls) || outside_board(ghost) {
        ghost.unstep();
        let turn = redirect(ghost, walls, rng);
        // The redirect's peek step only checks walls; a step back out through the gap is undone.
        if outside_board(ghost) {
            ghost.unstep();
        }
        trace!(role = ?ghost.role, ?turn, direction = ghost.direction.as_ref(), "Ghost blocked");
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::actor::Role;
    use glam::IVec2;
    use rand::{rngs::SmallRng, SeedableRng};
    use strum::IntoEnumIterator;

    fn ghost_at(col: i32, row: i32) -> Actor {
        Actor::new(
            Role::Ghost(GhostColor::Red),
            IVec2::new(col, row) * TILE_SIZE,
            IVec2::splat(TILE_SIZE),
        )
    }

    fn wall(col: i32, row: i32) -> Hitbox {
        Hitbox::new(IVec2::new(col, row) * TILE_SIZE, IVec2::splat(TILE_SIZE))
    }

    #[test]
    fn test_random_direction_covers_all_directions() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let index = Direction::DIRECTIONS
                .iter()
                .position(|d| *d == random_direction(&mut rng))
                .unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_unblocked_ghost_keeps_direction() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ghost = ghost_at(3, 3);
        ghost.set_direction(Direction::Down, &[]);
        let before = ghost.position();
        assert!(!tick_ghost(&mut ghost, &[], &mut rng));
        assert_eq!(ghost.position(), before + IVec2::new(0, 8));
        assert_eq!(ghost.direction, Direction::Down);
    }

    #[test]
    fn test_blocked_ghost_never_enters_wall() {
        let mut rng = SmallRng::seed_from_u64(3);
        let walls = [wall(4, 3), wall(3, 2), wall(3, 4), wall(2, 3)];
        let mut ghost = ghost_at(3, 3);
        assert_eq!(ghost.set_direction(Direction::Right, &walls), Turn::Rejected);
        for _ in 0..50 {
            tick_ghost(&mut ghost, &walls, &mut rng);
            assert!(!ghost.collides_with_any(&walls));
        }
        assert_eq!(ghost.position(), IVec2::new(3, 3) * TILE_SIZE);
    }

    #[test]
    fn test_ghost_cannot_leave_board_sideways() {
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut ghost = ghost_at(0, 2);
            ghost.set_direction(Direction::Left, &[]);
            ghost.set_position(IVec2::new(0, 2 * TILE_SIZE));
            assert!(tick_ghost(&mut ghost, &[], &mut rng));
            assert!(!outside_board(&ghost), "seed {seed} left the ghost at {}", ghost.position());
        }
    }

    #[test]
    fn test_redirect_back_into_gap_stays_on_board() {
        // Walls above and below leave only the way back out through the left gap.
        let walls = [wall(0, 1), wall(0, 3), wall(1, 2)];
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut ghost = ghost_at(0, 2);
            ghost.set_direction(Direction::Left, &[]);
            ghost.set_position(IVec2::new(0, 2 * TILE_SIZE));
            tick_ghost(&mut ghost, &walls, &mut rng);
            assert_eq!(ghost.position(), IVec2::new(0, 2 * TILE_SIZE));
        }
    }

    #[test]
    fn test_chute_row_sends_horizontal_ghost_up() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ghost = ghost_at(9, GHOST_CHUTE_ROW);
        ghost.set_direction(Direction::Left, &[]);
        ghost.set_position(IVec2::new(9, GHOST_CHUTE_ROW) * TILE_SIZE);
        tick_ghost(&mut ghost, &[], &mut rng);
        assert_eq!(ghost.direction, Direction::Up);
        // One step from the turn itself, one from the tick.
        assert_eq!(ghost.position(), IVec2::new(9 * TILE_SIZE, GHOST_CHUTE_ROW * TILE_SIZE - 16));
    }

    #[test]
    fn test_ghost_colors() {
        let chars: String = GhostColor::iter().map(GhostColor::spawn_char).collect();
        assert_eq!(chars, "bopr");
        assert_eq!(GhostColor::Pink.as_ref(), "pink");
    }
}

#![allow(dead_code)]

use glam::IVec2;
use pacman_gesture::constants::TILE_SIZE;
use pacman_gesture::entity::collision::Hitbox;
use pacman_gesture::game::GameLoop;

/// Pixel origin of a board cell.
pub fn cell(x: i32, y: i32) -> IVec2 {
    IVec2::new(x, y) * TILE_SIZE
}

pub fn food_at(x: i32, y: i32) -> Hitbox {
    Hitbox::new(cell(x, y) + IVec2::splat(14), IVec2::splat(4))
}

/// A seeded game with the ghosts moved out of the player's way.
pub fn quiet_game() -> GameLoop {
    let mut game = GameLoop::with_seed(0xC0FFEE).unwrap();
    park_ghosts(&mut game);
    game
}

/// Moves every ghost far off the board. They keep ticking but never meet the player, until the next
/// reset sends them back to their spawns.
pub fn park_ghosts(game: &mut GameLoop) {
    for (index, ghost) in game.ghosts_mut().iter_mut().enumerate() {
        ghost.set_position(IVec2::new(-10_000 - 100 * index as i32, -10_000));
    }
}

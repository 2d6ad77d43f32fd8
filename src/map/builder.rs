//! Map construction: turns the parsed board into walls, food and actors.

use glam::IVec2;
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{MapTile, BOARD_CELL_SIZE, FOOD_OFFSET, FOOD_SIZE, TILE_SIZE};
use crate::entity::actor::{Actor, Role};
use crate::entity::collision::Hitbox;
use crate::error::GameResult;
use crate::map::parser::{MapTileParser, ParsedMap};

/// The main map structure: the board layout plus the per-level wall and food sets.
#[derive(Debug, Clone)]
pub struct Map {
    /// Wall tiles, in board scan order. Immutable for the duration of a level.
    pub walls: Vec<Hitbox>,
    /// Remaining food blocks, in board scan order. Shrinks as Pac-Man eats.
    pub foods: Vec<Hitbox>,
    /// The parsed layout every level is rebuilt from.
    layout: ParsedMap,
}

impl Map {
    /// Creates a new `Map` from a raw board layout and populates the first level.
    pub fn new(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> GameResult<Map> {
        let layout = MapTileParser::parse_board(raw_board)?;
        let mut map = Map {
            walls: Vec::new(),
            foods: Vec::new(),
            layout,
        };
        map.load();
        Ok(map)
    }

    /// Clears and repopulates the wall and food sets from the layout.
    pub fn load(&mut self) {
        self.walls.clear();
        self.foods.clear();

        for (cell, tile) in self.layout.cells() {
            let origin = cell * TILE_SIZE;
            match tile {
                MapTile::Wall => self.walls.push(Hitbox::new(origin, IVec2::splat(TILE_SIZE))),
                MapTile::Food => self
                    .foods
                    .push(Hitbox::new(origin + IVec2::splat(FOOD_OFFSET), IVec2::splat(FOOD_SIZE))),
                MapTile::Tunnel | MapTile::PlayerSpawn | MapTile::GhostSpawn(_) => {}
            }
        }

        debug!(walls = self.walls.len(), foods = self.foods.len(), "Map loaded");
    }

    pub fn layout(&self) -> &ParsedMap {
        &self.layout
    }

    /// Creates Pac-Man at his spawn cell.
    pub fn spawn_player(&self) -> Actor {
        Actor::new(Role::Player, self.layout.player_spawn * TILE_SIZE, IVec2::splat(TILE_SIZE))
    }

    /// Creates the four ghosts at their spawn cells, in board scan order.
    pub fn spawn_ghosts(&self) -> SmallVec<[Actor; 4]> {
        self.layout
            .ghost_spawns
            .iter()
            .map(|(color, cell)| Actor::new(Role::Ghost(*color), *cell * TILE_SIZE, IVec2::splat(TILE_SIZE)))
            .collect()
    }

    /// Removes the first food block (in scan order) overlapping `hitbox`.
    ///
    /// At most one block is removed per call, even if several overlap.
    pub fn eat_food(&mut self, hitbox: &Hitbox) -> Option<Hitbox> {
        let index = self.foods.iter().position(|food| hitbox.overlaps(food))?;
        Some(self.foods.remove(index))
    }

    /// Returns true once every food block of the level is gone.
    pub fn is_cleared(&self) -> bool {
        self.foods.is_empty()
    }
}

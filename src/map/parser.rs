//! Map parsing functionality for converting raw board layouts into structured data.

use glam::IVec2;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::constants::{MapTile, BOARD_CELL_SIZE};
use crate::entity::ghost::GhostColor;
use crate::error::ParseError;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    /// The parsed tile layout, indexed as `tiles[x][y]`.
    pub tiles: [[MapTile; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize],
    /// Pac-Man's starting cell.
    pub player_spawn: IVec2,
    /// Each ghost's starting cell, in board scan order (top to bottom, left to right).
    pub ghost_spawns: SmallVec<[(GhostColor, IVec2); 4]>,
}

impl ParsedMap {
    /// Iterates over every cell in scan order (row by row), yielding the cell and its tile.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        (0..BOARD_CELL_SIZE.y as usize).flat_map(move |y| {
            (0..BOARD_CELL_SIZE.x as usize).map(move |x| (IVec2::new(x as i32, y as i32), self.tiles[x][y]))
        })
    }
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// # Returns
    ///
    /// The parsed map tile, or an error if the character is unknown.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            'X' => Ok(MapTile::Wall),
            ' ' => Ok(MapTile::Food),
            'O' => Ok(MapTile::Tunnel),
            'P' => Ok(MapTile::PlayerSpawn),
            _ => GhostColor::iter()
                .find(|color| color.spawn_char() == c)
                .map(MapTile::GhostSpawn)
                .ok_or(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if a row has the wrong width, the board contains unknown characters, or
    /// the board does not hold exactly one Pac-Man spawn and one spawn per ghost.
    pub fn parse_board(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> Result<ParsedMap, ParseError> {
        let mut tiles = [[MapTile::Tunnel; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize];
        let mut player_spawns: SmallVec<[IVec2; 1]> = SmallVec::new();
        let mut ghost_spawns: SmallVec<[(GhostColor, IVec2); 4]> = SmallVec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let width = line.chars().count();
            if width != BOARD_CELL_SIZE.x as usize {
                return Err(ParseError::InvalidRowLength {
                    row: y,
                    found: width,
                    expected: BOARD_CELL_SIZE.x as usize,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let cell = IVec2::new(x as i32, y as i32);

                match tile {
                    MapTile::PlayerSpawn => player_spawns.push(cell),
                    MapTile::GhostSpawn(color) => {
                        if ghost_spawns.iter().any(|(existing, _)| *existing == color) {
                            return Err(ParseError::DuplicateGhostSpawn(color.into()));
                        }
                        ghost_spawns.push((color, cell));
                    }
                    _ => {}
                }

                tiles[x][y] = tile;
            }
        }

        let player_spawn = match player_spawns.as_slice() {
            [spawn] => *spawn,
            spawns => return Err(ParseError::InvalidPlayerSpawnCount(spawns.len())),
        };

        if let Some(missing) = GhostColor::iter().find(|color| ghost_spawns.iter().all(|(c, _)| c != color)) {
            return Err(ParseError::MissingGhostSpawn(missing.into()));
        }

        Ok(ParsedMap {
            tiles,
            player_spawn,
            ghost_spawns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('X'), Ok(MapTile::Wall));
        assert_eq!(MapTileParser::parse_character(' '), Ok(MapTile::Food));
        assert_eq!(MapTileParser::parse_character('O'), Ok(MapTile::Tunnel));
        assert_eq!(MapTileParser::parse_character('P'), Ok(MapTile::PlayerSpawn));
        assert_eq!(
            MapTileParser::parse_character('r'),
            Ok(MapTile::GhostSpawn(GhostColor::Red))
        );
        assert_eq!(MapTileParser::parse_character('Z'), Err(ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_parse_board() {
        let parsed = MapTileParser::parse_board(RAW_BOARD).unwrap();

        assert_eq!(parsed.player_spawn, IVec2::new(9, 15));
        assert_eq!(parsed.ghost_spawns.len(), 4);
        // Red sits above the other three, so it is found first.
        assert_eq!(parsed.ghost_spawns[0], (GhostColor::Red, IVec2::new(9, 8)));
        assert_eq!(parsed.tiles[0][9], MapTile::Tunnel);
        assert_eq!(parsed.tiles[0][0], MapTile::Wall);
    }

    #[test]
    fn test_parse_board_invalid_character() {
        let mut invalid_board = RAW_BOARD;
        invalid_board[1] = "X        X       ZX";

        let result = MapTileParser::parse_board(invalid_board);
        assert_eq!(result.unwrap_err(), ParseError::UnknownCharacter('Z'));
    }

    #[test]
    fn test_parse_board_short_row() {
        let mut invalid_board = RAW_BOARD;
        invalid_board[3] = "X   X";

        let result = MapTileParser::parse_board(invalid_board);
        assert!(matches!(result, Err(ParseError::InvalidRowLength { row: 3, found: 5, .. })));
    }

    #[test]
    fn test_parse_board_second_player() {
        let mut invalid_board = RAW_BOARD;
        invalid_board[19] = "X        P        X";

        let result = MapTileParser::parse_board(invalid_board);
        assert_eq!(result.unwrap_err(), ParseError::InvalidPlayerSpawnCount(2));
    }

    #[test]
    fn test_parse_board_missing_ghost() {
        let mut invalid_board = RAW_BOARD;
        invalid_board[8] = "XXXX X XX XX X XXXX";

        let result = MapTileParser::parse_board(invalid_board);
        assert_eq!(result.unwrap_err(), ParseError::MissingGhostSpawn("red"));
    }
}

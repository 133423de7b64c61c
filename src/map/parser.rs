//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::MapTile;
use crate::error::ParseError;
use glam::IVec2;

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    /// Width of the board, in cells.
    pub width: i32,
    /// Height of the board, in cells.
    pub height: i32,
    /// The parsed tile layout, row-major.
    pub tiles: Vec<MapTile>,
    /// The positions of the tunnel end tiles.
    pub tunnel_ends: Vec<IVec2>,
    /// The cell marked as Pac-Man's starting position.
    pub player_start: IVec2,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Tunnel ends (`T`) and the player start (`X`) are walkable empty tiles; their
    /// positions are tracked separately by [`MapTileParser::parse_board`].
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::SmallPickup),
            'o' => Ok(MapTile::BigPickup),
            ' ' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Empty),
            'X' => Ok(MapTile::Empty),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, contains unknown characters, has rows of
    /// differing widths, or does not mark the player start exactly once.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let expected = raw_board.first().ok_or(ParseError::EmptyBoard)?.chars().count();
        if expected == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut tiles = Vec::with_capacity(expected * raw_board.len());
        let mut tunnel_ends = Vec::new();
        let mut player_starts = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(ParseError::RaggedRow { row: y, found, expected });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let cell = IVec2::new(x as i32, y as i32);

                match character {
                    'T' => tunnel_ends.push(cell),
                    'X' => player_starts.push(cell),
                    _ => {}
                }

                tiles.push(tile);
            }
        }

        let &[player_start] = player_starts.as_slice() else {
            return Err(ParseError::InvalidPlayerStartCount(player_starts.len()));
        };

        Ok(ParsedMap {
            width: expected as i32,
            height: raw_board.len() as i32,
            tiles,
            tunnel_ends,
            player_start,
        })
    }
}

//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each cell, in pixels.
pub const CELL_SIZE: u32 = 8;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);
/// The size of the game board, in pixels.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * CELL_SIZE, BOARD_CELL_SIZE.y * CELL_SIZE);

/// Capacity of the entity store. The board holds fewer pickups than this, so running out is a bug.
pub const MAX_ENTITIES: usize = 256;

/// How far (in pixels, per axis) a position may be from its cell's center and still count as centered.
pub const CENTER_TOLERANCE: f32 = 2.0;

pub mod speed {
    //! Default movement speeds, in pixels per second.

    pub const PLAYER: f32 = 42.0;
    pub const GHOST: f32 = 40.0;
    /// Frightened ghosts crawl at half their normal speed.
    pub const GHOST_FRIGHTENED: f32 = GHOST * 0.5;
    /// Eaten ghosts rush home at double speed.
    pub const GHOST_EATEN: f32 = GHOST * 2.0;
}

pub mod mode {
    //! Default ghost mode durations, in seconds.

    pub const CHASE_SECONDS: f32 = 20.0;
    pub const SCATTER_SECONDS: f32 = 7.0;
    pub const FRIGHTENED_SECONDS: f32 = 6.0;
}

pub mod animation {
    //! Animation timings, in seconds per frame.

    pub const PLAYER_FRAME_SECONDS: f32 = 0.05;
    pub const GHOST_FRAME_SECONDS: f32 = 0.15;
    pub const FRIGHTENED_FRAME_SECONDS: f32 = 0.2;
    pub const BIG_PICKUP_FRAME_SECONDS: f32 = 0.25;
    pub const DEATH_FRAME_SECONDS: f32 = 0.1;
    /// Number of frames in the player's death strip.
    pub const DEATH_FRAMES: u8 = 11;
}

pub mod score {
    pub const SMALL_PICKUP: u32 = 10;
    pub const BIG_PICKUP: u32 = 50;
    pub const GHOST: u32 = 200;
}

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapTile {
    /// An empty, walkable tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A small pickup (pellet).
    SmallPickup,
    /// A big pickup (energizer).
    BigPickup,
}

impl MapTile {
    /// Whether entities may stand on this tile.
    pub const fn is_walkable(self) -> bool {
        !matches!(self, MapTile::Wall)
    }

    /// Whether the tile holds something the player can consume.
    pub const fn is_pickup(self) -> bool {
        matches!(self, MapTile::SmallPickup | MapTile::BigPickup)
    }
}

/// The raw layout of the game board, as a 2D array of characters.
///
/// `X` marks the cell to the left of Pac-Man's spawn point, `T` marks the two ends of the warp tunnel.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "T     .   ########   .     T",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......X .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_board_pixel_size() {
        assert_eq!(BOARD_PIXEL_SIZE.x, 224); // 28 * 8
        assert_eq!(BOARD_PIXEL_SIZE.y, 248); // 31 * 8
    }

    #[test]
    fn test_tolerance_is_below_half_cell() {
        assert!(CENTER_TOLERANCE < CELL_SIZE as f32 / 2.0);
    }

    #[test]
    fn test_map_tile_walkability() {
        assert!(!MapTile::Wall.is_walkable());
        assert!(MapTile::Empty.is_walkable());
        assert!(MapTile::SmallPickup.is_walkable());
        assert!(MapTile::BigPickup.is_walkable());

        assert!(MapTile::SmallPickup.is_pickup());
        assert!(MapTile::BigPickup.is_pickup());
        assert!(!MapTile::Empty.is_pickup());
    }

    #[test]
    fn test_raw_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
        for row in RAW_BOARD.iter() {
            assert_eq!(row.chars().count(), BOARD_CELL_SIZE.x as usize, "row {row:?}");
        }
    }
}

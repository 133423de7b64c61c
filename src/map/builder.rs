//! Map construction and grid queries.

use crate::constants::{MapTile, CELL_SIZE};
use crate::error::{GameResult, MapError};
use crate::map::direction::Direction;
use crate::map::parser::MapTileParser;
use bevy_ecs::resource::Resource;
use glam::{IVec2, Vec2};
use tracing::debug;

/// The maze: an immutable wall layout, the pickups still lying on it, and a precomputed
/// intersection table.
///
/// Cells are addressed as `(column, row)` with `y` growing downwards. Asking about a
/// cell outside the grid is a bug and panics; movement never produces such a cell
/// because the border is solid apart from tunnel ends, which wrap.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    width: i32,
    height: i32,
    /// The tile data for the map, row-major.
    tiles: Vec<MapTile>,
    /// Cells with three or more open neighbours, row-major.
    intersections: Vec<bool>,
    /// Rows whose horizontal edges wrap around.
    tunnel_rows: Vec<i32>,
    /// The cell marked as Pac-Man's starting position.
    pub player_start: IVec2,
}

impl Map {
    /// Creates a new `Map` instance from a raw board layout.
    ///
    /// # Errors
    ///
    /// Fails if the board cannot be parsed, if any border cell other than a tunnel end
    /// is open, or if tunnel ends are not paired across the same row.
    pub fn new(raw_board: &[&str]) -> GameResult<Map> {
        let parsed = MapTileParser::parse_board(raw_board)?;
        let (width, height) = (parsed.width, parsed.height);

        let mut tunnel_rows = Vec::new();
        for &end in &parsed.tunnel_ends {
            let on_side = end.x == 0 || end.x == width - 1;
            let partner = IVec2::new(width - 1 - end.x, end.y);
            let interior_row = end.y > 0 && end.y < height - 1;
            if !on_side || !interior_row || !parsed.tunnel_ends.contains(&partner) {
                return Err(MapError::InvalidTunnel(end).into());
            }
            if !tunnel_rows.contains(&end.y) {
                tunnel_rows.push(end.y);
            }
        }

        let mut map = Map {
            width,
            height,
            tiles: parsed.tiles,
            intersections: vec![false; (width * height) as usize],
            tunnel_rows,
            player_start: parsed.player_start,
        };

        for y in 0..height {
            for x in 0..width {
                let cell = IVec2::new(x, y);
                let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if on_border && !map.is_wall(cell) && !parsed.tunnel_ends.contains(&cell) {
                    return Err(MapError::OpenBorder(cell).into());
                }
            }
        }

        for y in 0..height {
            for x in 0..width {
                let cell = IVec2::new(x, y);
                if map.is_wall(cell) {
                    continue;
                }
                let open = map.open_directions(cell).count();
                let index = map.index(cell);
                map.intersections[index] = open >= 3;
            }
        }

        debug!(
            width,
            height,
            pickups = map.pickup_count(),
            intersections = map.intersections.iter().filter(|&&i| i).count(),
            tunnel_rows = ?map.tunnel_rows,
            "Map constructed"
        );

        Ok(map)
    }

    /// Width of the grid, in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid, in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Width of the grid, in pixels.
    pub fn pixel_width(&self) -> f32 {
        (self.width as u32 * CELL_SIZE) as f32
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: IVec2) -> usize {
        assert!(
            self.in_bounds(cell),
            "cell {cell} is outside the {}x{} grid",
            self.width,
            self.height
        );
        (cell.y * self.width + cell.x) as usize
    }

    /// Classifies a cell.
    pub fn tile(&self, cell: IVec2) -> MapTile {
        self.tiles[self.index(cell)]
    }

    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.tile(cell) == MapTile::Wall
    }

    /// Whether a pursuer must actively choose a direction at this cell.
    pub fn is_intersection(&self, cell: IVec2) -> bool {
        self.intersections[self.index(cell)]
    }

    /// Whether the row wraps horizontally through a tunnel.
    pub fn is_tunnel_row(&self, row: i32) -> bool {
        self.tunnel_rows.contains(&row)
    }

    /// Removes the pickup lying on `cell`, returning what was there.
    ///
    /// Returns `None` (and leaves the cell untouched) if the cell holds no pickup.
    pub fn clear_pickup(&mut self, cell: IVec2) -> Option<MapTile> {
        let index = self.index(cell);
        let tile = self.tiles[index];
        if !tile.is_pickup() {
            return None;
        }
        self.tiles[index] = MapTile::Empty;
        Some(tile)
    }

    /// Number of pickups still on the board.
    pub fn pickup_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_pickup()).count()
    }

    /// Iterates over every cell and its tile, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| (IVec2::new(i as i32 % self.width, i as i32 / self.width), tile))
    }

    /// The cell one step from `cell` in `direction`, wrapping horizontally on tunnel rows.
    pub fn neighbor(&self, cell: IVec2, direction: Direction) -> IVec2 {
        let mut next = cell + direction.as_ivec2();
        if self.is_tunnel_row(next.y) {
            next.x = next.x.rem_euclid(self.width);
        }
        next
    }

    /// Whether the step from `cell` in `direction` runs into a wall.
    pub fn is_blocked(&self, cell: IVec2, direction: Direction) -> bool {
        self.is_wall(self.neighbor(cell, direction))
    }

    /// The directions leading out of `cell` into walkable cells, in priority order.
    pub fn open_directions(&self, cell: IVec2) -> impl Iterator<Item = Direction> + '_ {
        Direction::DIRECTIONS
            .into_iter()
            .filter(move |&direction| !self.is_blocked(cell, direction))
    }

    /// Converts a pixel position into the cell containing it.
    pub fn cell_of(position: Vec2) -> IVec2 {
        (position / CELL_SIZE as f32).floor().as_ivec2()
    }

    /// The geometric center of a cell, in pixels.
    pub fn cell_center(cell: IVec2) -> Vec2 {
        cell.as_vec2() * CELL_SIZE as f32 + Vec2::splat(CELL_SIZE as f32 / 2.0)
    }
}

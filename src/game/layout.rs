//! Initial placement of the player and the ghosts.

use glam::{IVec2, Vec2};

use crate::constants::{CELL_SIZE, MAX_ENTITIES};
use crate::error::LayoutError;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::ghost::{GhostType, ModeDurations};

/// Where a ghost starts and how it behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostSpawn {
    pub kind: GhostType,
    /// Starting position in pixels. The containing cell is the ghost's home.
    pub position: Vec2,
    pub direction: Direction,
    /// Fixed corner the ghost heads for while scattering. May lie outside the maze.
    pub scatter_target: IVec2,
    pub durations: ModeDurations,
}

impl GhostSpawn {
    pub fn home_cell(&self) -> IVec2 {
        Map::cell_of(self.position)
    }
}

/// The entities a level starts with, besides the pickups read from the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub player_position: Vec2,
    pub player_direction: Option<Direction>,
    pub ghosts: Vec<GhostSpawn>,
}

impl Layout {
    /// The arcade arrangement: the player on the right edge of its marker cell, at rest,
    /// and the four ghosts spread along the corridor above the tunnel.
    pub fn classic(map: &Map) -> Layout {
        let cell = CELL_SIZE as f32;
        let start = map.player_start;
        let player_position = Vec2::new((start.x + 1) as f32 * cell, start.y as f32 * cell + cell / 2.0);

        let spawn = |kind, cell: IVec2, direction, scatter_target| GhostSpawn {
            kind,
            position: Map::cell_center(cell),
            direction,
            scatter_target,
            durations: ModeDurations::default(),
        };

        Layout {
            player_position,
            player_direction: None,
            ghosts: vec![
                spawn(GhostType::Blinky, IVec2::new(13, 11), Direction::Left, IVec2::new(25, 0)),
                spawn(GhostType::Pinky, IVec2::new(14, 11), Direction::Right, IVec2::new(2, 0)),
                spawn(GhostType::Inky, IVec2::new(11, 11), Direction::Left, IVec2::new(27, 30)),
                spawn(GhostType::Clyde, IVec2::new(16, 11), Direction::Right, IVec2::new(0, 30)),
            ],
        }
    }

    /// Number of store slots the level needs, pickups included.
    pub fn entity_count(&self, map: &Map) -> usize {
        1 + self.ghosts.len() + map.pickup_count()
    }

    /// Checks every spawn lies on an open cell, every ghost can move, and the level fits in
    /// the entity store.
    pub fn validate(&self, map: &Map) -> Result<(), LayoutError> {
        let cells = std::iter::once(Map::cell_of(self.player_position)).chain(self.ghosts.iter().map(GhostSpawn::home_cell));
        for cell in cells {
            if !map.in_bounds(cell) {
                return Err(LayoutError::OutOfBounds(cell));
            }
            if map.is_wall(cell) {
                return Err(LayoutError::SpawnInWall(cell));
            }
        }

        // Ghosts never stop, so each needs somewhere to go
        if let Some(cell) = self
            .ghosts
            .iter()
            .map(GhostSpawn::home_cell)
            .find(|&cell| map.open_directions(cell).next().is_none())
        {
            return Err(LayoutError::BoxedIn(cell));
        }

        let needed = self.entity_count(map);
        if needed > MAX_ENTITIES {
            return Err(LayoutError::TooManyEntities {
                needed,
                capacity: MAX_ENTITIES,
            });
        }

        Ok(())
    }
}

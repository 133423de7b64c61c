//! A structured representation of every sprite the simulation can display.
//!
//! The render collaborator owns the actual textures; the core only hands out opaque
//! [`SpriteId`]s. Frames of one animation strip are laid out contiguously so an
//! animation can address them as `base + offset`. [`GameSprite`] is the type-safe way to
//! name a sprite, and its [`id`](GameSprite::id) method resolves it to that layout.

use crate::map::direction::Direction;
use crate::systems::ghost::GhostType;

/// Opaque reference to a renderable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SpriteId(pub u16);

impl SpriteId {
    /// Total number of sprite ids handed out.
    pub const COUNT: u16 = GHOST_EYES_BASE + 4;

    /// The sprite `frame` steps after this one in its strip.
    pub const fn offset(self, frame: u8) -> SpriteId {
        SpriteId(self.0 + frame as u16)
    }
}

/// Frames per direction in Pac-Man's moving strip. The last frame is the closed mouth.
pub const PACMAN_MOVING_FRAMES: u8 = 3;
/// Frames per direction for a ghost in its normal appearance.
pub const GHOST_FRAMES: u8 = 2;
/// Frames in the frightened strip.
pub const FRIGHTENED_FRAMES: u8 = 2;
/// Frames in the big pickup's blink strip.
pub const BIG_PICKUP_FRAMES: u8 = 2;

const SMALL_PICKUP: u16 = 0;
const BIG_PICKUP_BASE: u16 = SMALL_PICKUP + 1;
const PACMAN_MOVING_BASE: u16 = BIG_PICKUP_BASE + BIG_PICKUP_FRAMES as u16;
const PACMAN_DYING_BASE: u16 = PACMAN_MOVING_BASE + 4 * PACMAN_MOVING_FRAMES as u16;
const GHOST_NORMAL_BASE: u16 = PACMAN_DYING_BASE + crate::constants::animation::DEATH_FRAMES as u16;
const GHOST_FRIGHTENED_BASE: u16 = GHOST_NORMAL_BASE + 4 * 4 * GHOST_FRAMES as u16;
const GHOST_EYES_BASE: u16 = GHOST_FRIGHTENED_BASE + FRIGHTENED_FRAMES as u16;

/// Represents the different sprites for Pac-Man.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacmanSprite {
    /// A moving Pac-Man sprite for a given direction and animation frame.
    Moving(Direction, u8),
    /// A frame of the death animation.
    Dying(u8),
}

/// Represents the different sprites for ghosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostSprite {
    /// The normal appearance of a ghost for a given type, direction, and animation frame.
    Normal(GhostType, Direction, u8),
    /// The frightened appearance of a ghost.
    Frightened(u8),
    /// The "eyes only" appearance of a ghost after being eaten.
    Eyes(Direction),
}

/// Represents the sprites for collectibles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupSprite {
    Small,
    /// A frame of the big pickup's blink.
    Big(u8),
}

/// A top-level enum that encompasses all game sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSprite {
    Pacman(PacmanSprite),
    Ghost(GhostSprite),
    Pickup(PickupSprite),
}

impl GameSprite {
    /// Resolves the sprite to its id.
    ///
    /// # Panics
    ///
    /// Panics if an animation frame lies outside its strip.
    pub fn id(self) -> SpriteId {
        let id = match self {
            GameSprite::Pickup(PickupSprite::Small) => SMALL_PICKUP,
            GameSprite::Pickup(PickupSprite::Big(frame)) => {
                assert!(frame < BIG_PICKUP_FRAMES, "Invalid animation frame");
                BIG_PICKUP_BASE + frame as u16
            }
            GameSprite::Pacman(PacmanSprite::Moving(direction, frame)) => {
                assert!(frame < PACMAN_MOVING_FRAMES, "Invalid animation frame");
                PACMAN_MOVING_BASE + (direction.as_usize() as u16) * PACMAN_MOVING_FRAMES as u16 + frame as u16
            }
            GameSprite::Pacman(PacmanSprite::Dying(frame)) => {
                assert!(frame < crate::constants::animation::DEATH_FRAMES, "Invalid animation frame");
                PACMAN_DYING_BASE + frame as u16
            }
            GameSprite::Ghost(GhostSprite::Normal(ghost, direction, frame)) => {
                assert!(frame < GHOST_FRAMES, "Invalid animation frame");
                GHOST_NORMAL_BASE
                    + (ghost.as_usize() as u16 * 4 + direction.as_usize() as u16) * GHOST_FRAMES as u16
                    + frame as u16
            }
            GameSprite::Ghost(GhostSprite::Frightened(frame)) => {
                assert!(frame < FRIGHTENED_FRAMES, "Invalid animation frame");
                GHOST_FRIGHTENED_BASE + frame as u16
            }
            GameSprite::Ghost(GhostSprite::Eyes(direction)) => GHOST_EYES_BASE + direction.as_usize() as u16,
        };
        SpriteId(id)
    }
}

/// Base sprite of each direction's strip, indexed by [`Direction::as_usize`].
pub type DirectionalSprites = [SpriteId; 4];

/// Base sprites of Pac-Man's moving strips.
pub fn pacman_directional() -> DirectionalSprites {
    Direction::DIRECTIONS.map(|direction| GameSprite::Pacman(PacmanSprite::Moving(direction, 0)).id())
}

/// Base sprites of a ghost's normal strips.
pub fn ghost_directional(ghost: GhostType) -> DirectionalSprites {
    Direction::DIRECTIONS.map(|direction| GameSprite::Ghost(GhostSprite::Normal(ghost, direction, 0)).id())
}

/// Eye sprites of an eaten ghost.
pub fn eyes_directional() -> DirectionalSprites {
    Direction::DIRECTIONS.map(|direction| GameSprite::Ghost(GhostSprite::Eyes(direction)).id())
}

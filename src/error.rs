//! Centralized error types for the Pac-Man simulation core.
//!
//! Only construction can fail recoverably (board parsing, map and layout validation).
//! Once a [`Game`](crate::game::Game) exists, invariant violations inside the tick
//! pipeline are bugs and panic instead of surfacing here.

use glam::IVec2;

/// Main error type for the simulation core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board has no rows")]
    EmptyBoard,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
    #[error("Player start position ('X') must appear exactly once, found {0}")]
    InvalidPlayerStartCount(usize),
}

/// Errors related to map validation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Border cell {0} is open; the border must be walls or tunnel ends")]
    OpenBorder(IVec2),

    #[error("Tunnel end {0} must sit on the left or right border with a partner on the opposite side of the same row")]
    InvalidTunnel(IVec2),
}

/// Errors related to the initial entity layout.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Spawn cell {0} lies outside the grid")]
    OutOfBounds(IVec2),

    #[error("Spawn cell {0} is a wall")]
    SpawnInWall(IVec2),

    #[error("Ghost spawn cell {0} has no open neighbor")]
    BoxedIn(IVec2),

    #[error("Layout does not fit in the entity store ({needed} entities, capacity {capacity})")]
    TooManyEntities { needed: usize, capacity: usize },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

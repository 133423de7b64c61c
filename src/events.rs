use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::constants::MapTile;
use crate::systems::ghost::{GhostMode, GhostType};

/// Notable things that happened during a tick, drained by [`Game::tick`](crate::game::Game::tick).
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// The player consumed the pickup lying on `cell`.
    PickupConsumed { cell: IVec2, tile: MapTile },
    /// A ghost switched modes.
    GhostModeChanged { ghost: GhostType, from: GhostMode, to: GhostMode },
    /// The player caught a frightened ghost.
    GhostEaten(GhostType),
    /// A ghost caught the player; the death sequence has started.
    PlayerDied { by: GhostType },
    /// The death animation finished playing.
    DeathAnimationFinished,
    /// The last pickup was consumed.
    RoundCleared,
}

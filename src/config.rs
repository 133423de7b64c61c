use bevy_ecs::resource::Resource;

use crate::constants::{speed, CENTER_TOLERANCE};
use crate::systems::ghost::GhostMode;

/// Movement speeds of a ghost per mode, in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSpeeds {
    pub normal: f32,
    pub frightened: f32,
    pub eaten: f32,
}

impl Default for GhostSpeeds {
    fn default() -> Self {
        Self {
            normal: speed::GHOST,
            frightened: speed::GHOST_FRIGHTENED,
            eaten: speed::GHOST_EATEN,
        }
    }
}

/// Runtime tuning shared by every system.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub player_speed: f32,
    pub ghost_speeds: GhostSpeeds,
    /// Per-axis distance from a cell center that still counts as centered.
    pub center_tolerance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: speed::PLAYER,
            ghost_speeds: GhostSpeeds::default(),
            center_tolerance: CENTER_TOLERANCE,
        }
    }
}

impl GameConfig {
    pub fn ghost_speed(&self, mode: GhostMode) -> f32 {
        match mode {
            GhostMode::Chase | GhostMode::Scatter => self.ghost_speeds.normal,
            GhostMode::Frightened => self.ghost_speeds.frightened,
            GhostMode::Eaten => self.ghost_speeds.eaten,
        }
    }
}

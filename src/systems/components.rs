use bevy_ecs::resource::Resource;
use bitflags::bitflags;

use crate::map::direction::Direction;
use crate::sprites::SpriteId;

bitflags! {
    /// Which components an entity currently carries.
    ///
    /// An entity with a bit set has meaningful data in the matching component array.
    /// An empty mask marks a free slot.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ComponentMask: u8 {
        const POSITION = 1 << 0;
        const VISUAL = 1 << 1;
        const ANIMATION = 1 << 2;
        const MOTION = 1 << 3;
    }
}

/// Handle into the entity store's component arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u16);

impl EntityId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reference to the region a renderer should draw for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visual {
    pub sprite: SpriteId,
}

/// Seconds elapsed since the previous tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub f32);

/// The movement key most recently pressed, as reported by the platform layer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub last_pressed: Option<Direction>,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScoreResource(pub u32);

/// Where the current round stands.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundState {
    #[default]
    Playing,
    /// The player was caught; motion is frozen while the death animation plays.
    Dying,
    /// The death animation has finished.
    Over,
    /// Every pickup has been consumed.
    Cleared,
}

impl RoundState {
    /// Whether the simulation still advances gameplay.
    pub fn is_playing(self) -> bool {
        matches!(self, RoundState::Playing)
    }

    /// Whether the player lost the round.
    pub fn is_game_over(self) -> bool {
        matches!(self, RoundState::Dying | RoundState::Over)
    }
}

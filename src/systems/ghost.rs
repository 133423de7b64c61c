//! Ghost behavior: a timed mode state machine plus greedy, intersection-driven steering.

use bevy_ecs::event::EventWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use glam::IVec2;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::constants::{animation, mode};
use crate::events::GameEvent;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::sprites::{self, DirectionalSprites, GameSprite, GhostSprite, SpriteId, FRIGHTENED_FRAMES, GHOST_FRAMES};
use crate::systems::components::{DeltaTime, EntityId, RoundState};
use crate::systems::movement::{apply_direction, is_centered};
use crate::systems::player::PlayerControl;
use crate::systems::store::EntityStore;

/// The four ghosts. Each has its own sprites and scatter corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum GhostType {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostType {
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostMode {
    /// Hunting the player's current cell.
    Chase,
    /// Heading for the ghost's fixed corner.
    Scatter,
    /// Reversed and wandering; the player can eat the ghost.
    Frightened,
    /// Only the eyes remain, returning to the home cell.
    Eaten,
}

/// How long a ghost stays in each timed mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeDurations {
    pub chase: f32,
    pub scatter: f32,
    pub frightened: f32,
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            chase: mode::CHASE_SECONDS,
            scatter: mode::SCATTER_SECONDS,
            frightened: mode::FRIGHTENED_SECONDS,
        }
    }
}

/// Per-ghost AI state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub kind: GhostType,
    pub entity: EntityId,
    pub mode: GhostMode,
    pub time_in_mode: f32,
    pub durations: ModeDurations,
    pub target_cell: IVec2,
    /// The intersection where the last greedy choice was made, while the ghost is still in it.
    pub last_intersection_cell: Option<IVec2>,
    pub scatter_target: IVec2,
    pub home_cell: IVec2,
    pub sprites: DirectionalSprites,
}

impl Ghost {
    pub fn new(kind: GhostType, entity: EntityId, home_cell: IVec2, scatter_target: IVec2, durations: ModeDurations) -> Self {
        Self {
            kind,
            entity,
            mode: GhostMode::Chase,
            time_in_mode: 0.0,
            durations,
            target_cell: scatter_target,
            last_intersection_cell: None,
            scatter_target,
            home_cell,
            sprites: sprites::ghost_directional(kind),
        }
    }

    /// Whether touching this ghost kills the player.
    pub fn is_dangerous(&self) -> bool {
        matches!(self.mode, GhostMode::Chase | GhostMode::Scatter)
    }

    /// The mode the timer says the ghost should leave for, if its time is up.
    fn expired_mode(&self) -> Option<GhostMode> {
        match self.mode {
            GhostMode::Chase if self.time_in_mode >= self.durations.chase => Some(GhostMode::Scatter),
            GhostMode::Scatter if self.time_in_mode >= self.durations.scatter => Some(GhostMode::Chase),
            GhostMode::Frightened if self.time_in_mode >= self.durations.frightened => Some(GhostMode::Chase),
            _ => None,
        }
    }

    /// Switches modes, resetting the mode timer and updating speed and appearance.
    ///
    /// Newly entering [`GhostMode::Frightened`] reverses the ghost. Re-entering it only
    /// restarts the timer. Returns the event to publish if the mode actually changed.
    pub fn enter_mode(&mut self, mode: GhostMode, store: &mut EntityStore, config: &GameConfig) -> Option<GameEvent> {
        let previous = self.mode;
        self.mode = mode;
        self.time_in_mode = 0.0;

        if previous == mode {
            trace!(ghost = self.kind.as_ref(), mode = mode.as_ref(), "Ghost mode timer restarted");
            return None;
        }

        let motion = store.motion_mut(self.entity);
        motion.speed = config.ghost_speed(mode);
        if mode == GhostMode::Frightened {
            motion.direction = motion.direction.map(Direction::opposite);
        }
        self.apply_appearance(store);

        debug!(ghost = self.kind.as_ref(), from = previous.as_ref(), to = mode.as_ref(), "Ghost mode changed");
        Some(GameEvent::GhostModeChanged {
            ghost: self.kind,
            from: previous,
            to: mode,
        })
    }

    /// Points the ghost's animation at the strip for its mode and heading.
    fn apply_appearance(&self, store: &mut EntityStore) {
        let direction = store.motion(self.entity).direction.unwrap_or(Direction::Left);
        let (base, frames, seconds): (SpriteId, u8, f32) = match self.mode {
            GhostMode::Chase | GhostMode::Scatter => {
                (self.sprites[direction.as_usize()], GHOST_FRAMES, animation::GHOST_FRAME_SECONDS)
            }
            GhostMode::Frightened => (
                GameSprite::Ghost(GhostSprite::Frightened(0)).id(),
                FRIGHTENED_FRAMES,
                animation::FRIGHTENED_FRAME_SECONDS,
            ),
            GhostMode::Eaten => (sprites::eyes_directional()[direction.as_usize()], 1, animation::GHOST_FRAME_SECONDS),
        };

        let (visual, animation) = store.visual_and_animation_mut(self.entity);
        animation.retarget(base, frames);
        animation.seconds_between_frames = seconds;
        visual.sprite = animation.current_sprite();
    }

    /// Picks a new heading if the ghost is centered and must decide, and applies it.
    fn steer(&mut self, map: &Map, store: &mut EntityStore, tolerance: f32) {
        let (transform, motion) = store.transform_and_motion_mut(self.entity);
        let cell = transform.cell();
        // The memo only covers the stay in that cell; coming back means deciding again
        if self.last_intersection_cell.is_some_and(|last| last != cell) {
            self.last_intersection_cell = None;
        }
        if !is_centered(transform.translate, tolerance) {
            return;
        }

        let current = motion.direction;
        let next = if map.is_intersection(cell) && self.last_intersection_cell != Some(cell) {
            self.last_intersection_cell = Some(cell);
            choose_at_intersection(map, cell, current, self.target_cell)
        } else if current.is_none_or(|direction| map.is_blocked(cell, direction)) {
            choose_at_wall(map, cell, current)
        } else {
            return;
        };

        let Some(next) = next else {
            debug_assert!(false, "{} is boxed in at {cell}", self.kind.as_ref());
            return;
        };

        if Some(next) != current {
            apply_direction(transform, motion, Some(next));
            trace!(ghost = self.kind.as_ref(), %cell, direction = next.as_ref(), "Ghost turned");
            self.apply_appearance(store);
        }
    }
}

/// Greedy choice at an intersection: the open, non-reversing direction whose neighbor is
/// closest (squared distance) to `target`. Ties go to the earliest direction in
/// [`Direction::DIRECTIONS`]. Falls back to reversing when nothing else is open.
pub fn choose_at_intersection(map: &Map, cell: IVec2, current: Option<Direction>, target: IVec2) -> Option<Direction> {
    let reverse = current.map(Direction::opposite);
    Direction::DIRECTIONS
        .into_iter()
        .filter(|&direction| Some(direction) != reverse)
        .filter(|&direction| !map.is_blocked(cell, direction))
        .min_by_key(|&direction| (map.neighbor(cell, direction) - target).length_squared())
        .or_else(|| reverse.filter(|&direction| !map.is_blocked(cell, direction)))
}

/// Choice when the way ahead is a wall: an open perpendicular direction, or back the way
/// the ghost came in a dead end.
pub fn choose_at_wall(map: &Map, cell: IVec2, current: Option<Direction>) -> Option<Direction> {
    let Some(current) = current else {
        return map.open_directions(cell).next();
    };
    current
        .perpendicular()
        .into_iter()
        .chain([current.opposite()])
        .find(|&direction| !map.is_blocked(cell, direction))
}

/// All ghost AI state, in spawn order.
#[derive(Resource, Debug, Clone, Default)]
pub struct GhostAi {
    pub ghosts: SmallVec<[Ghost; 4]>,
}

impl GhostAi {
    pub fn get(&self, kind: GhostType) -> Option<&Ghost> {
        self.ghosts.iter().find(|ghost| ghost.kind == kind)
    }

    pub fn is_ghost(&self, entity: EntityId) -> bool {
        self.ghosts.iter().any(|ghost| ghost.entity == entity)
    }

    /// Frightens every ghost that still has a body.
    pub fn frighten_all(&mut self, store: &mut EntityStore, config: &GameConfig) -> SmallVec<[GameEvent; 4]> {
        self.ghosts
            .iter_mut()
            .filter(|ghost| ghost.mode != GhostMode::Eaten)
            .filter_map(|ghost| ghost.enter_mode(GhostMode::Frightened, store, config))
            .collect()
    }
}

/// Advances mode timers, picks each ghost's target and steers it.
#[allow(clippy::too_many_arguments)]
pub fn ghost_ai_system(
    map: Res<Map>,
    config: Res<GameConfig>,
    delta_time: Res<DeltaTime>,
    round: Res<RoundState>,
    player: Res<PlayerControl>,
    mut ai: ResMut<GhostAi>,
    mut store: ResMut<EntityStore>,
    mut events: EventWriter<GameEvent>,
) {
    if !round.is_playing() {
        return;
    }

    let player_cell = store.cell(player.entity);
    for ghost in ai.ghosts.iter_mut() {
        ghost.time_in_mode += delta_time.0;

        if let Some(next) = ghost.expired_mode() {
            events.write_batch(ghost.enter_mode(next, &mut store, &config));
        }
        if ghost.mode == GhostMode::Eaten && store.cell(ghost.entity) == ghost.home_cell {
            events.write_batch(ghost.enter_mode(GhostMode::Scatter, &mut store, &config));
        }

        match ghost.mode {
            GhostMode::Chase => ghost.target_cell = player_cell,
            GhostMode::Scatter => ghost.target_cell = ghost.scatter_target,
            GhostMode::Eaten => ghost.target_cell = ghost.home_cell,
            // Frightened ghosts keep whatever target they had
            GhostMode::Frightened => {}
        }

        ghost.steer(&map, &mut store, config.center_tolerance);
    }
}

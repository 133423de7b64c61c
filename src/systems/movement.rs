use crate::constants::CELL_SIZE;
use crate::map::builder::Map;
use crate::map::direction::{same_axis, Axis, Direction};
use crate::systems::components::{ComponentMask, DeltaTime, RoundState};
use crate::systems::store::EntityStore;
use bevy_ecs::system::{Res, ResMut};
use glam::{IVec2, Vec2};
use tracing::trace;

/// Distance under which a position counts as sitting exactly on a center line.
const EPSILON: f32 = 1e-3;

/// Pixel-space position of an entity. The translate is the entity's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    pub fn at(translate: Vec2) -> Self {
        Self {
            translate,
            ..Default::default()
        }
    }

    /// The cell containing this position.
    pub fn cell(&self) -> IVec2 {
        Map::cell_of(self.translate)
    }
}

/// What the resolver does with an entity that runs into a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockedPolicy {
    /// Clear the direction and freeze the animation.
    #[default]
    Stop,
    /// Rest at the cell center but keep the direction, leaving the choice to the owner.
    Hold,
}

/// Speed (pixels per second) and heading of a moving entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub speed: f32,
    pub direction: Option<Direction>,
    pub on_blocked: BlockedPolicy,
}

/// Result of advancing one entity for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing to do: no direction or no distance.
    Idle,
    /// The full distance was travelled.
    Moved,
    /// A wall stopped the entity at a cell center.
    Blocked,
}

/// Whether a position lies within `tolerance` pixels of its cell's center on both axes.
pub fn is_centered(position: Vec2, tolerance: f32) -> bool {
    let offset = (position - Map::cell_center(Map::cell_of(position))).abs();
    offset.x <= tolerance && offset.y <= tolerance
}

/// Moves the coordinate perpendicular to `axis` onto the cell's center line.
fn snap_across(position: Vec2, axis: Axis) -> Vec2 {
    let center = Map::cell_center(Map::cell_of(position));
    match axis {
        Axis::Horizontal => Vec2::new(position.x, center.y),
        Axis::Vertical => Vec2::new(center.x, position.y),
    }
}

/// Moves the coordinate along `axis` onto the cell's center.
fn snap_along(position: Vec2, axis: Axis) -> Vec2 {
    snap_across(position, match axis {
        Axis::Horizontal => Axis::Vertical,
        Axis::Vertical => Axis::Horizontal,
    })
}

/// Wraps a horizontal position into `[0, width)`.
fn wrap_x(x: f32, width: f32) -> f32 {
    let wrapped = x.rem_euclid(width);
    // rem_euclid rounds tiny negatives up to `width` itself
    if wrapped >= width {
        wrapped - width
    } else {
        wrapped
    }
}

/// Changes an entity's heading.
///
/// Switching axis snaps the entity onto the new axis' center line, so a turn taken
/// slightly off-center never drifts into a wall.
pub fn apply_direction(transform: &mut Transform, motion: &mut Motion, direction: Option<Direction>) {
    if let Some(new) = direction {
        if !same_axis(motion.direction, direction) {
            transform.translate = snap_across(transform.translate, new.axis());
        }
    }
    motion.direction = direction;
}

/// Advances a position `distance` pixels in `direction`, one cell center at a time.
///
/// Before leaving a cell center the resolver checks the next cell; if it is a wall the
/// entity rests on the center and [`MoveOutcome::Blocked`] is returned. A step leaving
/// the grid horizontally re-enters on the opposite edge.
pub fn advance(map: &Map, transform: &mut Transform, direction: Direction, distance: f32) -> MoveOutcome {
    if distance <= 0.0 {
        return MoveOutcome::Idle;
    }

    let step_vector = direction.as_vec2();
    let axis = direction.axis();
    let mut remaining = distance;

    while remaining > 0.0 {
        let cell = transform.cell();
        let center = Map::cell_center(cell);
        let ahead = (center - transform.translate).dot(step_vector);

        // Still approaching this cell's center
        if ahead > EPSILON {
            let step = remaining.min(ahead);
            transform.translate += step_vector * step;
            remaining -= step;
            continue;
        }

        let behind = if ahead.abs() <= EPSILON {
            transform.translate = snap_along(transform.translate, axis);
            0.0
        } else {
            -ahead
        };

        if map.is_blocked(cell, direction) {
            transform.translate = snap_along(transform.translate, axis);
            return MoveOutcome::Blocked;
        }

        let step = remaining.min(CELL_SIZE as f32 - behind);
        transform.translate += step_vector * step;
        remaining -= step;

        let width = map.pixel_width();
        if transform.translate.x < 0.0 || transform.translate.x >= width {
            transform.translate.x = wrap_x(transform.translate.x, width);
            trace!(x = transform.translate.x, "Wrapped through tunnel");
        }
    }

    MoveOutcome::Moved
}

/// Moves every entity with a position and motion by `speed * dt` along its heading.
///
/// Nothing moves once the round has ended.
pub fn movement_system(map: Res<Map>, delta_time: Res<DeltaTime>, round: Res<RoundState>, mut store: ResMut<EntityStore>) {
    if !round.is_playing() {
        return;
    }

    for entity in EntityStore::ids() {
        if !store.has(entity, ComponentMask::POSITION | ComponentMask::MOTION) {
            continue;
        }

        let (transform, motion) = store.transform_and_motion_mut(entity);
        let Some(direction) = motion.direction else {
            continue;
        };

        let distance = motion.speed * delta_time.0;
        if advance(&map, transform, direction, distance) == MoveOutcome::Blocked && motion.on_blocked == BlockedPolicy::Stop {
            motion.direction = None;
            store.remove(entity, ComponentMask::ANIMATION);
            trace!(entity = entity.0, direction = direction.as_ref(), "Stopped at wall");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Map {
        Map::new(&["#######", "#  X  #", "## ####", "#######"]).unwrap()
    }

    #[test]
    fn test_is_centered_uses_inclusive_tolerance() {
        let center = Map::cell_center(IVec2::new(3, 1));
        assert!(is_centered(center, 2.0));
        assert!(is_centered(center + Vec2::new(2.0, -2.0), 2.0));
        assert!(!is_centered(center + Vec2::new(2.5, 0.0), 2.0));
    }

    #[test]
    fn test_advance_stops_at_wall_center() {
        let map = corridor();
        let mut transform = Transform::at(Map::cell_center(IVec2::new(3, 1)));

        let outcome = advance(&map, &mut transform, Direction::Right, 40.0);

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(transform.translate, Map::cell_center(IVec2::new(5, 1)));
    }

    #[test]
    fn test_advance_partial_step() {
        let map = corridor();
        let start = Map::cell_center(IVec2::new(3, 1));
        let mut transform = Transform::at(start);

        assert_eq!(advance(&map, &mut transform, Direction::Left, 3.0), MoveOutcome::Moved);
        assert_eq!(transform.translate, start - Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_wrap_x_stays_below_width() {
        assert_eq!(wrap_x(-8.0, 40.0), 32.0);
        assert_eq!(wrap_x(44.0, 40.0), 4.0);
        assert_eq!(wrap_x(-6e-8, 40.0), 0.0);
        assert!(wrap_x(-1e-3, 40.0) < 40.0);
    }

    #[test]
    fn test_apply_direction_snaps_on_axis_change() {
        let mut transform = Transform::at(Map::cell_center(IVec2::new(2, 1)) + Vec2::new(1.5, 0.0));
        let mut motion = Motion {
            direction: Some(Direction::Right),
            ..Default::default()
        };

        apply_direction(&mut transform, &mut motion, Some(Direction::Down));
        assert_eq!(transform.translate, Map::cell_center(IVec2::new(2, 1)));
        assert_eq!(motion.direction, Some(Direction::Down));

        // Reversing on the same axis leaves the position alone
        transform.translate.y += 1.0;
        let before = transform.translate;
        apply_direction(&mut transform, &mut motion, Some(Direction::Up));
        assert_eq!(transform.translate, before);
    }
}

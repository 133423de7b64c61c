use bevy_ecs::event::EventWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::{animation, score, MapTile};
use crate::events::GameEvent;
use crate::map::builder::Map;
use crate::map::direction::{same_axis, Direction};
use crate::sprites::{DirectionalSprites, GameSprite, PacmanSprite};
use crate::systems::animation::Animation;
use crate::systems::components::{ComponentMask, EntityId, InputState, RoundState, ScoreResource};
use crate::systems::ghost::{GhostAi, GhostMode, GhostType};
use crate::systems::movement::{apply_direction, is_centered};
use crate::systems::store::EntityStore;

/// Player-side controller state.
#[derive(Resource, Debug, Clone)]
pub struct PlayerControl {
    pub entity: EntityId,
    /// The latched input. It stays set until another key replaces it, so a turn pressed
    /// early is taken at the next opening.
    pub requested_direction: Option<Direction>,
    pub sprites: DirectionalSprites,
    pub is_dead: bool,
}

impl PlayerControl {
    pub fn new(entity: EntityId, sprites: DirectionalSprites) -> Self {
        Self {
            entity,
            requested_direction: None,
            sprites,
            is_dead: false,
        }
    }
}

/// Applies the latched direction request and stops the player in front of walls.
///
/// Same-axis requests take effect at once. Turns wait until the player is centered in
/// its cell and the cell in the requested direction is open. A player at rest may start
/// in any open direction, which covers the spawn point lying between two cells.
pub fn steer_player(map: &Map, store: &mut EntityStore, player: &PlayerControl, tolerance: f32) {
    let entity = player.entity;
    let (transform, motion) = store.transform_and_motion_mut(entity);
    let centered = is_centered(transform.translate, tolerance);
    let cell = transform.cell();
    let mut turned = false;

    if let Some(requested) = player.requested_direction.filter(|&d| Some(d) != motion.direction) {
        let allowed = if same_axis(Some(requested), motion.direction) {
            true
        } else {
            (centered || motion.direction.is_none()) && !map.is_blocked(cell, requested)
        };

        if allowed {
            apply_direction(transform, motion, Some(requested));
            turned = true;
            trace!(%cell, direction = requested.as_ref(), "Player turned");
        }
    }

    if centered {
        if let Some(direction) = motion.direction.filter(|&d| map.is_blocked(cell, d)) {
            motion.direction = None;
            store.remove(entity, ComponentMask::ANIMATION);
            trace!(%cell, direction = direction.as_ref(), "Player stopped at wall");
            return;
        }
    }

    if turned {
        if let Some(direction) = store.motion(entity).direction {
            store.animation_mut(entity).base_sprite_id = player.sprites[direction.as_usize()];
            store.enable(entity, ComponentMask::ANIMATION);
        }
    }
}

/// Switches the player to the death strip and freezes everyone.
fn start_death(player: &mut PlayerControl, ai: &GhostAi, store: &mut EntityStore) {
    player.is_dead = true;

    let dying = GameSprite::Pacman(PacmanSprite::Dying(0)).id();
    store.insert_animation(player.entity, Animation::once(dying, animation::DEATH_FRAMES, animation::DEATH_FRAME_SECONDS));
    store.visual_mut(player.entity).sprite = dying;
    store.remove(player.entity, ComponentMask::MOTION);

    for ghost in &ai.ghosts {
        store.remove(ghost.entity, ComponentMask::MOTION | ComponentMask::VISUAL);
    }
}

/// Reads input, steers the player, consumes pickups and resolves contact with ghosts.
#[allow(clippy::too_many_arguments)]
pub fn player_control_system(
    mut map: ResMut<Map>,
    config: Res<GameConfig>,
    input: Res<InputState>,
    mut player: ResMut<PlayerControl>,
    mut ai: ResMut<GhostAi>,
    mut store: ResMut<EntityStore>,
    mut score: ResMut<ScoreResource>,
    mut round: ResMut<RoundState>,
    mut events: EventWriter<GameEvent>,
) {
    match *round {
        RoundState::Playing => {}
        RoundState::Dying => {
            if store.animation(player.entity).is_finished {
                *round = RoundState::Over;
                events.write(GameEvent::DeathAnimationFinished);
                info!(score = score.0, "Game over");
            }
            return;
        }
        RoundState::Over | RoundState::Cleared => return,
    }

    if let Some(direction) = input.last_pressed {
        player.requested_direction = Some(direction);
    }

    steer_player(&map, &mut store, &player, config.center_tolerance);

    // Pickups
    let player_cell = store.cell(player.entity);
    if let Some(tile) = map.clear_pickup(player_cell) {
        let entity = player.entity;
        if let Some(pickup) = store.find_at_cell(player_cell, |other| other != entity && !ai.is_ghost(other)) {
            store.destroy(pickup);
        }

        score.0 += match tile {
            MapTile::BigPickup => score::BIG_PICKUP,
            _ => score::SMALL_PICKUP,
        };
        events.write(GameEvent::PickupConsumed { cell: player_cell, tile });
        debug!(cell = %player_cell, ?tile, score = score.0, "Pickup consumed");

        if tile == MapTile::BigPickup {
            let changed = ai.frighten_all(&mut store, &config);
            events.write_batch(changed);
        }

        if map.pickup_count() == 0 {
            *round = RoundState::Cleared;
            events.write(GameEvent::RoundCleared);
            info!(score = score.0, "Round cleared");
            return;
        }
    }

    // Ghost contact
    let mut caught_by: Option<GhostType> = None;
    for ghost in ai.ghosts.iter_mut() {
        if store.cell(ghost.entity) != player_cell {
            continue;
        }
        match ghost.mode {
            GhostMode::Frightened => {
                events.write_batch(ghost.enter_mode(GhostMode::Eaten, &mut store, &config));
                events.write(GameEvent::GhostEaten(ghost.kind));
                score.0 += score::GHOST;
                info!(ghost = ghost.kind.as_ref(), cell = %player_cell, score = score.0, "Ghost eaten");
            }
            GhostMode::Eaten => {}
            GhostMode::Chase | GhostMode::Scatter => {
                caught_by = Some(ghost.kind);
                break;
            }
        }
    }

    if let Some(ghost) = caught_by {
        start_death(&mut player, &ai, &mut store);
        *round = RoundState::Dying;
        events.write(GameEvent::PlayerDied { by: ghost });
        info!(ghost = ghost.as_ref(), cell = %player_cell, score = score.0, "Player caught");
    }
}

use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pacman_core::config::GameConfig;
use pacman_core::constants::{score, MapTile};
use pacman_core::events::GameEvent;
use pacman_core::game::Game;
use pacman_core::map::direction::Direction;
use pacman_core::sprites::{GameSprite, PacmanSprite};
use pacman_core::systems::{player_control_system, ComponentMask, GhostMode, GhostType, InputState, RoundState};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::*;

/// One pixel per tick at this speed and step.
const SLOW_DT: f32 = 0.25;

fn slow_game(board: &[&str], position: Vec2, direction: Option<Direction>) -> Game {
    let config = GameConfig {
        player_speed: 4.0,
        ..Default::default()
    };
    Game::with_config(board, &layout(position, direction, vec![]), config).expect("test board should be valid")
}

#[test]
fn test_perpendicular_request_waits_until_centered() {
    // Heading left along the bottom row, 3.5px right of the center of (1, 3)
    let mut game = slow_game(&TURN_BOARD, Vec2::new(15.5, 28.0), Some(Direction::Left));

    game.tick(SLOW_DT, Some(Direction::Up));
    assert_eq!(player_direction(&game), Some(Direction::Left));
    assert_eq!(player_position(&game), Vec2::new(14.5, 28.0));

    game.tick(SLOW_DT, None);
    assert_eq!(player_direction(&game), Some(Direction::Left));
    assert_eq!(player_position(&game), Vec2::new(13.5, 28.0));

    // Within tolerance now: the latched request is honored and the player snaps onto the column
    game.tick(SLOW_DT, None);
    assert_eq!(player_direction(&game), Some(Direction::Up));
    assert_eq!(player_position(&game), Vec2::new(12.0, 27.0));
}

#[test]
fn test_same_axis_reversal_is_immediate() {
    let mut game = slow_game(&TURN_BOARD, Vec2::new(15.5, 28.0), Some(Direction::Left));

    game.tick(SLOW_DT, Some(Direction::Right));

    assert_eq!(player_direction(&game), Some(Direction::Right));
    assert_eq!(player_position(&game), Vec2::new(16.5, 28.0));
}

#[test]
fn test_player_stops_in_front_of_wall() {
    let mut game = slow_game(&TURN_BOARD, center(2, 3), Some(Direction::Left));

    run_until(&mut game, SLOW_DT, 40, |game, _| player_direction(game).is_none());

    assert_that(&player_direction(&game)).is_none();
    let x = player_position(&game).x;
    assert_that(&x).is_greater_than_or_equal_to(center(1, 3).x);
    assert_that(&(x - center(1, 3).x)).is_less_than_or_equal_to(2.0);
    assert!(!game.store().has(game.player().entity, ComponentMask::ANIMATION));
}

#[test]
fn test_spawn_between_cells_accepts_first_direction() {
    // The spawn point sits on the edge between (2, 3) and (3, 3)
    let spawn = Vec2::new(24.0, 28.0);

    let mut game = slow_game(&TURN_BOARD, spawn, None);
    game.tick(SLOW_DT, Some(Direction::Left));
    assert_eq!(player_direction(&game), Some(Direction::Left));
    assert_eq!(player_position(&game), Vec2::new(23.0, 28.0));
    assert!(game.store().has(game.player().entity, ComponentMask::ANIMATION));

    let mut game = slow_game(&TURN_BOARD, spawn, None);
    game.tick(SLOW_DT, Some(Direction::Right));
    assert_eq!(player_direction(&game), Some(Direction::Right));
    assert_eq!(player_position(&game), Vec2::new(25.0, 28.0));
}

#[test]
fn test_spawn_request_into_wall_is_ignored() {
    let spawn = Vec2::new(24.0, 28.0);
    let mut game = slow_game(&TURN_BOARD, spawn, None);

    game.tick(SLOW_DT, Some(Direction::Up));

    assert_that(&player_direction(&game)).is_none();
    assert_eq!(player_position(&game), spawn);
}

#[test]
fn test_request_is_latched_by_control_system() {
    let mut game = slow_game(&TURN_BOARD, center(3, 3), None);
    game.world.insert_resource(InputState {
        last_pressed: Some(Direction::Down),
    });

    game.world
        .run_system_once(player_control_system)
        .expect("System should run successfully");

    assert_eq!(game.player().requested_direction, Some(Direction::Down));
    // Down is a wall, so the player stays put
    assert_that(&player_direction(&game)).is_none();
}

#[test]
fn test_pickups_are_consumed_and_scored() {
    let mut game = game(&LOOP_BOARD, layout(center(1, 1), Some(Direction::Right), vec![]));
    assert_eq!(game.store().len(), 3);

    let outcomes = run_until(&mut game, DT, 200, |_, outcome| outcome.round == RoundState::Cleared);
    let events: Vec<GameEvent> = outcomes.into_iter().flat_map(|outcome| outcome.events).collect();

    assert_eq!(
        events,
        vec![
            GameEvent::PickupConsumed {
                cell: glam::IVec2::new(2, 1),
                tile: MapTile::SmallPickup
            },
            GameEvent::PickupConsumed {
                cell: glam::IVec2::new(3, 1),
                tile: MapTile::BigPickup
            },
            GameEvent::RoundCleared,
        ]
    );
    assert_eq!(game.score(), score::SMALL_PICKUP + score::BIG_PICKUP);
    assert_eq!(game.map().pickup_count(), 0);
    assert_eq!(game.store().len(), 1);
    assert_eq!(game.round(), RoundState::Cleared);

    // A cleared round no longer moves anything
    let position = player_position(&game);
    game.tick(DT, Some(Direction::Left));
    assert_eq!(player_position(&game), position);
}

#[test]
fn test_big_pickup_frightens_every_ghost_in_the_same_tick() {
    let ghosts = vec![
        ghost_spawn(GhostType::Blinky, 4, 3, Direction::Left),
        ghost_spawn(GhostType::Pinky, 5, 3, Direction::Right),
        ghost_spawn(GhostType::Inky, 6, 3, Direction::Left),
        ghost_spawn(GhostType::Clyde, 7, 3, Direction::Right),
    ];
    let mut game = game(&LOOP_BOARD, layout(center(1, 1), Some(Direction::Right), ghosts));
    let kinds = [GhostType::Blinky, GhostType::Pinky, GhostType::Inky, GhostType::Clyde];

    let mut frightened_tick = None;
    for _ in 0..120 {
        let before: Vec<_> = kinds.iter().map(|&kind| ghost_direction(&game, kind)).collect();
        let outcome = game.tick(DT, None);
        let ate_big = outcome.events.iter().any(|event| {
            matches!(
                event,
                GameEvent::PickupConsumed {
                    tile: MapTile::BigPickup,
                    ..
                }
            )
        });
        if ate_big {
            frightened_tick = Some((before, outcome));
            break;
        }
    }

    let (before, outcome) = frightened_tick.expect("player should reach the big pickup");
    for kind in kinds {
        assert_eq!(ghost_mode(&game, kind), GhostMode::Frightened, "{kind:?}");
    }

    let mode_changes = outcome
        .events
        .iter()
        .filter(|event| matches!(event, GameEvent::GhostModeChanged { to: GhostMode::Frightened, .. }))
        .count();
    assert_eq!(mode_changes, 4);

    let reversed = kinds
        .iter()
        .zip(before)
        .filter(|&(&kind, previous)| ghost_direction(&game, kind) == previous.map(Direction::opposite))
        .count();
    assert_that(&reversed).is_greater_than_or_equal_to(1);
}

#[test]
fn test_frightened_ghost_is_eaten_on_contact() {
    let ghosts = vec![ghost_spawn(GhostType::Blinky, 6, 3, Direction::Left)];
    let mut game = game(&LOOP_BOARD, layout(center(1, 1), None, ghosts));

    frighten_all(&mut game);
    place_ghost(&mut game, GhostType::Blinky, glam::IVec2::new(1, 1), Direction::Right);

    let outcome = game.tick(DT, None);

    assert_that(&outcome.events).contains(GameEvent::GhostEaten(GhostType::Blinky));
    assert_eq!(ghost_mode(&game, GhostType::Blinky), GhostMode::Eaten);
    assert_eq!(game.score(), score::GHOST);
    assert_eq!(outcome.round, RoundState::Playing);

    // Eyes are harmless
    place_ghost(&mut game, GhostType::Blinky, glam::IVec2::new(1, 1), Direction::Right);
    let outcome = game.tick(DT, None);
    assert_eq!(outcome.round, RoundState::Playing);
}

#[test]
fn test_dangerous_ghost_starts_death_sequence() {
    let ghosts = vec![ghost_spawn(GhostType::Pinky, 6, 3, Direction::Left)];
    let mut game = game(&LOOP_BOARD, layout(center(1, 1), None, ghosts));
    place_ghost(&mut game, GhostType::Pinky, glam::IVec2::new(1, 1), Direction::Right);

    let outcome = game.tick(DT, None);

    assert_that(&outcome.events).contains(GameEvent::PlayerDied { by: GhostType::Pinky });
    assert_eq!(outcome.round, RoundState::Dying);
    assert!(game.player().is_dead);

    let player = game.player().entity;
    let ghost = ghost_entity(&game, GhostType::Pinky);
    assert!(!game.store().has(player, ComponentMask::MOTION));
    assert!(!game.store().has(ghost, ComponentMask::MOTION));
    assert!(!game.store().has(ghost, ComponentMask::VISUAL));
    assert!(game.render_list().iter().all(|item| item.entity != ghost));

    let outcomes = run_until(&mut game, 0.1, 30, |_, outcome| outcome.round == RoundState::Over);
    let last = outcomes.last().expect("at least one tick");
    assert_eq!(last.round, RoundState::Over);
    assert_that(&last.events).contains(GameEvent::DeathAnimationFinished);
    assert_eq!(
        game.store().visual(player).sprite,
        GameSprite::Pacman(PacmanSprite::Dying(10)).id()
    );
}

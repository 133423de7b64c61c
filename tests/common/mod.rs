#![allow(dead_code)]

use glam::{IVec2, Vec2};
use pacman_core::config::GameConfig;
use pacman_core::game::{Game, GhostSpawn, Layout, TickOutcome};
use pacman_core::map::builder::Map;
use pacman_core::map::direction::Direction;
use pacman_core::systems::{EntityStore, GhostAi, GhostMode, GhostType, ModeDurations};

/// One frame at 60 Hz.
pub const DT: f32 = 1.0 / 60.0;

/// A rectangular loop with no intersections and two pickups on the top row.
///
/// ```text
/// ##########
/// #X.o     #
/// # ###### #
/// #        #
/// ##########
/// ```
pub const LOOP_BOARD: [&str; 5] = ["##########", "#X.o     #", "# ###### #", "#        #", "##########"];

/// An open row above a row with a single opening, used for turning tests.
pub const TURN_BOARD: [&str; 5] = ["#######", "#     #", "# ### #", "#  X  #", "#######"];

/// Two corridors joined by a single gap, making intersections at (4, 1) and (4, 3).
pub const FORK_BOARD: [&str; 5] = ["#########", "#       #", "#### ####", "#      X#", "#########"];

/// A corridor bending downwards at its right end.
pub const BEND_BOARD: [&str; 5] = ["#####", "#X  #", "### #", "### #", "#####"];

pub fn center(x: i32, y: i32) -> Vec2 {
    Map::cell_center(IVec2::new(x, y))
}

pub fn ghost_spawn(kind: GhostType, x: i32, y: i32, direction: Direction) -> GhostSpawn {
    GhostSpawn {
        kind,
        position: center(x, y),
        direction,
        scatter_target: IVec2::ZERO,
        durations: ModeDurations::default(),
    }
}

pub fn layout(player_position: Vec2, player_direction: Option<Direction>, ghosts: Vec<GhostSpawn>) -> Layout {
    Layout {
        player_position,
        player_direction,
        ghosts,
    }
}

pub fn game(board: &[&str], layout: Layout) -> Game {
    Game::new(board, &layout).expect("test board and layout should be valid")
}

/// Ticks until `done` holds or `limit` ticks pass, returning every outcome.
pub fn run_until(game: &mut Game, dt: f32, limit: usize, mut done: impl FnMut(&Game, &TickOutcome) -> bool) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..limit {
        let outcome = game.tick(dt, None);
        let finished = done(game, &outcome);
        outcomes.push(outcome);
        if finished {
            break;
        }
    }
    outcomes
}

pub fn player_position(game: &Game) -> Vec2 {
    game.store().transform(game.player().entity).translate
}

pub fn player_direction(game: &Game) -> Option<Direction> {
    game.store().motion(game.player().entity).direction
}

pub fn ghost_entity(game: &Game, kind: GhostType) -> pacman_core::systems::EntityId {
    game.ghost(kind).expect("ghost should be spawned").entity
}

pub fn ghost_direction(game: &Game, kind: GhostType) -> Option<Direction> {
    game.store().motion(ghost_entity(game, kind)).direction
}

pub fn ghost_mode(game: &Game, kind: GhostType) -> GhostMode {
    game.ghost(kind).expect("ghost should be spawned").mode
}

pub fn ghost_cell(game: &Game, kind: GhostType) -> IVec2 {
    game.store().cell(ghost_entity(game, kind))
}

/// Moves a ghost onto a cell center with a fresh decision state.
pub fn place_ghost(game: &mut Game, kind: GhostType, cell: IVec2, direction: Direction) {
    let entity = ghost_entity(game, kind);
    {
        let mut store = game.world.resource_mut::<EntityStore>();
        store.transform_mut(entity).translate = Map::cell_center(cell);
        store.motion_mut(entity).direction = Some(direction);
    }
    let mut ai = game.world.resource_mut::<GhostAi>();
    let ghost = ai.ghosts.iter_mut().find(|ghost| ghost.kind == kind).expect("ghost should be spawned");
    ghost.last_intersection_cell = None;
}

pub fn place_player(game: &mut Game, position: Vec2) {
    let entity = game.player().entity;
    game.world.resource_mut::<EntityStore>().transform_mut(entity).translate = position;
}

/// Frightens every ghost as a big pickup would.
pub fn frighten_all(game: &mut Game) {
    let config = *game.world.resource::<GameConfig>();
    game.world.resource_scope(|world, mut ai: bevy_ecs::world::Mut<GhostAi>| {
        let mut store = world.resource_mut::<EntityStore>();
        ai.frighten_all(&mut store, &config);
    });
}

//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::constants::{animation, MapTile, RAW_BOARD};
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::formatter;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::sprites::{self, GameSprite, PickupSprite, BIG_PICKUP_FRAMES, GHOST_FRAMES, PACMAN_MOVING_FRAMES};
use crate::systems::{
    animation_system, ghost_ai_system, movement_system, player_control_system, render_list, Animation, BlockedPolicy,
    ComponentMask, DeltaTime, EntityStore, Ghost, GhostAi, GhostType, InputState, Motion, PlayerControl, RenderItem,
    RoundState, ScoreResource, Transform, Visual,
};

pub mod layout;

pub use self::layout::{GhostSpawn, Layout};

/// What a tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub round: RoundState,
    pub events: Vec<GameEvent>,
}

/// The `Game` struct is the main entry point for the simulation.
///
/// It owns the world holding every resource and the fixed schedule of systems run by
/// [`tick`](Game::tick).
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Parses the board and seeds the level with default tuning.
    pub fn new(raw_board: &[&str], layout: &Layout) -> GameResult<Game> {
        Self::with_config(raw_board, layout, GameConfig::default())
    }

    pub fn with_config(raw_board: &[&str], layout: &Layout, config: GameConfig) -> GameResult<Game> {
        let map = Map::new(raw_board)?;
        Self::from_map(map, layout, config)
    }

    /// The arcade board with its default layout.
    pub fn classic() -> GameResult<Game> {
        let map = Map::new(&RAW_BOARD)?;
        let layout = Layout::classic(&map);
        Self::from_map(map, &layout, GameConfig::default())
    }

    pub fn from_map(map: Map, layout: &Layout, config: GameConfig) -> GameResult<Game> {
        layout.validate(&map)?;

        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        EventRegistry::register_event::<GameEvent>(&mut world);

        let mut store = EntityStore::default();
        seed_pickups(&map, &mut store);
        let player = seed_player(layout, &config, &mut store);
        let ghosts = seed_ghosts(layout, &config, &mut store);

        info!(entities = store.len(), ghosts = ghosts.ghosts.len(), pickups = map.pickup_count(), "Level seeded");

        world.insert_resource(map);
        world.insert_resource(store);
        world.insert_resource(player);
        world.insert_resource(ghosts);
        world.insert_resource(config);
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(InputState::default());
        world.insert_resource(ScoreResource(0));
        world.insert_resource(RoundState::Playing);

        schedule.add_systems((player_control_system, ghost_ai_system, movement_system, animation_system).chain());

        Ok(Game { world, schedule })
    }

    /// Runs one simulation step.
    ///
    /// `input` is the movement key most recently pressed, if any. Returns the round state
    /// after the step together with everything that happened during it.
    pub fn tick(&mut self, dt: f32, input: Option<Direction>) -> TickOutcome {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid delta time {dt}");

        self.world.insert_resource(DeltaTime(dt));
        self.world.insert_resource(InputState { last_pressed: input });
        self.schedule.run(&mut self.world);
        formatter::increment_tick();

        let events: Vec<GameEvent> = self.world.resource_mut::<Events<GameEvent>>().drain().collect();
        if !events.is_empty() {
            debug!(count = events.len(), "Tick produced events");
        }

        TickOutcome {
            round: self.round(),
            events,
        }
    }

    /// Position, scale and sprite of every visible entity, in draw order.
    pub fn render_list(&self) -> Vec<RenderItem> {
        render_list(self.store())
    }

    pub fn map(&self) -> &Map {
        self.world.resource::<Map>()
    }

    pub fn store(&self) -> &EntityStore {
        self.world.resource::<EntityStore>()
    }

    pub fn player(&self) -> &PlayerControl {
        self.world.resource::<PlayerControl>()
    }

    pub fn ghost(&self, kind: GhostType) -> Option<&Ghost> {
        self.world.resource::<GhostAi>().get(kind)
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.world.resource::<GhostAi>().ghosts
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn round(&self) -> RoundState {
        *self.world.resource::<RoundState>()
    }
}

fn seed_pickups(map: &Map, store: &mut EntityStore) {
    let small = GameSprite::Pickup(PickupSprite::Small).id();
    let big = GameSprite::Pickup(PickupSprite::Big(0)).id();

    for (cell, tile) in map.cells().filter(|(_, tile)| tile.is_pickup()) {
        let entity = store.create();
        store.insert_transform(entity, Transform::at(Map::cell_center(cell)));
        if tile == MapTile::BigPickup {
            store.insert_visual(entity, Visual { sprite: big });
            store.insert_animation(entity, Animation::looping(big, BIG_PICKUP_FRAMES, animation::BIG_PICKUP_FRAME_SECONDS));
        } else {
            store.insert_visual(entity, Visual { sprite: small });
        }
    }
}

fn seed_player(layout: &Layout, config: &GameConfig, store: &mut EntityStore) -> PlayerControl {
    let sprites = sprites::pacman_directional();
    let facing = layout.player_direction.unwrap_or(Direction::Left);
    let base = sprites[facing.as_usize()];

    let entity = store.create();
    store.insert_transform(entity, Transform::at(layout.player_position));
    store.insert_visual(entity, Visual { sprite: base });
    store.insert_animation(entity, Animation::looping(base, PACMAN_MOVING_FRAMES, animation::PLAYER_FRAME_SECONDS));
    store.insert_motion(
        entity,
        Motion {
            speed: config.player_speed,
            direction: layout.player_direction,
            on_blocked: BlockedPolicy::Stop,
        },
    );
    if layout.player_direction.is_none() {
        store.remove(entity, ComponentMask::ANIMATION);
    }

    PlayerControl::new(entity, sprites)
}

fn seed_ghosts(layout: &Layout, config: &GameConfig, store: &mut EntityStore) -> GhostAi {
    let mut ai = GhostAi::default();
    for spawn in &layout.ghosts {
        let sprites = sprites::ghost_directional(spawn.kind);
        let base = sprites[spawn.direction.as_usize()];

        let entity = store.create();
        store.insert_transform(entity, Transform::at(spawn.position));
        store.insert_visual(entity, Visual { sprite: base });
        store.insert_animation(entity, Animation::looping(base, GHOST_FRAMES, animation::GHOST_FRAME_SECONDS));
        store.insert_motion(
            entity,
            Motion {
                speed: config.ghost_speeds.normal,
                direction: Some(spawn.direction),
                on_blocked: BlockedPolicy::Hold,
            },
        );

        ai.ghosts.push(Ghost::new(spawn.kind, entity, spawn.home_cell(), spawn.scatter_target, spawn.durations));
    }
    ai
}

use anyhow::{Context, Result};
use pacman_core::constants::LOOP_TIME;
use pacman_core::events::GameEvent;
use pacman_core::game::Game;
use pacman_core::logging::setup_logging;
use pacman_core::map::direction::Direction;
use pacman_core::systems::RoundState;
use tracing::{debug, info};

/// Ten minutes at the fixed loop rate.
const DEFAULT_TICK_LIMIT: u64 = 60 * 60 * 10;

/// Key presses fed to the simulation, as (tick, key).
const SCRIPT: &[(u64, Direction)] = &[
    (0, Direction::Left),
    (40, Direction::Up),
    (150, Direction::Right),
    (260, Direction::Down),
    (400, Direction::Left),
    (520, Direction::Up),
    (700, Direction::Right),
];

pub fn main() -> Result<()> {
    setup_logging();

    let tick_limit = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>().with_context(|| format!("invalid tick limit {arg:?}"))?,
        None => DEFAULT_TICK_LIMIT,
    };

    let mut game = Game::classic().context("failed to build the classic level")?;
    let dt = LOOP_TIME.as_secs_f32();
    info!(tick_limit, dt, "Starting headless run");

    let mut round = game.round();
    for tick in 0..tick_limit {
        let input = SCRIPT.iter().find(|(at, _)| *at == tick).map(|&(_, direction)| direction);
        let outcome = game.tick(dt, input);

        for event in &outcome.events {
            match event {
                GameEvent::PickupConsumed { .. } => debug!(tick, ?event, "Event"),
                _ => info!(tick, ?event, "Event"),
            }
        }

        round = outcome.round;
        if matches!(round, RoundState::Over | RoundState::Cleared) {
            break;
        }
    }

    info!(?round, score = game.score(), pickups_left = game.map().pickup_count(), "Run finished");
    Ok(())
}

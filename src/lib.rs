//! Pac-Man simulation core: maze, entities, movement, animation and ghost AI.
//!
//! Rendering, windowing and input polling live outside this crate. A host builds a
//! [`Game`](game::Game), feeds it [`tick`](game::Game::tick) calls with the elapsed time
//! and the latest movement key, and draws [`render_list`](game::Game::render_list).

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod sprites;
pub mod systems;

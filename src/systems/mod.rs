//! The simulation systems and the data they share.
//!
//! Each tick runs, in order: player control, ghost AI, movement, animation.

pub mod animation;
pub mod components;
pub mod ghost;
pub mod movement;
pub mod player;
pub mod render;
pub mod store;

pub use self::animation::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::movement::*;
pub use self::player::*;
pub use self::render::*;
pub use self::store::*;

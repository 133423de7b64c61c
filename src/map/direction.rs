use glam::{IVec2, Vec2};
use strum_macros::AsRefStr;

/// The four cardinal directions.
///
/// Motion that may be at rest is stored as `Option<Direction>`, with `None` meaning stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

/// The two movement axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// The four cardinal directions, in tie-break priority order for ghost decisions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the axis this direction moves along.
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// The two directions perpendicular to this one, in priority order.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self.axis() {
            Axis::Horizontal => [Direction::Up, Direction::Down],
            Axis::Vertical => [Direction::Left, Direction::Right],
        }
    }

    /// Returns the direction as an IVec2 (grid step, y grows downwards).
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Returns the direction as a unit Vec2 in pixel space.
    pub fn as_vec2(self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// Returns the direction as a usize (0-3). Constant time.
    /// This is useful for indexing into arrays.
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

/// Whether two optional directions lie on the same axis. `None` shares no axis.
pub fn same_axis(a: Option<Direction>, b: Option<Direction>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.axis() == b.axis())
}

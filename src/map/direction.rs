use glam::IVec2;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A unit step on the grid, or no step at all.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Still,
}

impl Direction {
    /// The four cardinal directions, in the order candidates are enumerated.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Still => Direction::Still,
        }
    }

    pub fn as_ivec2(&self) -> IVec2 {
        (*self).into()
    }

    /// The step vector multiplied by `by` tiles.
    pub fn scaled(&self, by: i32) -> IVec2 {
        self.as_ivec2() * by
    }

    /// Stable index used by renderers to pick directional sprites; `-1` for [`Direction::Still`].
    pub fn sprite_index(&self) -> i8 {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => 3,
            Direction::Still => -1,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
            Direction::Still => IVec2::ZERO,
        }
    }
}

//! Grid coordinates and axis-aligned regions.

use std::fmt;

use bevy_ecs::component::Component;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::map::direction::Direction;

/// An integer grid coordinate; `i` grows rightwards, `j` grows downwards.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position(pub IVec2);

impl Position {
    pub const fn new(i: i32, j: i32) -> Self {
        Self(IVec2::new(i, j))
    }

    pub fn i(&self) -> i32 {
        self.0.x
    }

    pub fn j(&self) -> i32 {
        self.0.y
    }

    /// The position one step away in `direction`.
    pub fn translate(&self, direction: Direction) -> Position {
        self.offset(direction.as_ivec2())
    }

    pub fn offset(&self, by: IVec2) -> Position {
        Position(self.0 + by)
    }

    /// Straight-line distance in tiles.
    pub fn distance(&self, to: Position) -> f32 {
        self.0.as_vec2().distance(to.0.as_vec2())
    }

    pub fn above(&self) -> Position {
        self.translate(Direction::Up)
    }
}

impl From<IVec2> for Position {
    fn from(value: IVec2) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i(), self.j())
    }
}

/// The inclusive bounding box of a set of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    top_left: Position,
    bottom_right: Position,
}

impl Rect {
    /// Builds the bounding box of `positions`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyRect`] when `positions` yields nothing.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Result<Rect, MapError> {
        let mut positions = positions.into_iter();
        let first = positions.next().ok_or(MapError::EmptyRect)?;
        let (min, max) = positions.fold((first.0, first.0), |(min, max), p| (min.min(p.0), max.max(p.0)));

        Ok(Rect {
            top_left: Position(min),
            bottom_right: Position(max),
        })
    }

    pub fn top_left(&self) -> Position {
        self.top_left
    }

    pub fn bottom_right(&self) -> Position {
        self.bottom_right
    }

    pub fn width(&self) -> i32 {
        self.bottom_right.i() - self.top_left.i() + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.j() - self.top_left.j() + 1
    }

    pub fn contains(&self, position: Position) -> bool {
        position.0.cmpge(self.top_left.0).all() && position.0.cmple(self.bottom_right.0).all()
    }
}

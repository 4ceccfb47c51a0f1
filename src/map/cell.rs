//! Cell types stored in the maze grid.

use strum_macros::Display;

use crate::systems::components::Ghost;

/// What occupies a single grid cell.
///
/// Spawn and base variants only appear in decoded input; [`Maze::new`](crate::map::builder::Maze::new)
/// rewrites them before the grid is used for play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Dot,
    PlayerSpawn,
    GhostSpawn(Ghost),
    PowerPickup,
    /// The threshold of the ghost pen. Solid for ghosts that are neither eaten nor inside the pen.
    Gate,
    /// Pen boundary; becomes a wall once the pen rectangle has been derived.
    Base,
    /// A cell from which ghosts may not turn upwards.
    OneWayUp,
}

impl Cell {
    pub fn is_pickup(&self) -> bool {
        matches!(self, Cell::Dot | Cell::PowerPickup)
    }
}

/// The two regions derived from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Region {
    #[strum(serialize = "base")]
    Base,
    #[strum(serialize = "gate")]
    Gate,
}

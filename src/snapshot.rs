//! A read-only view of the game, for renderers and tests.

use serde::Serialize;

use crate::map::{direction::Direction, geometry::Position};
use crate::systems::components::{Ghost, GhostMode};
use crate::systems::phase::Phase;
use crate::systems::state::GameStage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub stage: GameStage,
    pub tick: u64,
    pub level: u32,
    pub score: u32,
    pub top_score: u32,
    pub lives: u8,
    pub phase: Phase,
    pub player: PlayerSnapshot,
    /// Ordered Blinky, Pinky, Inky, Clyde.
    pub ghosts: Vec<GhostSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub position: Position,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GhostSnapshot {
    pub ghost: Ghost,
    pub position: Position,
    pub direction: Direction,
    pub mode: GhostMode,
    pub target: Position,
    pub color: &'static str,
}

impl Snapshot {
    pub fn ghost(&self, ghost: Ghost) -> Option<&GhostSnapshot> {
        self.ghosts.iter().find(|snapshot| snapshot.ghost == ghost)
    }
}

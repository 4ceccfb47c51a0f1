//! Target selection for the four ghosts.

use crate::error::{GameError, GameResult};
use crate::map::{direction::Direction, geometry::Position, geometry::Rect};
use crate::systems::components::{GhostMode, Pursuer, Targeting};

/// Distance within which a conditional pursuer gives up and heads for its corner.
pub const CONDITIONAL_RADIUS: f32 = 8.0;

/// How far ahead of the player an ambushing pursuer aims.
pub const AMBUSH_LEAD: i32 = 4;

/// How far ahead of the player the pincer's pivot point lies.
pub const PINCER_LEAD: i32 = 2;

/// Everything outside the ghost itself that its target may depend on.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext {
    pub player: Position,
    pub player_direction: Direction,
    /// Blinky's position at the time this ghost moves.
    pub blinky: Option<Position>,
    pub base_rect: Rect,
    pub gate_exit: Position,
}

/// Computes a ghost's target.
///
/// Eaten ghosts head home, ghosts inside the pen head for the gate, scattering ghosts head for
/// their corner; otherwise the ghost's [`Targeting`] strategy decides. Frightened ghosts get a
/// chase target even though their movement ignores it.
///
/// # Errors
///
/// Returns [`GameError::InvalidState`] if a pincer target is needed and Blinky is missing.
pub fn compute_target(
    mode: GhostMode,
    position: Position,
    spawn: Position,
    pursuer: &Pursuer,
    context: &TargetContext,
) -> GameResult<Position> {
    if mode == GhostMode::Eaten {
        return Ok(spawn);
    }
    if context.base_rect.contains(position) {
        return Ok(context.gate_exit);
    }
    if mode == GhostMode::Scatter {
        return Ok(pursuer.scatter_corner);
    }
    chase_target(pursuer, position, context)
}

fn chase_target(pursuer: &Pursuer, position: Position, context: &TargetContext) -> GameResult<Position> {
    let player = context.player;
    let heading = context.player_direction;

    match pursuer.targeting {
        Targeting::Direct => Ok(player),
        Targeting::Ambush => Ok(player.offset(heading.scaled(AMBUSH_LEAD))),
        Targeting::Pincer => {
            let blinky = context
                .blinky
                .ok_or_else(|| GameError::InvalidState("pincer target requires blinky".to_string()))?;
            let pivot = player.offset(heading.scaled(PINCER_LEAD));
            Ok(Position::from(pivot.0 * 2 - blinky.0))
        }
        Targeting::Conditional => {
            if position.distance(player) > CONDITIONAL_RADIUS {
                Ok(player)
            } else {
                Ok(pursuer.scatter_corner)
            }
        }
    }
}

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::GameplayEvent;
use crate::map::{builder::Maze, cell::Cell, geometry::Position};
use crate::systems::components::{GhostState, PickupCount, PlayClock, PlayerControlled, Score};
use crate::systems::phase::{broadcast_phase, PhaseScheduler};
use crate::systems::state::GameStage;

/// Eats whatever pickup lies under the player and declares the round won once none are left.
///
/// Runs only while the round is running, so the win fires at most once per round.
#[allow(clippy::too_many_arguments)]
pub fn pickup_system(
    config: Res<GameConfig>,
    clock: Res<PlayClock>,
    mut maze: ResMut<Maze>,
    mut pickups: ResMut<PickupCount>,
    mut score: ResMut<Score>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut stage: ResMut<GameStage>,
    players: Query<&Position, With<PlayerControlled>>,
    mut ghosts: Query<&mut GhostState>,
    mut events: EventWriter<GameplayEvent>,
    mut errors: EventWriter<GameError>,
) {
    let position = match players.single() {
        Ok(position) => *position,
        Err(e) => {
            errors.write(GameError::InvalidState(format!("No/multiple player entities: {e}")));
            return;
        }
    };

    match maze.cell(position) {
        Cell::Dot => {
            maze.set_cell(position, Cell::Empty);
            *score = score.apply(config.dot_score);
            pickups.dots = pickups.dots.saturating_sub(1);
            events.write(GameplayEvent::DotEaten(position));
        }
        Cell::PowerPickup => {
            maze.set_cell(position, Cell::Empty);
            *score = score.apply(config.power_score);
            pickups.power = pickups.power.saturating_sub(1);

            let phase = scheduler.frighten(clock.0);
            broadcast_phase(phase, ghosts.iter_mut().map(|state| state.into_inner()));
            debug!(%position, deadline = scheduler.deadline(), "Power pickup eaten");
            events.write(GameplayEvent::PowerPickupEaten(position));
            events.write(GameplayEvent::PhaseChanged(phase));
        }
        _ => {}
    }

    // Evaluated on every running tick, not only after a pickup.
    if pickups.is_cleared() {
        *stage = GameStage::RoundWon;
        info!(score = score.current, "Round won");
        events.write(GameplayEvent::RoundWon);
    }
}

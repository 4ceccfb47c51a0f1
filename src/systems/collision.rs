use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::GameplayEvent;
use crate::map::geometry::Position;
use crate::systems::components::{Ghost, GhostMode, GhostState, PlayerControlled, PlayerLives, Score};
use crate::systems::state::{lose_life, GameStage};

/// Resolves ghosts sharing the player's tile, in [`Ghost`] order.
///
/// A frightened ghost is eaten and scores; any other ghost that is not already eaten catches
/// the player, which costs a life and ends arbitration for this tick.
#[allow(clippy::too_many_arguments)]
pub fn arbitration_system(
    config: Res<GameConfig>,
    mut score: ResMut<Score>,
    mut lives: ResMut<PlayerLives>,
    mut stage: ResMut<GameStage>,
    players: Query<&Position, (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(Entity, &Ghost, &Position, &mut GhostState), Without<PlayerControlled>>,
    mut events: EventWriter<GameplayEvent>,
    mut errors: EventWriter<GameError>,
) {
    let player = match players.single() {
        Ok(position) => *position,
        Err(e) => {
            errors.write(GameError::InvalidState(format!("No/multiple player entities: {e}")));
            return;
        }
    };

    let mut overlapping: SmallVec<[(Ghost, Entity); 4]> = ghosts
        .iter()
        .filter(|(_, _, position, _)| **position == player)
        .map(|(entity, ghost, ..)| (*ghost, entity))
        .collect();
    overlapping.sort_unstable();

    for (ghost, entity) in overlapping {
        let Ok((.., mut state)) = ghosts.get_mut(entity) else {
            continue;
        };

        match state.mode() {
            GhostMode::Frightened => {
                *score = score.apply(config.arrest_score);
                state.mark_eaten();
                debug!(ghost = ghost.as_str(), score = score.current, "Ghost eaten");
                events.write(GameplayEvent::PursuerEaten { ghost, position: player });
            }
            GhostMode::Eaten => {}
            GhostMode::Scatter | GhostMode::Chase => {
                *stage = lose_life(&mut lives, config.respawn_ticks());
                info!(ghost = ghost.as_str(), lives = lives.0, stage = ?*stage, "Player caught");
                events.write(GameplayEvent::PlayerCaught {
                    ghost,
                    lives_left: lives.0,
                });
                if *stage == GameStage::GameOver {
                    events.write(GameplayEvent::GameOver);
                }
                break;
            }
        }
    }
}

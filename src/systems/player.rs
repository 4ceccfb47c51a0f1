use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res};
use tracing::trace;

use crate::error::GameError;
use crate::map::{builder::Maze, cell::Cell, direction::Direction, geometry::Position};
use crate::systems::components::{BufferedDirection, PlayerControlled, Velocity};

/// Whether the player may turn into the tile at `position`.
///
/// Turning into the gate is not allowed, although the player can still be carried onto it by
/// its current heading.
pub fn can_turn_into(maze: &Maze, position: Position) -> bool {
    !matches!(maze.cell(position), Cell::Wall | Cell::Gate)
}

/// Advances the player by one tick: applies the buffered turn if it is possible, then moves
/// unless a wall is directly ahead.
pub fn step_player(maze: &Maze, position: &mut Position, velocity: &mut Velocity, buffered: &mut BufferedDirection) {
    if let BufferedDirection::Some(requested) = *buffered {
        if can_turn_into(maze, position.translate(requested)) {
            velocity.direction = requested;
            *buffered = BufferedDirection::None;
        }
    }

    if velocity.direction == Direction::Still {
        return;
    }

    let next = position.offset(velocity.direction.scaled(velocity.speed));
    if !maze.is_wall(next) {
        *position = next;
    }
}

pub fn player_movement_system(
    maze: Res<Maze>,
    mut players: Query<(&mut Position, &mut Velocity, &mut BufferedDirection), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (mut position, mut velocity, mut buffered) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player system: {e}"
            )));
            return;
        }
    };

    step_player(&maze, &mut position, &mut velocity, &mut buffered);
    trace!(position = %*position, direction = %velocity.direction, ?buffered, "Player stepped");
}

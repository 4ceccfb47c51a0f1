use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::GameError;
use crate::map::{builder::Maze, cell::Cell, direction::Direction, geometry::Position};
use crate::systems::components::{GameRng, Ghost, GhostMode, GhostState, PlayerControlled, Pursuer, Spawn, Velocity};
use crate::systems::targeting::{compute_target, TargetContext};

pub type Candidates = SmallVec<[Direction; 4]>;

/// Collects the directions a ghost may legally take from `position`.
///
/// Walls are never legal. The gate is only passable for eaten ghosts and for ghosts still inside
/// the pen, upward turns are barred on one-way cells, and the exact reverse of `heading` is
/// excluded. An empty result means the ghost is in a dead end.
pub fn candidate_directions(maze: &Maze, position: Position, heading: Direction, mode: GhostMode) -> Candidates {
    let here = maze.cell(position);
    let gate_open = mode == GhostMode::Eaten || maze.base_rect().contains(position);
    let reverse = heading.opposite();

    Direction::DIRECTIONS
        .into_iter()
        .filter(|direction| !(here == Cell::OneWayUp && *direction == Direction::Up))
        .filter(|direction| *direction != reverse)
        .filter(|direction| match maze.cell(position.translate(*direction)) {
            Cell::Wall => false,
            Cell::Gate => gate_open,
            _ => true,
        })
        .collect()
}

/// Picks a direction among `candidates`.
///
/// Frightened ghosts pick at random from every candidate but the last (or the only one, if
/// there is just one); everyone else takes the candidate whose next tile is nearest to `target`,
/// with ties going to the earlier candidate. With no candidates the ghost turns around.
pub fn choose_direction(
    candidates: &[Direction],
    heading: Direction,
    mode: GhostMode,
    position: Position,
    target: Position,
    rng: &mut impl Rng,
) -> Direction {
    if candidates.is_empty() {
        return heading.opposite();
    }

    if mode == GhostMode::Frightened {
        let index = if candidates.len() > 1 {
            rng.random_range(0..candidates.len() - 1)
        } else {
            0
        };
        return candidates[index];
    }

    candidates
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = position.translate(*a).distance(target);
            let db = position.translate(*b).distance(target);
            da.total_cmp(&db)
        })
        .unwrap_or(heading.opposite())
}

/// Moves every ghost one step, in [`Ghost`] order.
///
/// Each ghost computes its target, chooses a direction and moves. Ghosts are processed one at a
/// time so that Inky sees where Blinky ended up this tick.
pub fn ghost_movement_system(
    maze: Res<Maze>,
    mut rng: ResMut<GameRng>,
    players: Query<(&Position, &Velocity), (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<
        (Entity, &Ghost, &Spawn, &mut Pursuer, &mut GhostState, &mut Position, &mut Velocity),
        Without<PlayerControlled>,
    >,
    mut errors: EventWriter<GameError>,
) {
    let (player, player_direction) = match players.single() {
        Ok((position, velocity)) => (*position, velocity.direction),
        Err(e) => {
            errors.write(GameError::InvalidState(format!("No/multiple player entities: {e}")));
            return;
        }
    };

    let mut order: SmallVec<[(Ghost, Entity); 4]> = ghosts.iter().map(|(entity, ghost, ..)| (*ghost, entity)).collect();
    order.sort_unstable();

    let blinky = order.iter().find(|(ghost, _)| *ghost == Ghost::Blinky).map(|(_, entity)| *entity);

    for (_, entity) in order {
        let blinky_position = blinky.and_then(|e| ghosts.get(e).ok()).map(|(.., position, _)| *position);

        let Ok((_, ghost, spawn, mut pursuer, mut state, mut position, mut velocity)) = ghosts.get_mut(entity) else {
            continue;
        };

        let context = TargetContext {
            player,
            player_direction,
            blinky: blinky_position,
            base_rect: maze.base_rect(),
            gate_exit: maze.gate_exit(),
        };

        let mode = state.mode();
        match compute_target(mode, *position, spawn.0, &pursuer, &context) {
            Ok(target) => pursuer.target = target,
            Err(e) => {
                errors.write(e);
                continue;
            }
        }

        let candidates = candidate_directions(&maze, *position, velocity.direction, mode);
        let direction = choose_direction(
            &candidates,
            velocity.direction,
            mode,
            *position,
            pursuer.target,
            &mut rng.0,
        );

        velocity.direction = direction;
        *position = position.offset(direction.scaled(velocity.speed));
        trace!(ghost = ghost.as_str(), %direction, position = %*position, target = %pursuer.target, ?mode, "Ghost moved");

        if state.is_eaten() && *position == spawn.0 {
            state.arrive_home();
            debug!(ghost = ghost.as_str(), mode = %state.mode(), "Eaten ghost reached home");
        }
    }
}

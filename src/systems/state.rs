use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::{With, Without},
    resource::Resource,
    system::{Query, Res, ResMut},
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::GameConfig,
    error::GameError,
    events::{GameCommand, GameEvent, GameplayEvent},
    map::{builder::Maze, geometry::Position},
    systems::{
        components::{
            BufferedDirection, Ghost, GhostMode, GhostState, Level, PickupCount, PlayClock, PlayerBundle, PlayerControlled,
            PlayerLives, Pursuer, Score, Spawn, Velocity,
        },
        phase::{broadcast_phase, PhaseScheduler},
    },
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum GameStage {
    /// Freshly created; nothing has been requested yet.
    #[default]
    NotStarted,
    /// Waiting for a start request, e.g. after advancing to the next level.
    AwaitingStart,
    /// Short freeze before play begins or resumes.
    Countdown { remaining_ticks: u32 },
    /// The main gameplay loop is active.
    Running,
    Paused,
    /// The player was caught and the agents are about to be put back on their spawns.
    Respawning { remaining_ticks: u32 },
    /// Every pickup has been eaten.
    RoundWon,
    /// The player was caught with no spare lives.
    GameOver,
}

impl GameStage {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStage::Running)
    }

    /// Whether the round has ended one way or the other.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStage::RoundWon | GameStage::GameOver)
    }
}

/// Run condition for the gameplay systems.
pub fn is_running(stage: Res<GameStage>) -> bool {
    stage.is_running()
}

/// Takes a life, returning the stage to move to.
pub fn lose_life(lives: &mut PlayerLives, respawn_ticks: u32) -> GameStage {
    match lives.0.checked_sub(1) {
        Some(remaining) => {
            lives.0 = remaining;
            GameStage::Respawning {
                remaining_ticks: respawn_ticks,
            }
        }
        None => GameStage::GameOver,
    }
}

pub type PlayerResetQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Spawn, &'static mut Position, &'static mut Velocity, &'static mut BufferedDirection),
    (With<PlayerControlled>, Without<Ghost>),
>;

pub type GhostResetQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Spawn,
        &'static mut Position,
        &'static mut Velocity,
        &'static mut GhostState,
        &'static mut Pursuer,
    ),
    (With<Ghost>, Without<PlayerControlled>),
>;

/// Puts every agent back on its spawn, facing its starting direction, with ghosts in `mode`.
pub fn reset_agents(players: &mut PlayerResetQuery, ghosts: &mut GhostResetQuery, mode: GhostMode) {
    for (spawn, mut position, mut velocity, mut buffered) in players.iter_mut() {
        *position = spawn.0;
        velocity.direction = PlayerBundle::START_DIRECTION;
        *buffered = BufferedDirection::None;
    }

    for (spawn, mut position, mut velocity, mut state, mut pursuer) in ghosts.iter_mut() {
        *position = spawn.0;
        velocity.direction = Default::default();
        state.reset(mode);
        pursuer.target = spawn.0;
    }

    debug!(?mode, "Agents reset to their spawns");
}

/// Applies stage commands and buffers player turns.
#[allow(clippy::too_many_arguments)]
pub fn command_system(
    mut reader: EventReader<GameEvent>,
    config: Res<GameConfig>,
    scheduler: Res<PhaseScheduler>,
    mut stage: ResMut<GameStage>,
    mut maze: ResMut<Maze>,
    mut pickups: ResMut<PickupCount>,
    mut score: ResMut<Score>,
    mut lives: ResMut<PlayerLives>,
    mut level: ResMut<Level>,
    mut players: PlayerResetQuery,
    mut ghosts: GhostResetQuery,
    mut events: EventWriter<GameplayEvent>,
    mut errors: EventWriter<GameError>,
) {
    for event in reader.read() {
        let GameEvent::Command(command) = *event;
        let old_stage = *stage;

        let new_stage = match (command, old_stage) {
            (GameCommand::MovePlayer(direction), GameStage::Running) => {
                match players.single_mut() {
                    Ok((.., mut buffered)) => *buffered = BufferedDirection::Some(direction),
                    Err(e) => {
                        errors.write(GameError::InvalidState(format!(
                            "No/multiple entities queried for player command: {e}"
                        )));
                    }
                }
                continue;
            }
            (GameCommand::MovePlayer(_), _) => continue,
            (GameCommand::Start, GameStage::NotStarted | GameStage::AwaitingStart) => {
                if old_stage == GameStage::NotStarted {
                    events.write(GameplayEvent::LevelStarted(level.0));
                }
                GameStage::Countdown {
                    remaining_ticks: config.countdown_ticks(),
                }
            }
            (GameCommand::TogglePause, GameStage::Running) => GameStage::Paused,
            (GameCommand::TogglePause, GameStage::Paused) => GameStage::Running,
            (GameCommand::NextLevel, GameStage::RoundWon) => {
                level.0 += 1;
                *pickups = maze.restore_pickups();
                reset_agents(&mut players, &mut ghosts, scheduler.first_phase().into());
                events.write(GameplayEvent::LevelStarted(level.0));
                GameStage::AwaitingStart
            }
            (GameCommand::Restart, GameStage::GameOver) => {
                *score = score.cleared();
                *lives = PlayerLives(config.lives);
                *level = Level::default();
                *pickups = maze.restore_pickups();
                reset_agents(&mut players, &mut ghosts, scheduler.first_phase().into());
                events.write(GameplayEvent::LevelStarted(level.0));
                GameStage::AwaitingStart
            }
            (command, current) => {
                debug!(?command, stage = ?current, "Command ignored in current stage");
                continue;
            }
        };

        info!(from = ?old_stage, to = ?new_stage, ?command, "Stage changed");
        *stage = new_stage;
    }
}

/// Counts down the timed stages and performs the work attached to leaving them.
pub fn stage_system(
    config: Res<GameConfig>,
    clock: Res<PlayClock>,
    mut stage: ResMut<GameStage>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut players: PlayerResetQuery,
    mut ghosts: GhostResetQuery,
    mut events: EventWriter<GameplayEvent>,
) {
    let old_stage = *stage;
    let new_stage = match old_stage {
        GameStage::Countdown { remaining_ticks } => match remaining_ticks.saturating_sub(1) {
            0 => GameStage::Running,
            remaining_ticks => GameStage::Countdown { remaining_ticks },
        },
        GameStage::Respawning { remaining_ticks } => match remaining_ticks.saturating_sub(1) {
            0 => GameStage::Countdown {
                remaining_ticks: config.countdown_ticks(),
            },
            remaining_ticks => GameStage::Respawning { remaining_ticks },
        },
        other => other,
    };

    if old_stage == new_stage {
        return;
    }

    match (old_stage, new_stage) {
        (GameStage::Countdown { .. }, GameStage::Countdown { .. })
        | (GameStage::Respawning { .. }, GameStage::Respawning { .. }) => {}
        (GameStage::Countdown { .. }, GameStage::Running) => {
            let phase = scheduler.reset(clock.0);
            broadcast_phase(phase, ghosts.iter_mut().map(|(.., state, _)| state.into_inner()));
            events.write(GameplayEvent::PhaseChanged(phase));
            info!(%phase, deadline = scheduler.deadline(), "Round running");
        }
        (GameStage::Respawning { .. }, GameStage::Countdown { .. }) => {
            reset_agents(&mut players, &mut ghosts, scheduler.first_phase().into());
            info!("Agents respawned");
        }
        _ => {
            warn!(?old_stage, ?new_stage, "Unhandled game stage transition");
        }
    }

    *stage = new_stage;
}

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::map::{direction::Direction, geometry::Position};
use crate::systems::components::Ghost;
use crate::systems::phase::Phase;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Buffer a turn for the player; only honoured while the round is running.
    MovePlayer(Direction),
    Start,
    TogglePause,
    NextLevel,
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Notifications produced while ticking, handed back to the caller of `Game::tick`.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameplayEvent {
    DotEaten(Position),
    PowerPickupEaten(Position),
    PursuerEaten { ghost: Ghost, position: Position },
    PlayerCaught { ghost: Ghost, lives_left: u8 },
    PhaseChanged(Phase),
    RoundWon,
    GameOver,
    LevelStarted(u32),
}

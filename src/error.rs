//! Centralized error types for the simulation core.
//!
//! Construction-time problems (a bad board, a bad config) are returned as errors and
//! are fatal for that game. Invariant breaks detected while ticking are written as
//! [`GameError`] events by the offending system and handed back from `Game::tick`.

use bevy_ecs::event::Event;

use crate::map::cell::Region;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl GameError {
    /// Whether this error stems from bad input given at construction.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, GameError::InvalidState(_))
    }
}

/// Error type for text board parsing.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
}

/// Errors raised while building a maze from decoded cells.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Maze has no cells")]
    EmptyGrid,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Spawn position for {0} not found")]
    MissingSpawn(&'static str),

    #[error("Spawn position for {0} appears more than once")]
    DuplicateSpawn(&'static str),

    #[error("Maze has no {0} cells")]
    MissingRegion(Region),

    #[error("Cannot derive a rectangle from zero positions")]
    EmptyRect,
}

/// Errors raised while validating or loading a game configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Tick rate must be positive")]
    ZeroTickRate,

    #[error("Phase timeline must have at least one entry")]
    EmptyTimeline,

    #[error("Phase timeline entry {0} is Frightened; only Scatter and Chase may be scheduled")]
    FrightenedInTimeline(usize),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

//! Game tuning, loaded from JSON or taken from defaults.

use std::path::Path;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::systems::phase::{Phase, PhaseScheduler, PhaseSpan};

/// A scheduled phase and how long it lasts, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub phase: Phase,
    pub seconds: f32,
}

impl PhaseEntry {
    pub const fn new(phase: Phase, seconds: f32) -> Self {
        Self { phase, seconds }
    }
}

/// The scatter/chase alternation used when no timeline is configured.
pub const DEFAULT_PHASES: [PhaseEntry; 8] = [
    PhaseEntry::new(Phase::Scatter, 7.0),
    PhaseEntry::new(Phase::Chase, 20.0),
    PhaseEntry::new(Phase::Scatter, 7.0),
    PhaseEntry::new(Phase::Chase, 20.0),
    PhaseEntry::new(Phase::Scatter, 5.0),
    PhaseEntry::new(Phase::Chase, 20.0),
    PhaseEntry::new(Phase::Scatter, 5.0),
    PhaseEntry::new(Phase::Chase, 20.0),
];

/// Every tunable of a game. Missing JSON fields fall back to their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub phases: Vec<PhaseEntry>,
    pub frightened_seconds: f32,
    pub dot_score: u32,
    pub power_score: u32,
    /// Points for catching a frightened ghost.
    pub arrest_score: u32,
    /// Spare lives at the start of a game.
    pub lives: u8,
    /// Pause between a start request (or a respawn) and play resuming.
    pub countdown_seconds: f32,
    /// Settle delay after the player is caught.
    pub respawn_delay_seconds: f32,
    /// Seed for frightened movement; a random seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 10,
            phases: DEFAULT_PHASES.to_vec(),
            frightened_seconds: 20.0,
            dot_score: 1,
            power_score: 0,
            arrest_score: 200,
            lives: 3,
            countdown_seconds: 2.0,
            respawn_delay_seconds: 3.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        self.scheduler().map(|_| ())
    }

    /// Converts a duration in seconds to whole ticks at the configured rate.
    pub fn ticks(&self, seconds: f32) -> u32 {
        (seconds * self.tick_rate as f32).round() as u32
    }

    pub fn countdown_ticks(&self) -> u32 {
        self.ticks(self.countdown_seconds)
    }

    pub fn respawn_ticks(&self) -> u32 {
        self.ticks(self.respawn_delay_seconds)
    }

    /// Builds the phase scheduler for this configuration's timeline.
    pub fn scheduler(&self) -> Result<PhaseScheduler, ConfigError> {
        let timeline = self
            .phases
            .iter()
            .map(|entry| PhaseSpan {
                phase: entry.phase,
                ticks: u64::from(self.ticks(entry.seconds)),
            })
            .collect();
        PhaseScheduler::new(timeline, u64::from(self.ticks(self.frightened_seconds)))
    }
}

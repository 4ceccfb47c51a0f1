//! The global scatter/chase timeline and the frightened override.

use bevy_ecs::event::EventWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, ResMut};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

use crate::error::ConfigError;
use crate::events::GameplayEvent;
use crate::systems::components::{GhostMode, GhostState, PlayClock};

/// A global phase, broadcast to every ghost when it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Phase {
    Scatter,
    Chase,
    Frightened,
}

impl From<Phase> for GhostMode {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Scatter => GhostMode::Scatter,
            Phase::Chase => GhostMode::Chase,
            Phase::Frightened => GhostMode::Frightened,
        }
    }
}

/// One timeline entry, with its duration already converted to ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSpan {
    pub phase: Phase,
    pub ticks: u64,
}

/// Walks the phase timeline against the play clock.
///
/// `cursor` always points at the next entry to apply. A frightened override replaces the
/// current phase and deadline but leaves the cursor alone, so the timeline resumes where it
/// left off once the override lapses.
#[derive(Resource, Debug, Clone)]
pub struct PhaseScheduler {
    timeline: Vec<PhaseSpan>,
    frightened_ticks: u64,
    cursor: usize,
    current: Phase,
    deadline: u64,
}

impl PhaseScheduler {
    /// # Errors
    ///
    /// The timeline must be non-empty and may only contain scatter and chase entries.
    pub fn new(timeline: Vec<PhaseSpan>, frightened_ticks: u64) -> Result<Self, ConfigError> {
        let first = timeline.first().ok_or(ConfigError::EmptyTimeline)?;
        if let Some(index) = timeline.iter().position(|span| span.phase == Phase::Frightened) {
            return Err(ConfigError::FrightenedInTimeline(index));
        }

        Ok(Self {
            current: first.phase,
            deadline: first.ticks,
            cursor: 1,
            frightened_ticks,
            timeline,
        })
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    pub fn timeline(&self) -> &[PhaseSpan] {
        &self.timeline
    }

    /// The phase every round opens with.
    pub fn first_phase(&self) -> Phase {
        self.timeline[0].phase
    }

    /// Restarts the timeline from its first entry at `now`, returning the phase to broadcast.
    pub fn reset(&mut self, now: u64) -> Phase {
        let first = self.timeline[0];
        self.current = first.phase;
        self.deadline = now.saturating_add(first.ticks);
        self.cursor = 1;
        self.current
    }

    /// Advances the timeline if the current deadline has passed.
    ///
    /// Returns the newly started phase, if any.
    pub fn update(&mut self, now: u64) -> Option<Phase> {
        if now < self.deadline {
            return None;
        }

        match self.timeline.get(self.cursor) {
            Some(span) => {
                self.current = span.phase;
                self.deadline = now.saturating_add(span.ticks);
                self.cursor += 1;
                Some(self.current)
            }
            None => {
                // Timeline exhausted; the last phase holds for the rest of the round.
                // A lapsed frightened period falls back to that phase rather than staying frightened.
                self.deadline = u64::MAX;
                let last = self.timeline[self.timeline.len() - 1].phase;
                if self.current == Phase::Frightened {
                    self.current = last;
                    Some(last)
                } else {
                    None
                }
            }
        }
    }

    /// Starts (or extends) a frightened period at `now`.
    pub fn frighten(&mut self, now: u64) -> Phase {
        self.current = Phase::Frightened;
        self.deadline = now.saturating_add(self.frightened_ticks);
        self.current
    }
}

/// Requests `phase` on every ghost; eaten ghosts park it until they are home.
pub fn broadcast_phase<'a>(phase: Phase, states: impl IntoIterator<Item = &'a mut GhostState>) {
    for state in states {
        state.set_mode(phase.into());
    }
}

/// Advances the play clock and applies any phase whose time has come.
pub fn phase_system(
    mut clock: ResMut<PlayClock>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut ghosts: Query<&mut GhostState>,
    mut events: EventWriter<GameplayEvent>,
) {
    clock.0 += 1;

    if let Some(phase) = scheduler.update(clock.0) {
        debug!(%phase, clock = clock.0, cursor = scheduler.cursor(), "Phase changed");
        broadcast_phase(phase, ghosts.iter_mut().map(|state| state.into_inner()));
        events.write(GameplayEvent::PhaseChanged(phase));
    }
}

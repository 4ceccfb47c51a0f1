use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::map::{builder::Maze, direction::Direction, geometry::Position};

/// A tag component for the entity that is controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// The four ghosts, in the order they are updated each tick.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    /// Returns the lowercase ghost name, used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Ghost::Blinky => "blinky",
            Ghost::Pinky => "pinky",
            Ghost::Inky => "inky",
            Ghost::Clyde => "clyde",
        }
    }

    /// Zero-based update order.
    pub fn index(self) -> usize {
        match self {
            Ghost::Blinky => 0,
            Ghost::Pinky => 1,
            Ghost::Inky => 2,
            Ghost::Clyde => 3,
        }
    }

    pub fn targeting(self) -> Targeting {
        match self {
            Ghost::Blinky => Targeting::Direct,
            Ghost::Pinky => Targeting::Ambush,
            Ghost::Inky => Targeting::Pincer,
            Ghost::Clyde => Targeting::Conditional,
        }
    }

    /// The maze corner this ghost retreats to while scattering.
    pub fn scatter_corner(self, maze: &Maze) -> Position {
        match self {
            Ghost::Blinky => Position::new(maze.max_i(), 0),
            Ghost::Pinky => Position::new(0, 0),
            Ghost::Inky => Position::new(maze.max_i(), maze.max_j()),
            Ghost::Clyde => Position::new(0, maze.max_j()),
        }
    }

    /// Presentation colour for renderers.
    pub fn color(self, mode: GhostMode) -> &'static str {
        match mode {
            GhostMode::Frightened => "blue",
            GhostMode::Eaten => "white",
            GhostMode::Scatter | GhostMode::Chase => match self {
                Ghost::Blinky => "red",
                Ghost::Pinky => "pink",
                Ghost::Inky => "cyan",
                Ghost::Clyde => "brown",
            },
        }
    }
}

/// How a ghost picks its target while chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Targeting {
    /// Straight at the player.
    Direct,
    /// Four tiles ahead of the player.
    Ambush,
    /// Blinky's position mirrored through the point two tiles ahead of the player.
    Pincer,
    /// The player when far away, its own corner when within eight tiles.
    Conditional,
}

/// A ghost's own behaviour mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

/// Mode state machine for a ghost.
///
/// While [`GhostMode::Eaten`] the ghost is heading home; mode changes requested in the meantime
/// are parked in `pending` and applied once it arrives.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostState {
    mode: GhostMode,
    pending: Option<GhostMode>,
}

impl GhostState {
    pub fn new(mode: GhostMode) -> Self {
        Self { mode, pending: None }
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn pending(&self) -> Option<GhostMode> {
        self.pending
    }

    pub fn is_eaten(&self) -> bool {
        self.mode == GhostMode::Eaten
    }

    /// Requests a mode change, deferring it if the ghost is currently eaten.
    pub fn set_mode(&mut self, mode: GhostMode) {
        if self.is_eaten() {
            self.pending = Some(mode);
        } else {
            self.mode = mode;
        }
    }

    /// Switches to [`GhostMode::Eaten`], forgetting any previously parked request.
    pub fn mark_eaten(&mut self) {
        self.mode = GhostMode::Eaten;
        self.pending = None;
    }

    /// Called when an eaten ghost reaches its spawn; resumes the parked mode, or chasing.
    pub fn arrive_home(&mut self) {
        if self.is_eaten() {
            self.mode = self.pending.take().unwrap_or(GhostMode::Chase);
        }
    }

    /// Forces `mode` regardless of the current state.
    pub fn reset(&mut self, mode: GhostMode) {
        *self = Self::new(mode);
    }
}

impl Default for GhostState {
    fn default() -> Self {
        Self::new(GhostMode::Scatter)
    }
}

/// Per-ghost targeting data.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pursuer {
    pub targeting: Targeting,
    pub scatter_corner: Position,
    /// The target computed on the most recent tick.
    pub target: Position,
}

/// Where an agent starts and respawns.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn(pub Position);

/// Heading and speed (tiles per tick).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub speed: i32,
    pub direction: Direction,
}

impl Velocity {
    pub fn new(direction: Direction) -> Self {
        Self { speed: 1, direction }
    }
}

/// A turn requested by the player that has not been possible yet.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BufferedDirection {
    #[default]
    None,
    Some(Direction),
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub spawn: Spawn,
    pub velocity: Velocity,
    pub buffered_direction: BufferedDirection,
}

impl PlayerBundle {
    /// The direction the player faces when (re)spawning.
    pub const START_DIRECTION: Direction = Direction::Left;

    pub fn new(spawn: Position) -> Self {
        Self {
            player: PlayerControlled,
            position: spawn,
            spawn: Spawn(spawn),
            velocity: Velocity::new(Self::START_DIRECTION),
            buffered_direction: BufferedDirection::None,
        }
    }
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub pursuer: Pursuer,
    pub state: GhostState,
    pub position: Position,
    pub spawn: Spawn,
    pub velocity: Velocity,
}

impl GhostBundle {
    pub fn new(ghost: Ghost, maze: &Maze) -> Self {
        let spawn = maze.spawns().ghost(ghost);
        Self {
            ghost,
            pursuer: Pursuer {
                targeting: ghost.targeting(),
                scatter_corner: ghost.scatter_corner(maze),
                target: spawn,
            },
            state: GhostState::default(),
            position: spawn,
            spawn: Spawn(spawn),
            velocity: Velocity::new(Direction::Still),
        }
    }
}

/// Current score and the best score seen since the game was created.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub current: u32,
    pub top: u32,
}

impl Score {
    /// Adds `delta` points, raising the top score if it is exceeded.
    #[must_use]
    pub fn apply(self, delta: u32) -> Score {
        let current = self.current.saturating_add(delta);
        Score {
            current,
            top: self.top.max(current),
        }
    }

    /// Clears the current score, keeping the top score.
    #[must_use]
    pub fn cleared(self) -> Score {
        Score { current: 0, top: self.top }
    }
}

/// Pickups still on the maze.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PickupCount {
    pub dots: u32,
    pub power: u32,
}

impl PickupCount {
    pub fn is_cleared(&self) -> bool {
        self.dots == 0 && self.power == 0
    }
}

/// Spare lives; the game ends when a life is lost with none to spare.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(3)
    }
}

/// The current level, starting at 1.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(pub u32);

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

/// Ticks since the game was created, regardless of stage.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickCount(pub u64);

/// Ticks spent in the running stage; phase deadlines are measured against this clock.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayClock(pub u64);

/// Randomness for frightened ghosts.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(SmallRng::seed_from_u64(seed)),
            None => Self(SmallRng::from_os_rng()),
        }
    }
}

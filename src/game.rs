//! This module contains the top-level game state and its tick loop.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::constants::RAW_BOARD;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent, GameplayEvent};
use crate::formatter;
use crate::map::{builder::Maze, direction::Direction, geometry::Position, parser::MapTileParser};
use crate::snapshot::{GhostSnapshot, PlayerSnapshot, Snapshot};
use crate::systems::{
    collision::arbitration_system,
    components::{
        GameRng, Ghost, GhostBundle, GhostState, Level, PlayClock, PlayerBundle, PlayerControlled, PlayerLives, Pursuer,
        Score, TickCount, Velocity,
    },
    ghost::ghost_movement_system,
    item::pickup_system,
    phase::{phase_system, PhaseScheduler},
    player::player_movement_system,
    state::{command_system, is_running, stage_system, GameStage},
};

/// Core game state built on the Bevy ECS architecture.
///
/// The `World` holds the maze and round state as resources and the five agents as entities; the
/// `Schedule` runs one tick of the simulation. Commands are queued with [`Game::send`] and take
/// effect on the next [`Game::tick`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a game on `maze`, waiting in [`GameStage::NotStarted`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` does not validate.
    pub fn new(maze: Maze, config: GameConfig) -> GameResult<Game> {
        config.validate()?;
        let scheduler = config.scheduler()?;

        debug!("Initializing ECS world and system schedule");
        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::configure_schedule(&mut schedule);

        let pickups = maze.count_pickups();
        let first_mode = scheduler.first_phase().into();

        world.spawn(PlayerBundle::new(maze.spawns().player));
        for ghost in Ghost::iter() {
            let mut bundle = GhostBundle::new(ghost, &maze);
            bundle.state = GhostState::new(first_mode);
            world.spawn(bundle);
        }

        world.insert_resource(GameRng::new(config.seed));
        world.insert_resource(PlayerLives(config.lives));
        world.insert_resource(pickups);
        world.insert_resource(scheduler);
        world.insert_resource(maze);
        world.insert_resource(config);
        world.insert_resource(Score::default());
        world.insert_resource(Level::default());
        world.insert_resource(PlayClock::default());
        world.insert_resource(TickCount::default());
        world.insert_resource(GameStage::default());

        info!(dots = pickups.dots, power = pickups.power, "Game initialized");
        Ok(Game { world, schedule })
    }

    /// Parses a text board and creates a game on it.
    pub fn from_board(board: &[&str], config: GameConfig) -> GameResult<Game> {
        let rows = MapTileParser::parse_board(board)?;
        Self::new(Maze::new(rows)?, config)
    }

    /// Creates a game on the built-in board.
    pub fn from_config(config: GameConfig) -> GameResult<Game> {
        Self::from_board(&RAW_BOARD, config)
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<GameplayEvent>(world);
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        let gameplay = (
            phase_system,
            player_movement_system,
            arbitration_system,
            ghost_movement_system,
            pickup_system,
            arbitration_system,
        )
            .chain()
            .distributive_run_if(is_running);

        schedule.add_systems((command_system, gameplay, stage_system).chain());
    }

    /// Queues a command for the next tick.
    pub fn send(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::from(command));
    }

    pub fn start(&mut self) {
        self.send(GameCommand::Start);
    }

    pub fn toggle_pause(&mut self) {
        self.send(GameCommand::TogglePause);
    }

    pub fn request_direction(&mut self, direction: Direction) {
        self.send(GameCommand::MovePlayer(direction));
    }

    /// Advances the simulation by one tick.
    ///
    /// Returns the gameplay events produced during the tick.
    ///
    /// # Errors
    ///
    /// Returns the first invariant break reported by a system during this tick. Gameplay events
    /// from a failed tick stay queued and are returned by the next successful one.
    pub fn tick(&mut self) -> GameResult<Vec<GameplayEvent>> {
        let tick = {
            let mut count = self.world.resource_mut::<TickCount>();
            count.0 += 1;
            count.0
        };
        formatter::set_tick(tick);

        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Events<GameEvent>>().update();

        let mut errors: Vec<GameError> = self.world.resource_mut::<Events<GameError>>().drain().collect();
        if !errors.is_empty() {
            let pending = self.world.resource::<Events<GameplayEvent>>().len();
            warn!(tick, pending, errors = errors.len(), "Tick failed; keeping gameplay events queued");
            return Err(errors.swap_remove(0));
        }

        Ok(self.world.resource_mut::<Events<GameplayEvent>>().drain().collect())
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn maze(&self) -> &Maze {
        self.world.resource::<Maze>()
    }

    pub fn score(&self) -> Score {
        *self.world.resource::<Score>()
    }

    /// Captures the current state of the round.
    ///
    /// # Errors
    ///
    /// Fails if the player entity is missing.
    pub fn snapshot(&mut self) -> GameResult<Snapshot> {
        let (position, velocity) = self
            .world
            .query_filtered::<(&Position, &Velocity), With<PlayerControlled>>()
            .single(&self.world)
            .map(|(position, velocity)| (*position, *velocity))
            .map_err(|e| GameError::InvalidState(format!("No/multiple player entities: {e}")))?;

        let mut ghosts: Vec<GhostSnapshot> = self
            .world
            .query::<(&Ghost, &Position, &Velocity, &GhostState, &Pursuer)>()
            .iter(&self.world)
            .map(|(ghost, position, velocity, state, pursuer)| GhostSnapshot {
                ghost: *ghost,
                position: *position,
                direction: velocity.direction,
                mode: state.mode(),
                target: pursuer.target,
                color: ghost.color(state.mode()),
            })
            .collect();
        ghosts.sort_by_key(|snapshot| snapshot.ghost);

        let score = self.score();
        Ok(Snapshot {
            stage: self.stage(),
            tick: self.world.resource::<TickCount>().0,
            level: self.world.resource::<Level>().0,
            score: score.current,
            top_score: score.top,
            lives: self.world.resource::<PlayerLives>().0,
            phase: self.world.resource::<PhaseScheduler>().current(),
            player: PlayerSnapshot {
                position,
                direction: velocity.direction,
            },
            ghosts,
        })
    }
}

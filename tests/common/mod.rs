#![allow(dead_code)]

use bevy_ecs::{entity::Entity, query::With, world::World};
use packman::{
    config::GameConfig,
    game::Game,
    map::{builder::Maze, direction::Direction, geometry::Position, parser::MapTileParser},
    systems::{
        components::{BufferedDirection, Ghost, GhostMode, GhostState, PlayerControlled, Velocity},
        state::GameStage,
    },
};

/// A nine-wide ghost pen with its gate at (5, top) and all four ghost spawns inside.
///
/// Appended below the rows of a test board; the base rectangle spans columns 1-7 of the first
/// three pen rows.
pub const PEN: [&str; 4] = ["#++++=++#", "#+1234 +#", "#+++++++#", "#########"];

/// Builds a nine-wide board from `top` rows followed by [`PEN`].
pub fn board(top: &[&'static str]) -> Vec<&'static str> {
    top.iter().copied().chain(PEN).collect()
}

pub fn maze(top: &[&'static str]) -> Maze {
    Maze::new(MapTileParser::parse_board(&board(top)).unwrap()).unwrap()
}

/// Deterministic configuration with no start countdown.
pub fn test_config() -> GameConfig {
    GameConfig {
        seed: Some(42),
        countdown_seconds: 0.0,
        ..GameConfig::default()
    }
}

pub fn game(top: &[&'static str]) -> Game {
    game_with(top, test_config())
}

pub fn game_with(top: &[&'static str], config: GameConfig) -> Game {
    Game::from_board(&board(top), config).unwrap()
}

/// Starts `game` and ticks until the round is running.
pub fn run_until_running(game: &mut Game) {
    game.start();
    for _ in 0..1000 {
        if game.stage() == GameStage::Running {
            return;
        }
        game.tick().unwrap();
    }
    panic!("game never reached the running stage: {:?}", game.stage());
}

/// A game on `top` that is already running.
pub fn running_game(top: &[&'static str]) -> Game {
    let mut game = game(top);
    run_until_running(&mut game);
    game
}

pub fn player_entity(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(world)
        .unwrap()
}

pub fn ghost_entity(world: &mut World, ghost: Ghost) -> Entity {
    world
        .query::<(Entity, &Ghost)>()
        .iter(world)
        .find(|(_, g)| **g == ghost)
        .map(|(entity, _)| entity)
        .unwrap()
}

pub fn place_player(world: &mut World, position: Position, direction: Direction) {
    let entity = player_entity(world);
    let mut player = world.entity_mut(entity);
    *player.get_mut::<Position>().unwrap() = position;
    player.get_mut::<Velocity>().unwrap().direction = direction;
    *player.get_mut::<BufferedDirection>().unwrap() = BufferedDirection::None;
}

pub fn place_ghost(world: &mut World, ghost: Ghost, position: Position, direction: Direction, mode: GhostMode) {
    let entity = ghost_entity(world, ghost);
    let mut ghost = world.entity_mut(entity);
    *ghost.get_mut::<Position>().unwrap() = position;
    ghost.get_mut::<Velocity>().unwrap().direction = direction;
    ghost.get_mut::<GhostState>().unwrap().reset(mode);
}

pub fn player_position(world: &mut World) -> Position {
    let entity = player_entity(world);
    *world.get::<Position>(entity).unwrap()
}

pub fn ghost_position(world: &mut World, ghost: Ghost) -> Position {
    let entity = ghost_entity(world, ghost);
    *world.get::<Position>(entity).unwrap()
}

pub fn ghost_state(world: &mut World, ghost: Ghost) -> GhostState {
    let entity = ghost_entity(world, ghost);
    *world.get::<GhostState>(entity).unwrap()
}

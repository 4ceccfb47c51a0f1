use packman::config::GameConfig;
use packman::events::{GameCommand, GameplayEvent};
use packman::map::{direction::Direction, geometry::Position};
use packman::systems::components::{Ghost, GhostMode};
use packman::systems::state::GameStage;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const CORRIDOR: [&str; 3] = ["#########", "#   X  .#", "#########"];

fn quick_respawn() -> GameConfig {
    GameConfig {
        respawn_delay_seconds: 0.2,
        ..common::test_config()
    }
}

#[test]
fn test_frightened_ghost_is_eaten_once() {
    let mut game = common::running_game(&CORRIDOR);
    common::place_ghost(&mut game.world, Ghost::Blinky, Position::new(3, 1), Direction::Right, GhostMode::Frightened);

    let events = game.tick().unwrap();
    assert_that(&events).contains(GameplayEvent::PursuerEaten {
        ghost: Ghost::Blinky,
        position: Position::new(3, 1),
    });
    assert_eq!(game.score().current, 200);
    assert_eq!(common::ghost_state(&mut game.world, Ghost::Blinky).mode(), GhostMode::Eaten);
    assert_eq!(game.stage(), GameStage::Running);

    // Overlapping an eaten ghost again has no effect.
    let blinky = common::ghost_position(&mut game.world, Ghost::Blinky);
    common::place_player(&mut game.world, blinky, Direction::Still);
    let events = game.tick().unwrap();
    assert_that(&events).does_not_contain(GameplayEvent::PursuerEaten {
        ghost: Ghost::Blinky,
        position: blinky,
    });
    assert_eq!(game.score().current, 200);
    assert_eq!(game.stage(), GameStage::Running);
}

#[test]
fn test_single_overlap_costs_one_life() {
    let mut game = common::game_with(&CORRIDOR, quick_respawn());
    common::run_until_running(&mut game);
    common::place_ghost(&mut game.world, Ghost::Blinky, Position::new(3, 1), Direction::Right, GhostMode::Chase);
    common::place_ghost(&mut game.world, Ghost::Pinky, Position::new(3, 1), Direction::Right, GhostMode::Chase);

    let events = game.tick().unwrap();
    assert_eq!(
        events,
        vec![GameplayEvent::PlayerCaught {
            ghost: Ghost::Blinky,
            lives_left: 2
        }]
    );
    assert_eq!(game.stage(), GameStage::Respawning { remaining_ticks: 1 });
    // The rest of the tick is skipped, so nobody moved after the catch.
    assert_eq!(common::ghost_position(&mut game.world, Ghost::Blinky), Position::new(3, 1));

    game.tick().unwrap();
    assert_eq!(game.stage(), GameStage::Countdown { remaining_ticks: 0 });
    assert_eq!(common::player_position(&mut game.world), Position::new(4, 1));
    assert_eq!(common::ghost_position(&mut game.world, Ghost::Blinky), Position::new(2, 4));
    assert_eq!(common::ghost_state(&mut game.world, Ghost::Blinky).mode(), GhostMode::Scatter);

    game.tick().unwrap();
    assert_eq!(game.stage(), GameStage::Running);
    assert_eq!(game.snapshot().unwrap().lives, 2);
}

#[test]
fn test_ghost_catches_stationary_player() {
    let mut game = common::running_game(&CORRIDOR);
    common::place_player(&mut game.world, Position::new(6, 1), Direction::Still);
    common::place_ghost(&mut game.world, Ghost::Clyde, Position::new(5, 1), Direction::Right, GhostMode::Chase);

    let events = game.tick().unwrap();
    assert_that(&events).contains(GameplayEvent::PlayerCaught {
        ghost: Ghost::Clyde,
        lives_left: 2,
    });
    assert_eq!(common::player_position(&mut game.world), Position::new(6, 1));
    assert_eq!(common::ghost_position(&mut game.world, Ghost::Clyde), Position::new(6, 1));
}

#[test]
fn test_last_life_ends_game() {
    let config = GameConfig {
        lives: 0,
        ..common::test_config()
    };
    let mut game = common::game_with(&CORRIDOR, config);
    common::run_until_running(&mut game);
    game.tick().unwrap();
    let score_before = game.score();
    common::place_ghost(&mut game.world, Ghost::Inky, Position::new(2, 1), Direction::Right, GhostMode::Scatter);

    let events = game.tick().unwrap();
    assert_eq!(
        events,
        vec![
            GameplayEvent::PlayerCaught {
                ghost: Ghost::Inky,
                lives_left: 0
            },
            GameplayEvent::GameOver,
        ]
    );
    assert_eq!(game.stage(), GameStage::GameOver);

    for _ in 0..5 {
        game.tick().unwrap();
    }
    assert_eq!(game.stage(), GameStage::GameOver);

    game.send(GameCommand::Restart);
    let events = game.tick().unwrap();
    assert_that(&events).contains(GameplayEvent::LevelStarted(1));
    assert_eq!(game.stage(), GameStage::AwaitingStart);
    assert_eq!(game.score().current, 0);
    assert_eq!(game.score().top, score_before.top);
    assert_eq!(common::player_position(&mut game.world), Position::new(4, 1));
}

#[test]
fn test_arrest_score_raises_top_score() {
    let mut game = common::running_game(&CORRIDOR);
    common::place_ghost(&mut game.world, Ghost::Pinky, Position::new(3, 1), Direction::Right, GhostMode::Frightened);
    common::place_ghost(&mut game.world, Ghost::Inky, Position::new(3, 1), Direction::Right, GhostMode::Frightened);

    let events = game.tick().unwrap();
    let eaten: Vec<Ghost> = events
        .iter()
        .filter_map(|event| match event {
            GameplayEvent::PursuerEaten { ghost, .. } => Some(*ghost),
            _ => None,
        })
        .collect();
    assert_eq!(eaten, vec![Ghost::Pinky, Ghost::Inky]);
    assert_eq!(game.score().current, 400);
    assert_eq!(game.score().top, 400);
}

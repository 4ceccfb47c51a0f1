use bevy_ecs::{entity::Entity, event::Events, query::With, system::RunSystemOnce, world::World};
use packman::config::GameConfig;
use packman::error::GameError;
use packman::events::GameplayEvent;
use packman::map::{builder::Maze, cell::Cell, geometry::Position};
use packman::systems::components::{GhostMode, GhostState, PickupCount, PlayClock, PlayerControlled, Score};
use packman::systems::item::pickup_system;
use packman::systems::phase::Phase;
use packman::systems::state::GameStage;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const PICKUPS: [&str; 3] = ["#########", "#.X  o .#", "#########"];

fn create_test_world(player: Position) -> World {
    let config = common::test_config();
    let maze = common::maze(&PICKUPS);
    let mut scheduler = config.scheduler().unwrap();
    scheduler.reset(0);

    let mut world = World::new();
    world.insert_resource(maze.count_pickups());
    world.insert_resource(maze);
    world.insert_resource(config);
    world.insert_resource(scheduler);
    world.insert_resource(PlayClock(0));
    world.insert_resource(Score::default());
    world.insert_resource(GameStage::Running);
    world.init_resource::<Events<GameplayEvent>>();
    world.init_resource::<Events<GameError>>();

    world.spawn((PlayerControlled, player));
    world.spawn(GhostState::new(GhostMode::Scatter));
    world.spawn(GhostState::new(GhostMode::Eaten));
    world
}

fn run_pickup(world: &mut World) -> Vec<GameplayEvent> {
    world.run_system_once(pickup_system).expect("System should run successfully");
    world.resource_mut::<Events<GameplayEvent>>().drain().collect()
}

fn ghost_states(world: &mut World) -> Vec<GhostState> {
    world.query::<&GhostState>().iter(world).copied().collect()
}

#[test]
fn test_dot_is_eaten_once() {
    let mut world = create_test_world(Position::new(1, 1));

    let events = run_pickup(&mut world);
    assert_eq!(events, vec![GameplayEvent::DotEaten(Position::new(1, 1))]);
    assert_eq!(world.resource::<Score>().current, 1);
    assert_eq!(*world.resource::<PickupCount>(), PickupCount { dots: 1, power: 1 });

    let events = run_pickup(&mut world);
    assert_that(&events).is_empty();
    assert_eq!(world.resource::<Score>().current, 1);
}

#[test]
fn test_empty_cell_does_nothing() {
    let mut world = create_test_world(Position::new(3, 1));

    assert_that(&run_pickup(&mut world)).is_empty();
    assert_eq!(*world.resource::<Score>(), Score::default());
    assert_eq!(*world.resource::<GameStage>(), GameStage::Running);
}

#[test]
fn test_power_pickup_frightens_every_ghost() {
    let mut world = create_test_world(Position::new(5, 1));

    let events = run_pickup(&mut world);
    assert_eq!(
        events,
        vec![
            GameplayEvent::PowerPickupEaten(Position::new(5, 1)),
            GameplayEvent::PhaseChanged(Phase::Frightened),
        ]
    );

    let states = ghost_states(&mut world);
    assert_that(&states).contains(GhostState::new(GhostMode::Frightened));
    let eaten = states.iter().find(|state| state.is_eaten()).unwrap();
    assert_eq!(eaten.pending(), Some(GhostMode::Frightened));

    let maze = world.resource::<Maze>();
    assert_eq!(maze.cell(Position::new(5, 1)), Cell::Empty);
}

#[test]
fn test_last_pickup_wins_the_round() {
    let mut world = create_test_world(Position::new(1, 1));
    run_pickup(&mut world);

    for position in [Position::new(5, 1), Position::new(7, 1)] {
        let player = world
            .query_filtered::<Entity, With<PlayerControlled>>()
            .single(&world)
            .unwrap();
        *world.get_mut::<Position>(player).unwrap() = position;
        run_pickup(&mut world);
    }

    assert_eq!(*world.resource::<GameStage>(), GameStage::RoundWon);
    assert!(world.resource::<PickupCount>().is_cleared());
}

#[test]
fn test_cleared_counts_win_without_eating() {
    let mut world = create_test_world(Position::new(3, 1));
    world.insert_resource(PickupCount::default());

    assert_eq!(run_pickup(&mut world), vec![GameplayEvent::RoundWon]);
    assert_eq!(*world.resource::<GameStage>(), GameStage::RoundWon);
    assert_eq!(*world.resource::<Score>(), Score::default());
}

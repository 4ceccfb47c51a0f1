use packman::constants::*;
use packman::map::{builder::Maze, geometry::Position, parser::MapTileParser};
use pretty_assertions::assert_eq;

#[test]
fn test_raw_board_structure() {
    assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
    for row in RAW_BOARD.iter() {
        assert_eq!(row.len(), BOARD_CELL_SIZE.x as usize);
    }

    // Boundaries are walled
    assert!(RAW_BOARD[0].chars().all(|c| c == '#'));
    assert!(RAW_BOARD[RAW_BOARD.len() - 1].chars().all(|c| c == '#'));
    for row in RAW_BOARD.iter() {
        assert!(row.starts_with('#') && row.ends_with('#'), "row not walled: {row:?}");
    }
}

#[test]
fn test_raw_board_contains_required_elements() {
    assert!(
        RAW_BOARD.iter().any(|row| row.contains('X')),
        "Board should contain the player spawn"
    );
    assert!(RAW_BOARD.iter().any(|row| row.contains("==")), "Board should contain a gate");
    for spawn in ['1', '2', '3', '4'] {
        assert!(
            RAW_BOARD.iter().any(|row| row.contains(spawn)),
            "Board should contain ghost spawn {spawn}"
        );
    }
}

#[test]
fn test_raw_board_builds_a_maze() {
    let maze = Maze::new(MapTileParser::parse_board(&RAW_BOARD).unwrap()).unwrap();
    let pickups = maze.count_pickups();

    assert_eq!(pickups.dots, 240);
    assert_eq!(pickups.power, 4);
    assert_eq!(maze.spawns().player, Position::new(13, 23));
    assert_eq!(maze.gate_exit(), Position::new(13, 11));
    assert!(maze.base_rect().contains(maze.spawns().blinky));
    assert!(maze.base_rect().contains(maze.spawns().clyde));
}

//! Map parsing functionality for converting character boards into cells.

use crate::error::ParseError;
use crate::map::cell::Cell;
use crate::systems::components::Ghost;

/// Parser for converting raw board layouts into rows of cells.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a cell.
    ///
    /// | char | cell |
    /// |------|------|
    /// | `#` | wall |
    /// | `.` | dot |
    /// | `o` | power pickup |
    /// | ` ` | empty |
    /// | `X` | player spawn |
    /// | `1`-`4` | ghost spawns, in Blinky, Pinky, Inky, Clyde order |
    /// | `=` | gate |
    /// | `+` | base (pen wall) |
    /// | `_` | one-way-up |
    pub fn parse_character(c: char) -> Result<Cell, ParseError> {
        match c {
            '#' => Ok(Cell::Wall),
            '.' => Ok(Cell::Dot),
            'o' => Ok(Cell::PowerPickup),
            ' ' => Ok(Cell::Empty),
            'X' => Ok(Cell::PlayerSpawn),
            '1' => Ok(Cell::GhostSpawn(Ghost::Blinky)),
            '2' => Ok(Cell::GhostSpawn(Ghost::Pinky)),
            '3' => Ok(Cell::GhostSpawn(Ghost::Inky)),
            '4' => Ok(Cell::GhostSpawn(Ghost::Clyde)),
            '=' => Ok(Cell::Gate),
            '+' => Ok(Cell::Base),
            '_' => Ok(Cell::OneWayUp),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into rows of cells.
    ///
    /// Row lengths are not checked here; [`Maze::new`](crate::map::builder::Maze::new) rejects ragged grids.
    ///
    /// # Errors
    ///
    /// Returns an error if the board contains an unknown character.
    pub fn parse_board(raw_board: &[&str]) -> Result<Vec<Vec<Cell>>, ParseError> {
        raw_board
            .iter()
            .map(|line| line.chars().map(Self::parse_character).collect())
            .collect()
    }
}

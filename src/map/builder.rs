//! Maze construction from decoded cells.

use bevy_ecs::resource::Resource;
use tracing::debug;

use crate::error::MapError;
use crate::map::cell::{Cell, Region};
use crate::map::geometry::{Position, Rect};
use crate::systems::components::{Ghost, PickupCount};

/// The starting positions of the five agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPositions {
    pub player: Position,
    pub blinky: Position,
    pub pinky: Position,
    pub inky: Position,
    pub clyde: Position,
}

impl SpawnPositions {
    pub fn ghost(&self, ghost: Ghost) -> Position {
        match ghost {
            Ghost::Blinky => self.blinky,
            Ghost::Pinky => self.pinky,
            Ghost::Inky => self.inky,
            Ghost::Clyde => self.clyde,
        }
    }
}

/// The playing field: a rectangular grid of cells plus the regions and spawns derived from it.
///
/// Shared by every system as a resource. Pickups are cleared from the grid as they are eaten;
/// a pristine copy of the grid is kept so a new level can put them back.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    pristine: Vec<Cell>,
    spawns: SpawnPositions,
    base_rect: Rect,
    gate_rect: Rect,
}

impl Maze {
    /// Builds a maze from rows of decoded cells.
    ///
    /// Spawn cells are recorded and replaced with [`Cell::Empty`], base cells become walls, and
    /// the base and gate rectangles are derived from the cells that carried those types.
    ///
    /// # Errors
    ///
    /// Fails if the grid is empty or ragged, if any of the five spawns is missing or repeated,
    /// or if there are no base or gate cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Maze, MapError> {
        let width = rows.first().map(Vec::len).filter(|w| *w > 0).ok_or(MapError::EmptyGrid)?;
        if let Some((row, found)) = rows.iter().map(Vec::len).enumerate().find(|(_, len)| *len != width) {
            return Err(MapError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        let mut player = None;
        let mut ghosts: [Option<Position>; 4] = [None; 4];
        let mut base = Vec::new();
        let mut gate = Vec::new();

        for (j, row) in rows.into_iter().enumerate() {
            for (i, cell) in row.into_iter().enumerate() {
                let position = Position::new(i as i32, j as i32);
                let stored = match cell {
                    Cell::PlayerSpawn => {
                        record_spawn(&mut player, position, "player")?;
                        Cell::Empty
                    }
                    Cell::GhostSpawn(ghost) => {
                        record_spawn(&mut ghosts[ghost.index()], position, ghost.as_str())?;
                        Cell::Empty
                    }
                    Cell::Base => {
                        base.push(position);
                        Cell::Wall
                    }
                    Cell::Gate => {
                        gate.push(position);
                        Cell::Gate
                    }
                    other => other,
                };
                cells.push(stored);
            }
        }

        let ghost_spawn = |ghost: Ghost| ghosts[ghost.index()].ok_or(MapError::MissingSpawn(ghost.as_str()));
        let spawns = SpawnPositions {
            player: player.ok_or(MapError::MissingSpawn("player"))?,
            blinky: ghost_spawn(Ghost::Blinky)?,
            pinky: ghost_spawn(Ghost::Pinky)?,
            inky: ghost_spawn(Ghost::Inky)?,
            clyde: ghost_spawn(Ghost::Clyde)?,
        };

        let base_rect = Rect::from_positions(base).map_err(|_| MapError::MissingRegion(Region::Base))?;
        let gate_rect = Rect::from_positions(gate).map_err(|_| MapError::MissingRegion(Region::Gate))?;

        debug!(width, height, ?spawns, ?base_rect, ?gate_rect, "Maze constructed");

        Ok(Maze {
            width: width as i32,
            height: height as i32,
            pristine: cells.clone(),
            cells,
            spawns,
            base_rect,
            gate_rect,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The largest valid `i` coordinate.
    pub fn max_i(&self) -> i32 {
        self.width - 1
    }

    /// The largest valid `j` coordinate.
    pub fn max_j(&self) -> i32 {
        self.height - 1
    }

    pub fn spawns(&self) -> &SpawnPositions {
        &self.spawns
    }

    pub fn base_rect(&self) -> Rect {
        self.base_rect
    }

    pub fn gate_rect(&self) -> Rect {
        self.gate_rect
    }

    /// The tile directly above the gate's top-left corner, where ghosts leaving the pen head.
    pub fn gate_exit(&self) -> Position {
        self.gate_rect.top_left().above()
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.i()) && (0..self.height).contains(&position.j())
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| (position.j() * self.width + position.i()) as usize)
    }

    /// Returns the cell at `position`, or `None` outside the grid.
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Returns the cell at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` lies outside the grid.
    pub fn cell(&self, position: Position) -> Cell {
        self.get(position)
            .unwrap_or_else(|| panic!("cell query out of bounds: ({position}) in a {}x{} maze", self.width, self.height))
    }

    /// Overwrites the cell at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` lies outside the grid.
    pub fn set_cell(&mut self, position: Position, cell: Cell) {
        let index = self
            .index(position)
            .unwrap_or_else(|| panic!("cell write out of bounds: ({position}) in a {}x{} maze", self.width, self.height));
        self.cells[index] = cell;
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.cell(position) == Cell::Wall
    }

    /// Counts the dots and power pickups still on the grid.
    pub fn count_pickups(&self) -> PickupCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_pickup())
            .fold(PickupCount::default(), |mut count, cell| {
                match cell {
                    Cell::PowerPickup => count.power += 1,
                    _ => count.dots += 1,
                }
                count
            })
    }

    /// Puts every pickup back where it was when the maze was built.
    pub fn restore_pickups(&mut self) -> PickupCount {
        self.cells.copy_from_slice(&self.pristine);
        self.count_pickups()
    }
}

fn record_spawn(slot: &mut Option<Position>, position: Position, name: &'static str) -> Result<(), MapError> {
    if slot.replace(position).is_some() {
        return Err(MapError::DuplicateSpawn(name));
    }
    Ok(())
}

//! Decoding of colour-coded pixel grids into cells.
//!
//! Image loading and byte-order handling happen outside the core; this module receives one
//! `0xRRGGBB` value per cell (any alpha byte is ignored) and maps it through a [`ColorDictionary`].

use serde::Deserialize;

use crate::error::GameResult;
use crate::map::builder::Maze;
use crate::map::cell::Cell;
use crate::systems::components::Ghost;

const RGB_MASK: u32 = 0x00FF_FFFF;

/// The colour assigned to each cell type in a map image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorDictionary {
    pub wall: u32,
    pub dot: u32,
    pub player: u32,
    pub power_pickup: u32,
    pub blinky: u32,
    pub pinky: u32,
    pub inky: u32,
    pub clyde: u32,
    pub gate: u32,
    pub base: u32,
    pub one_way_up: u32,
}

impl Default for ColorDictionary {
    fn default() -> Self {
        Self {
            wall: 0x00A2E8,
            dot: 0xC3C3C3,
            player: 0xFFF200,
            power_pickup: 0xA349A4,
            blinky: 0xED1C24,
            pinky: 0xFFAEC9,
            inky: 0x99D9EA,
            clyde: 0xFFC90E,
            gate: 0x7F7F7F,
            base: 0xB97A57,
            one_way_up: 0x7092BE,
        }
    }
}

impl ColorDictionary {
    /// Maps a pixel to its cell type; colours not in the dictionary are empty.
    pub fn cell_for(&self, pixel: u32) -> Cell {
        let color = pixel & RGB_MASK;
        let table = [
            (self.wall, Cell::Wall),
            (self.dot, Cell::Dot),
            (self.player, Cell::PlayerSpawn),
            (self.power_pickup, Cell::PowerPickup),
            (self.blinky, Cell::GhostSpawn(Ghost::Blinky)),
            (self.pinky, Cell::GhostSpawn(Ghost::Pinky)),
            (self.inky, Cell::GhostSpawn(Ghost::Inky)),
            (self.clyde, Cell::GhostSpawn(Ghost::Clyde)),
            (self.gate, Cell::Gate),
            (self.base, Cell::Base),
            (self.one_way_up, Cell::OneWayUp),
        ];

        table
            .into_iter()
            .find(|(key, _)| key & RGB_MASK == color)
            .map(|(_, cell)| cell)
            .unwrap_or(Cell::Empty)
    }

    /// Decodes a grid of pixels (one row per slice) into a maze.
    ///
    /// # Errors
    ///
    /// Fails when the resulting cells do not form a valid maze, e.g. a spawn colour is missing.
    pub fn decode<R: AsRef<[u32]>>(&self, pixels: &[R]) -> GameResult<Maze> {
        let rows = pixels
            .iter()
            .map(|row| row.as_ref().iter().map(|pixel| self.cell_for(*pixel)).collect())
            .collect();
        Ok(Maze::new(rows)?)
    }
}

//! This module defines the maze and the grid primitives used to move around it.

pub mod builder;
pub mod cell;
pub mod decoder;
pub mod direction;
pub mod geometry;
pub mod parser;

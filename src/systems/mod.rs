//! The Entity-Component-System (ECS) module.
//!
//! This module contains the components and resources shared by the simulation, and the systems
//! that advance it one tick at a time.

pub mod collision;
pub mod components;
pub mod ghost;
pub mod item;
pub mod phase;
pub mod player;
pub mod state;
pub mod targeting;

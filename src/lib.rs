//! Skirmish - turn-based grid-world micro simulation
//!
//! One player and a handful of enemies share a bounded character grid.
//! Each round the engine resolves collisions, lets enemies act, resolves
//! the player's queued attack and composites a text frame.

pub mod combat;
pub mod command;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod world;

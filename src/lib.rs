//! Idlescape - tick-based survival world simulator
//!
//! Actors follow player-authored behavior graphs, harvest regrowing
//! resources and build from delivered materials. The world catches up in
//! bounded steps after the player has been away.

pub mod behavior;
pub mod command;
pub mod construction;
pub mod core;
pub mod data;
pub mod entity;
pub mod input;
pub mod simulation;
pub mod world;

//! World state, terrain and procedural generation

pub mod generation;
pub mod persistence;
pub mod state;
pub mod terrain;

pub use generation::{generate_world, place_resource};
pub use state::WorldState;
pub use terrain::{TerrainGrid, TerrainType, Tile};

//! # Overworld Model
//!
//! The generated tile grid plus the mutable exploration state layered on
//! top of it: player pixel position, facing, walk speed, minimap mode, and
//! the encounter-rate modifier.

pub mod state;
pub mod tiles;

pub use state::WorldState;
pub use tiles::TileKind;

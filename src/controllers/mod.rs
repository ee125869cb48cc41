//! # Exploration Controllers
//!
//! One controller per explorable space. Each consumes the tick's input,
//! moves the player in pixel space against that space's collision rules,
//! and reports requested scene changes (battles, town/dungeon entry and
//! exit) back to the host through a per-tick update struct.

pub mod dungeon;
pub mod movement;
pub mod town;
pub mod world;

pub use dungeon::{DungeonController, DungeonUpdate};
pub use town::{TownController, TownUpdate};
pub use world::{WorldController, WorldUpdate};

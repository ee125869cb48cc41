//! # Static Content
//!
//! Hand-authored game data: biomes, the hero roster, enemy templates,
//! items, abilities, gear, and the town/dungeon maps. Everything here is
//! read-only; gameplay code looks entries up by id and treats a miss as a
//! warning plus a fallback, never a panic.

pub mod abilities;
pub mod biomes;
pub mod dungeons;
pub mod enemies;
pub mod gear;
pub mod heroes;
pub mod items;
pub mod towns;

//! # Mistheart Core
//!
//! Simulation core for a tile-based RPG. This crate owns everything with
//! real algorithmic content and nothing that draws pixels:
//!
//! - **World Generation**: seeded height-map synthesis, biome sectors,
//!   river carving, town/road placement, and dungeon entrances
//! - **Exploration Controllers**: pixel movement with tile collision and
//!   step-based encounter scheduling for the overworld, towns, and dungeons
//! - **Combat Engine**: a turn-based battle state machine with menus,
//!   targeting, ability/item resolution, and reward distribution
//! - **Party Systems**: derived stats from equipment, leveling math, and
//!   inventory bookkeeping
//!
//! The crate is a library consumed by a UI shell. Rendering, audio, raw
//! device input, and persistence storage live with the host; the core only
//! exposes read-only projections of its state and a serializable save
//! snapshot.
//!
//! All generation is bit-reproducible: a stored 32-bit seed regenerates an
//! identical world, which is how saves avoid persisting the tile grid.

pub mod combat;
pub mod content;
pub mod controllers;
pub mod generation;
pub mod geom;
pub mod input;
pub mod party;
pub mod rng;
pub mod save;
pub mod world;

pub use combat::{BattleEngine, BattleSummary, Battler, CombatEvent, CombatState, Phase, Team};
pub use controllers::{
    DungeonController, DungeonUpdate, TownController, TownUpdate, WorldController, WorldUpdate,
};
pub use generation::{DungeonLayout, DungeonRoom, GeneratedWorld, GenerationOptions, RoomKind};
pub use geom::{Facing, PixelPos, Position};
pub use input::{InputState, Key};
pub use party::{Bag, Hero, StatBlock};
pub use rng::Mulberry32;
pub use save::{GameSave, GameSettings, ResolutionScale, ViewportPreset};
pub use world::{TileKind, WorldState};

/// Core error type for the Mistheart engine.
///
/// Recoverable gameplay refusals (insufficient MP, empty bag slot, dead
/// target) never surface here; they are absorbed at the point of detection
/// and reported through the combat/event log. This type is reserved for
/// i/o, serialization, and content-integrity failures.
#[derive(thiserror::Error, Debug)]
pub enum MistheartError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// A required content table is empty or internally inconsistent.
    /// Indicates a content-authoring bug, expected to fire at load time.
    #[error("Content integrity error: {0}")]
    ContentIntegrity(String),
}

/// Result type used throughout the Mistheart codebase.
pub type MistheartResult<T> = Result<T, MistheartError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Tile edge length in pixels. Controllers move in pixel space and
    /// convert to tile coordinates for collision and triggers.
    pub const TILE_SIZE: f32 = 16.0;

    /// Default overworld width in tiles
    pub const WORLD_MAP_WIDTH: usize = 96;

    /// Default overworld height in tiles
    pub const WORLD_MAP_HEIGHT: usize = 64;

    /// Dungeon entrances placed on a freshly generated overworld
    pub const DEFAULT_DUNGEON_COUNT: usize = 3;

    /// Base overworld walk speed in pixels per second
    pub const BASE_WORLD_SPEED: f32 = 60.0;

    /// Town walk speed in pixels per second
    pub const TOWN_SPEED: f32 = 55.0;

    /// Dungeon walk speed in pixels per second
    pub const DUNGEON_SPEED: f32 = 48.0;

    /// Frames the battle intro banner holds before the first hero acts
    pub const BATTLE_INTRO_FRAMES: u32 = 60;

    /// Frames the victory banner holds before the summary screen
    pub const BATTLE_VICTORY_FRAMES: u32 = 120;

    /// Heroes allowed in the active battle lineup
    pub const MAX_ACTIVE_HEROES: usize = 3;
}

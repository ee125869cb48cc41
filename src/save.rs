//! # Save Snapshots
//!
//! Serializable game snapshots. The world grid never hits the disk: saves
//! store the generation seed and rebuild an identical world on load, so a
//! snapshot stays a few kilobytes of party, bag, and settings data.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::BASE_WORLD_SPEED;
use crate::generation::GenerationOptions;
use crate::geom::PixelPos;
use crate::party::{Bag, Hero};
use crate::world::WorldState;
use crate::MistheartResult;

/// Window scaling mode chosen by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionScale {
    /// Largest integer scale that fits the window
    Fit,
    /// Stretch to fill, ignoring aspect
    Fill,
    X1,
    X2,
    X3,
    X4,
}

impl ResolutionScale {
    /// Fixed integer factor, or `None` for the window-derived modes.
    pub fn factor(self) -> Option<u32> {
        match self {
            ResolutionScale::Fit | ResolutionScale::Fill => None,
            ResolutionScale::X1 => Some(1),
            ResolutionScale::X2 => Some(2),
            ResolutionScale::X3 => Some(3),
            ResolutionScale::X4 => Some(4),
        }
    }
}

/// Visible map area in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportPreset {
    Classic,
    Widescreen,
    Cinematic,
}

impl ViewportPreset {
    /// Viewport size as `(columns, rows)`.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ViewportPreset::Classic => (24, 16),
            ViewportPreset::Widescreen => (32, 18),
            ViewportPreset::Cinematic => (48, 27),
        }
    }
}

/// Player-tunable settings, persisted inside every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Overworld walk speed in pixels per second
    pub world_speed: f32,
    /// Encounter frequency multiplier; above 1 means more battles
    pub encounter_rate: f64,
    pub fullscreen: bool,
    pub resolution_scale: ResolutionScale,
    pub viewport_preset: ViewportPreset,
    /// Random encounters off, confirm-to-fight on
    pub manual_encounters: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            world_speed: BASE_WORLD_SPEED,
            encounter_rate: 1.0,
            fullscreen: false,
            resolution_scale: ResolutionScale::Fit,
            viewport_preset: ViewportPreset::Classic,
            manual_encounters: false,
        }
    }
}

/// One complete save snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSave {
    /// Unix milliseconds at capture time, for save-slot listings
    pub timestamp: u64,
    pub seed: u32,
    pub player: PixelPos,
    pub minimap_mode: u8,
    pub heroes: Vec<Hero>,
    pub bag: Bag,
    pub settings: GameSettings,
}

impl GameSave {
    /// Snapshots the current run.
    pub fn capture(
        world: &WorldState,
        heroes: &[Hero],
        bag: &Bag,
        settings: &GameSettings,
    ) -> Self {
        Self {
            timestamp: now_millis(),
            seed: world.world.seed,
            player: world.player_px,
            minimap_mode: world.minimap_mode,
            heroes: heroes.to_vec(),
            bag: bag.clone(),
            settings: settings.clone(),
        }
    }

    pub fn to_json(&self) -> MistheartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot, treating malformed or truncated text as a missing
    /// save rather than an error the player has to act on.
    pub fn from_json(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(save) => Some(save),
            Err(err) => {
                warn!("discarding unreadable save: {err}");
                None
            }
        }
    }

    /// Rebuilds the world from the stored seed and re-applies the mutable
    /// exploration state on top.
    pub fn restore_world(&self, width: usize, height: usize) -> WorldState {
        let opts = GenerationOptions {
            seed: Some(self.seed),
            dungeon_count: None,
        };
        let mut world = WorldState::generate(width, height, &opts);
        world.player_px = self.player;
        world.minimap_mode = self.minimap_mode;
        world.speed = self.settings.world_speed;
        world.encounter_modifier = self.settings.encounter_rate;
        world
    }
}

fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! # World State
//!
//! Owns the generated overworld and the player's position on it. The world
//! is regenerated from its seed on load, so only the seed and the mutable
//! player fields appear in save data.

use log::info;

use crate::config::BASE_WORLD_SPEED;
use crate::content::biomes::{get_biome, BiomeConfig};
use crate::generation::{generate_world, GeneratedWorld, GenerationOptions};
use crate::geom::{Facing, PixelPos, Position};
use crate::world::TileKind;

/// The overworld plus exploration state.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub world: GeneratedWorld,
    /// Player position in pixels, for sub-tile movement
    pub player_px: PixelPos,
    pub player_facing: Facing,
    pub player_moving: bool,
    /// Accumulated walk-animation clock in seconds
    pub player_anim_time: f32,
    /// Current walk speed in pixels per second
    pub speed: f32,
    /// Minimap display mode, cycled through three zoom levels by the map key
    pub minimap_mode: u8,
    /// Scales encounter frequency. Values above 1 shorten the step range;
    /// zero and below are treated as 1.
    pub encounter_modifier: f64,
}

impl WorldState {
    /// Generates a fresh world and spawns the player at the first town.
    pub fn generate(width: usize, height: usize, opts: &GenerationOptions) -> Self {
        Self::from_generated(generate_world(width, height, opts))
    }

    /// Wraps an already generated world. Used on save load, where the grid
    /// comes from re-running generation with the stored seed.
    pub fn from_generated(world: GeneratedWorld) -> Self {
        let spawn = spawn_point(&world);
        info!("player spawn at tile ({}, {})", spawn.x, spawn.y);
        Self {
            world,
            player_px: PixelPos::from_tile(spawn),
            player_facing: Facing::Down,
            player_moving: false,
            player_anim_time: 0.0,
            speed: BASE_WORLD_SPEED,
            minimap_mode: 0,
            encounter_modifier: 1.0,
        }
    }

    pub fn width(&self) -> usize {
        self.world.width()
    }

    pub fn height(&self) -> usize {
        self.world.height()
    }

    pub fn tile_at(&self, pos: Position) -> Option<TileKind> {
        crate::generation::tile_at(&self.world.tiles, pos)
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        crate::generation::is_walkable_at(&self.world.tiles, pos)
    }

    /// Tile currently under the player's top-left pixel.
    pub fn player_tile(&self) -> Position {
        self.player_px.to_tile()
    }

    pub fn player_at(&self, pos: Position) -> bool {
        self.player_tile() == pos
    }

    /// Biome under a tile, falling back to the map origin and then the
    /// first table entry for out-of-range lookups.
    pub fn biome_at_tile(&self, tile: Position) -> &'static BiomeConfig {
        let id = self
            .world
            .biome_map
            .get(tile.y as usize)
            .and_then(|row| row.get(tile.x as usize))
            .or_else(|| self.world.biome_map.first().and_then(|row| row.first()))
            .copied()
            .unwrap_or(crate::content::biomes::BIOMES[0].id);
        get_biome(id)
    }

    pub fn biome_name_at_player(&self) -> &'static str {
        self.biome_at_tile(self.player_tile()).name
    }

    /// Step range for the next encounter roll, scaled by the encounter
    /// modifier and floored. Never drops below one step.
    pub fn encounter_range(&self) -> (u32, u32) {
        let biome = self.biome_at_tile(self.player_tile());
        let (min, max) = biome.encounter_steps;
        let modifier = if self.encounter_modifier <= 0.0 {
            1.0
        } else {
            self.encounter_modifier
        };
        let scale = |steps: u32| ((f64::from(steps) / modifier).floor() as u32).max(1);
        (scale(min), scale(max))
    }

    /// Cycles the minimap through its three zoom levels.
    pub fn cycle_minimap(&mut self) {
        self.minimap_mode = (self.minimap_mode + 1) % 3;
    }

    /// Moves the player to a tile, pixel-aligned to its top-left corner.
    pub fn place_player_at_tile(&mut self, tile: Position) {
        self.player_px = PixelPos::from_tile(tile);
    }
}

/// Spawn tile for a fresh world: the first town in row scan order, then the
/// walkable tile nearest the map center, then the origin.
fn spawn_point(world: &GeneratedWorld) -> Position {
    for (y, row) in world.tiles.iter().enumerate() {
        for (x, &kind) in row.iter().enumerate() {
            if kind == TileKind::Town {
                return Position::new(x as i32, y as i32);
            }
        }
    }
    let center = Position::new(world.width() as i32 / 2, world.height() as i32 / 2);
    let limit = world.width().max(world.height()) as i32;
    for radius in 0..=limit {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let pos = Position::new(center.x + dx, center.y + dy);
                if crate::generation::is_walkable_at(&world.tiles, pos) {
                    return pos;
                }
            }
        }
    }
    Position::new(0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;

    fn small_world(seed: u32) -> WorldState {
        WorldState::generate(
            48,
            32,
            &GenerationOptions {
                seed: Some(seed),
                dungeon_count: Some(1),
            },
        )
    }

    #[test]
    fn test_spawns_on_first_town() {
        let state = small_world(42);
        let tile = state.player_tile();
        assert_eq!(state.tile_at(tile), Some(TileKind::Town));
        // Row scan order: no town appears earlier in the grid.
        'outer: for (y, row) in state.world.tiles.iter().enumerate() {
            for (x, &kind) in row.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                if pos == tile {
                    break 'outer;
                }
                assert_ne!(kind, TileKind::Town);
            }
        }
    }

    #[test]
    fn test_player_px_aligns_to_tile() {
        let state = small_world(7);
        let tile = state.player_tile();
        assert_eq!(state.player_px.x, tile.x as f32 * TILE_SIZE);
        assert_eq!(state.player_px.y, tile.y as f32 * TILE_SIZE);
    }

    #[test]
    fn test_encounter_range_respects_modifier() {
        let mut state = small_world(9);
        let (base_min, base_max) = state.encounter_range();
        assert!(base_min >= 1 && base_min <= base_max);

        state.encounter_modifier = 2.0;
        let (min, max) = state.encounter_range();
        assert!(min <= base_min && max <= base_max);
        assert!(min >= 1);

        // Zero and negative modifiers act as 1.
        state.encounter_modifier = 0.0;
        assert_eq!(state.encounter_range(), (base_min, base_max));
        state.encounter_modifier = -3.0;
        assert_eq!(state.encounter_range(), (base_min, base_max));
    }

    #[test]
    fn test_minimap_mode_cycles() {
        let mut state = small_world(3);
        assert_eq!(state.minimap_mode, 0);
        for expected in [1, 2, 0, 1, 2] {
            state.cycle_minimap();
            assert_eq!(state.minimap_mode, expected);
        }
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let state = small_world(5);
        assert!(!state.is_walkable(Position::new(-1, 0)));
        assert!(!state.is_walkable(Position::new(0, -1)));
        assert!(!state.is_walkable(Position::new(48, 0)));
    }
}

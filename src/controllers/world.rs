//! # World Controller
//!
//! Overworld exploration: pixel movement over the generated tile grid,
//! step-counted random encounters, and the confirm-key interactions that
//! hand control to a town, a dungeon, or a battle.

use log::{debug, warn};

use crate::config::TILE_SIZE;
use crate::content::dungeons::{all_dungeons, default_dungeon, DungeonDefinition};
use crate::content::towns::{all_towns, TownDefinition};
use crate::controllers::movement;
use crate::input::{InputState, Key};
use crate::rng::Mulberry32;
use crate::world::{TileKind, WorldState};

/// What an overworld tick asked the host to do.
#[derive(Debug, Default)]
pub struct WorldUpdate {
    /// A random encounter fired this tick
    pub battle: bool,
    /// Confirm was pressed with no interaction under it while manual
    /// encounters are on
    pub manual_battle: bool,
    pub entered_town: Option<&'static TownDefinition>,
    pub entered_dungeon: Option<&'static DungeonDefinition>,
    pub equip_toggled: bool,
    pub shop_toggled: bool,
}

/// Drives the player across the overworld. Owns the encounter RNG so a
/// seeded controller replays the same encounter schedule.
#[derive(Debug, Clone)]
pub struct WorldController {
    rng: Mulberry32,
    steps_until_encounter: u32,
    step_pixels: f32,
    /// When set, random encounters stop and confirm on open ground
    /// requests a battle instead
    pub manual_encounters: bool,
}

impl WorldController {
    pub fn new(rng: Mulberry32, world: &WorldState) -> Self {
        let mut controller = Self {
            rng,
            steps_until_encounter: 0,
            step_pixels: 0.0,
            manual_encounters: false,
        };
        controller.roll_encounter(world);
        controller
    }

    /// Steps remaining before the next random encounter.
    pub fn steps_until_encounter(&self) -> u32 {
        self.steps_until_encounter
    }

    /// Re-rolls the step count from the biome under the player.
    pub fn roll_encounter(&mut self, world: &WorldState) {
        let (min, max) = world.encounter_range();
        self.steps_until_encounter = self.rng.range_inclusive(min, max);
        self.step_pixels = 0.0;
        debug!(
            "next encounter in {} steps ({})",
            self.steps_until_encounter,
            world.biome_name_at_player()
        );
    }

    /// Advances the overworld by `dt` seconds of held input and consumes
    /// this tick's pressed edges.
    pub fn update(&mut self, world: &mut WorldState, input: &mut InputState, dt: f32) -> WorldUpdate {
        let mut update = WorldUpdate::default();

        if input.consume(Key::Minimap) {
            world.cycle_minimap();
        }
        if input.consume(Key::Equip) {
            update.equip_toggled = true;
        }
        if input.consume(Key::Shop) {
            update.shop_toggled = true;
        }

        let (vx, vy) = movement::direction(input);
        world.player_facing = movement::facing_for(vx, vy, world.player_facing);
        world.player_moving = vx != 0.0 || vy != 0.0;
        if world.player_moving {
            world.player_anim_time += dt;
            let max_x = (world.width() as f32 - 1.0) * TILE_SIZE;
            let max_y = (world.height() as f32 - 1.0) * TILE_SIZE;
            let tiles = &world.world.tiles;
            let (mx, my) = movement::slide_move(
                &mut world.player_px,
                vx * world.speed * dt,
                vy * world.speed * dt,
                max_x,
                max_y,
                |pos| crate::generation::is_walkable_at(tiles, pos),
            );
            self.step_pixels += mx.abs() + my.abs();
            while self.step_pixels >= TILE_SIZE {
                self.step_pixels -= TILE_SIZE;
                if !self.manual_encounters && self.consume_step() {
                    update.battle = true;
                    self.roll_encounter(world);
                }
            }
        } else {
            world.player_anim_time = 0.0;
        }

        if input.consume(Key::Confirm) {
            self.interact(world, &mut update);
        }
        update
    }

    /// Decrements the step counter; true when an encounter fires.
    fn consume_step(&mut self) -> bool {
        self.steps_until_encounter = self.steps_until_encounter.saturating_sub(1);
        self.steps_until_encounter == 0
    }

    fn interact(&mut self, world: &WorldState, update: &mut WorldUpdate) {
        let tile = world.player_tile();
        match world.tile_at(tile) {
            Some(TileKind::Town) => {
                update.entered_town = town_for_marker(world, tile);
            }
            Some(TileKind::DungeonEntrance) => {
                update.entered_dungeon = Some(dungeon_for_entrance(world, tile));
            }
            _ => {
                if self.manual_encounters {
                    update.manual_battle = true;
                }
            }
        }
    }
}

/// Town map for an overworld marker: markers map onto the registry by
/// placement index, wrapping when the world holds more towns than maps.
fn town_for_marker(world: &WorldState, tile: crate::geom::Position) -> Option<&'static TownDefinition> {
    let towns = all_towns();
    if towns.is_empty() {
        return None;
    }
    let idx = world.world.towns.iter().position(|&t| t == tile)?;
    Some(&towns[idx % towns.len()])
}

/// Dungeon map for an entrance, falling back to the default map when the
/// entrance index has no authored counterpart.
fn dungeon_for_entrance(
    world: &WorldState,
    tile: crate::geom::Position,
) -> &'static DungeonDefinition {
    let idx = world
        .world
        .dungeons
        .iter()
        .position(|d| d.entrance == tile);
    match idx.and_then(|i| all_dungeons().get(i)) {
        Some(dungeon) => dungeon,
        None => {
            warn!("no authored map for entrance at ({}, {})", tile.x, tile.y);
            default_dungeon()
        }
    }
}

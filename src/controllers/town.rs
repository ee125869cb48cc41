//! # Town Controller
//!
//! In-town exploration: foot-point collision so the sprite can walk behind
//! roofs, NPC dialogue on the faced tile, and exit tiles that return the
//! player to the overworld.

use crate::config::{TILE_SIZE, TOWN_SPEED};
use crate::content::towns::TownDefinition;
use crate::controllers::movement;
use crate::geom::{Facing, PixelPos, Position};
use crate::input::{InputState, Key};

/// What a town tick asked the host to do.
#[derive(Debug, Default)]
pub struct TownUpdate {
    /// The player confirmed on an exit tile and leaves town
    pub exited: bool,
}

/// Drives the player inside one town map.
#[derive(Debug)]
pub struct TownController {
    town: &'static TownDefinition,
    pub player_px: PixelPos,
    pub facing: Facing,
    pub moving: bool,
    pub anim_time: f32,
    /// Open dialogue text; movement is blocked while set
    pub dialogue: Option<String>,
}

impl TownController {
    pub fn new(town: &'static TownDefinition) -> Self {
        Self {
            town,
            player_px: PixelPos::from_tile(town.spawn),
            facing: Facing::Down,
            moving: false,
            anim_time: 0.0,
            dialogue: None,
        }
    }

    pub fn town(&self) -> &'static TownDefinition {
        self.town
    }

    /// Tile under the player's feet; the head may overlap blocked tiles.
    pub fn foot_tile(&self) -> Position {
        movement::foot_tile(self.player_px)
    }

    pub fn update(&mut self, input: &mut InputState, dt: f32) -> TownUpdate {
        let mut update = TownUpdate::default();

        if self.dialogue.is_some() {
            if input.consume(Key::Confirm) || input.consume(Key::Cancel) {
                self.dialogue = None;
            }
            self.moving = false;
            self.anim_time = 0.0;
            return update;
        }

        let (vx, vy) = movement::direction(input);
        self.facing = movement::facing_for(vx, vy, self.facing);
        self.moving = vx != 0.0 || vy != 0.0;
        if self.moving {
            self.anim_time += dt;
            self.step(vx * TOWN_SPEED * dt, vy * TOWN_SPEED * dt);
        } else {
            self.anim_time = 0.0;
        }

        if input.consume(Key::Confirm) {
            let foot = self.foot_tile();
            if self.town.exits.contains(&foot) {
                update.exited = true;
            } else if let Some(npc) = self.town.npc_at(self.faced_tile()) {
                self.dialogue = Some(npc.dialog.join("\n"));
            }
        }
        if input.consume(Key::Cancel) {
            self.dialogue = None;
        }
        update
    }

    /// Moves both axes in one test against the foot point.
    fn step(&mut self, dx: f32, dy: f32) {
        let max_x = self.town.width() as f32 * TILE_SIZE - TILE_SIZE;
        let max_y = self.town.height() as f32 * TILE_SIZE - TILE_SIZE;
        let next = PixelPos::new(
            (self.player_px.x + dx).clamp(0.0, max_x),
            (self.player_px.y + dy).clamp(0.0, max_y),
        );
        if self.town.is_walkable(movement::foot_tile(next)) {
            self.player_px = next;
        }
    }

    /// Tile one step ahead of the feet in the current facing.
    fn faced_tile(&self) -> Position {
        let foot = self.foot_tile();
        let (dx, dy) = self.facing.delta();
        Position::new(foot.x + dx, foot.y + dy)
    }
}

//! # Dungeon Controller
//!
//! Dungeon exploration: corner collision against walls and hazards,
//! step-counted encounters from the dungeon's own pacing range, and exit
//! tiles that surface back to the overworld.

use log::debug;

use crate::config::{DUNGEON_SPEED, TILE_SIZE};
use crate::content::dungeons::DungeonDefinition;
use crate::controllers::movement;
use crate::geom::{Facing, PixelPos};
use crate::input::{InputState, Key};
use crate::rng::Mulberry32;

/// What a dungeon tick asked the host to do.
#[derive(Debug, Default)]
pub struct DungeonUpdate {
    /// The player confirmed on an exit tile and leaves the dungeon
    pub exited: bool,
    /// A random encounter fired this tick
    pub battle: bool,
    /// Confirm was pressed off an exit while manual encounters are on
    pub manual_battle: bool,
}

/// Drives the player inside one dungeon map.
#[derive(Debug)]
pub struct DungeonController {
    dungeon: &'static DungeonDefinition,
    rng: Mulberry32,
    pub player_px: PixelPos,
    pub facing: Facing,
    pub moving: bool,
    pub anim_time: f32,
    steps_until_encounter: u32,
    step_pixels: f32,
    pub manual_encounters: bool,
}

impl DungeonController {
    pub fn new(dungeon: &'static DungeonDefinition, rng: Mulberry32) -> Self {
        let mut controller = Self {
            dungeon,
            rng,
            player_px: PixelPos::from_tile(dungeon.spawn),
            facing: Facing::Down,
            moving: false,
            anim_time: 0.0,
            steps_until_encounter: 0,
            step_pixels: 0.0,
            manual_encounters: false,
        };
        controller.roll_encounter();
        controller
    }

    pub fn dungeon(&self) -> &'static DungeonDefinition {
        self.dungeon
    }

    pub fn steps_until_encounter(&self) -> u32 {
        self.steps_until_encounter
    }

    /// Battle-background hint for encounters rolled inside this dungeon.
    pub fn tile_type(&self) -> u8 {
        self.dungeon.tile_type
    }

    /// Re-rolls the step count from the dungeon's pacing range.
    pub fn roll_encounter(&mut self) {
        let (min, max) = self.dungeon.encounter_steps;
        self.steps_until_encounter = self.rng.range_inclusive(min, max);
        self.step_pixels = 0.0;
        debug!(
            "{}: next encounter in {} steps",
            self.dungeon.id, self.steps_until_encounter
        );
    }

    pub fn update(&mut self, input: &mut InputState, dt: f32) -> DungeonUpdate {
        let mut update = DungeonUpdate::default();

        // Confirm is read before movement so a tap on the exit row cannot
        // slide past the exit tile in the same frame.
        if input.consume(Key::Confirm) {
            if self
                .dungeon
                .exits
                .contains(&movement::foot_tile(self.player_px))
            {
                update.exited = true;
                return update;
            }
            if self.manual_encounters {
                update.manual_battle = true;
            }
        }

        let (vx, vy) = movement::direction(input);
        self.facing = movement::facing_for(vx, vy, self.facing);
        self.moving = vx != 0.0 || vy != 0.0;
        if self.moving {
            self.anim_time += dt;
            let max_x = self.dungeon.width() as f32 * TILE_SIZE - TILE_SIZE;
            let max_y = self.dungeon.height() as f32 * TILE_SIZE - TILE_SIZE;
            let dungeon = self.dungeon;
            let (mx, my) = movement::slide_move(
                &mut self.player_px,
                vx * DUNGEON_SPEED * dt,
                vy * DUNGEON_SPEED * dt,
                max_x,
                max_y,
                |pos| dungeon.is_walkable(pos),
            );
            self.step_pixels += mx.abs() + my.abs();
            while self.step_pixels >= TILE_SIZE {
                self.step_pixels -= TILE_SIZE;
                if !self.manual_encounters && self.consume_step() {
                    update.battle = true;
                    self.roll_encounter();
                }
            }
        } else {
            self.anim_time = 0.0;
        }
        update
    }

    fn consume_step(&mut self) -> bool {
        self.steps_until_encounter = self.steps_until_encounter.saturating_sub(1);
        self.steps_until_encounter == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::dungeons::default_dungeon;

    fn press(controller: &mut DungeonController, key: Key) -> DungeonUpdate {
        let mut input = InputState::new();
        input.press(key);
        controller.update(&mut input, 1.0 / 60.0)
    }

    #[test]
    fn test_spawns_on_dungeon_spawn() {
        let controller = DungeonController::new(default_dungeon(), Mulberry32::new(1));
        assert_eq!(controller.player_px.to_tile(), default_dungeon().spawn);
        let (min, max) = default_dungeon().encounter_steps;
        let steps = controller.steps_until_encounter();
        assert!(steps >= min && steps <= max);
    }

    #[test]
    fn test_walls_block_corners() {
        let mut controller = DungeonController::new(default_dungeon(), Mulberry32::new(1));
        // The spawn sits below the top wall; pushing up must stop the sprite
        // with all corners still on walkable tiles.
        for _ in 0..600 {
            press(&mut controller, Key::Up);
        }
        let px = controller.player_px;
        assert!(movement::corners_walkable(px.x, px.y, |pos| {
            default_dungeon().is_walkable(pos)
        }));
        assert!(px.y > 0.0);
    }

    #[test]
    fn test_walking_triggers_encounters() {
        let mut controller = DungeonController::new(default_dungeon(), Mulberry32::new(5));
        // Shuttle along the open corridor at the spawn row.
        let mut battles = 0;
        for _ in 0..60 {
            for key in [Key::Left, Key::Right] {
                for _ in 0..30 {
                    if press(&mut controller, key).battle {
                        battles += 1;
                    }
                }
            }
        }
        assert!(battles >= 1);
        assert!(controller.steps_until_encounter() >= 1);
    }

    #[test]
    fn test_confirm_on_exit_row_leaves() {
        let dungeon = default_dungeon();
        let mut controller = DungeonController::new(dungeon, Mulberry32::new(1));
        controller.player_px = PixelPos::from_tile(dungeon.exits[0]);
        let update = press(&mut controller, Key::Confirm);
        assert!(update.exited);
    }

    #[test]
    fn test_manual_battle_off_exit() {
        let mut controller = DungeonController::new(default_dungeon(), Mulberry32::new(1));
        let update = press(&mut controller, Key::Confirm);
        assert!(!update.exited);
        assert!(!update.manual_battle);

        controller.manual_encounters = true;
        let update = press(&mut controller, Key::Confirm);
        assert!(update.manual_battle);
    }
}

//! Shared pixel-movement helpers for the exploration controllers.
//!
//! The player sprite occupies one tile of pixels. Solid-map collision tests
//! the four corners of a slightly inset hitbox so the sprite can brush past
//! walls; town collision tests a single "foot" point near the bottom center
//! so the sprite's head may overlap roofs and trees.

use crate::config::TILE_SIZE;
use crate::geom::{Facing, PixelPos, Position};
use crate::input::{InputState, Key};

/// Hitbox inset in pixels on each side.
const HITBOX_INSET: f32 = 2.0;

/// Vertical offset of the foot probe from the sprite top.
const FOOT_OFFSET: f32 = 14.0;

/// Movement intent from the held direction keys, as a unit-axis vector.
pub fn direction(input: &InputState) -> (f32, f32) {
    let mut vx = 0.0;
    let mut vy = 0.0;
    if input.is_held(Key::Left) {
        vx -= 1.0;
    }
    if input.is_held(Key::Right) {
        vx += 1.0;
    }
    if input.is_held(Key::Up) {
        vy -= 1.0;
    }
    if input.is_held(Key::Down) {
        vy += 1.0;
    }
    (vx, vy)
}

/// Facing for a movement vector. Vertical wins ties so the sprite faces
/// up/down on diagonals; a zero vector keeps the current facing.
pub fn facing_for(vx: f32, vy: f32, current: Facing) -> Facing {
    if vy.abs() >= vx.abs() && vy != 0.0 {
        if vy < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    } else if vx != 0.0 {
        if vx < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    } else {
        current
    }
}

/// True when all four inset corners of a sprite at `(x, y)` stand on
/// walkable tiles.
pub fn corners_walkable(x: f32, y: f32, walkable: impl Fn(Position) -> bool) -> bool {
    let near = HITBOX_INSET;
    let far = TILE_SIZE - 1.0 - HITBOX_INSET;
    [(near, near), (far, near), (near, far), (far, far)]
        .into_iter()
        .all(|(dx, dy)| walkable(PixelPos::new(x + dx, y + dy).to_tile()))
}

/// Tile under the sprite's foot point.
pub fn foot_tile(px: PixelPos) -> Position {
    PixelPos::new(px.x + TILE_SIZE / 2.0, px.y + FOOT_OFFSET).to_tile()
}

/// Moves one axis at a time against a corner-tested solid map, so sliding
/// along a wall keeps the free axis. Returns the pixels actually moved.
pub fn slide_move(
    px: &mut PixelPos,
    dx: f32,
    dy: f32,
    max_x: f32,
    max_y: f32,
    walkable: impl Fn(Position) -> bool,
) -> (f32, f32) {
    let mut moved = (0.0, 0.0);
    if dx != 0.0 {
        let next = (px.x + dx).clamp(0.0, max_x);
        if corners_walkable(next, px.y, &walkable) {
            moved.0 = next - px.x;
            px.x = next;
        }
    }
    if dy != 0.0 {
        let next = (px.y + dy).clamp(0.0, max_y);
        if corners_walkable(px.x, next, &walkable) {
            moved.1 = next - px.y;
            px.y = next;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_held_keys() {
        let mut input = InputState::new();
        input.press(Key::Right);
        input.press(Key::Up);
        assert_eq!(direction(&input), (1.0, -1.0));
        input.release(Key::Right);
        assert_eq!(direction(&input), (0.0, -1.0));
    }

    #[test]
    fn test_facing_prefers_vertical() {
        assert_eq!(facing_for(1.0, 1.0, Facing::Left), Facing::Down);
        assert_eq!(facing_for(1.0, -1.0, Facing::Left), Facing::Up);
        assert_eq!(facing_for(1.0, 0.0, Facing::Up), Facing::Right);
        // No movement keeps the current facing.
        assert_eq!(facing_for(0.0, 0.0, Facing::Left), Facing::Left);
    }

    #[test]
    fn test_corners_respect_inset() {
        // Walkable only inside tile (1, 1); the inset allows a 2px overhang.
        let walkable = |pos: Position| pos == Position::new(1, 1);
        assert!(corners_walkable(16.0, 16.0, walkable));
        assert!(corners_walkable(17.9, 16.0, walkable));
        assert!(!corners_walkable(19.0, 16.0, walkable));
    }

    #[test]
    fn test_slide_keeps_free_axis() {
        // Row y=1 walkable everywhere, column x=3 blocked.
        let walkable = |pos: Position| pos.y == 1 && pos.x < 3;
        let mut px = PixelPos::new(16.0, 16.0);
        let moved = slide_move(&mut px, 40.0, 8.0, 200.0, 200.0, walkable);
        // X stops against the wall (rejected wholesale), Y rejected off-row.
        assert_eq!(moved, (0.0, 0.0));
        let moved = slide_move(&mut px, 4.0, 0.0, 200.0, 200.0, walkable);
        assert_eq!(moved.0, 4.0);
        assert_eq!(px.x, 20.0);
    }

    #[test]
    fn test_foot_tile_is_bottom_center() {
        let px = PixelPos::new(32.0, 32.0);
        assert_eq!(foot_tile(px), Position::new(2, 2));
        // A sprite straddling rows resolves to the row under its feet.
        let px = PixelPos::new(32.0, 26.0);
        assert_eq!(foot_tile(px), Position::new(2, 2));
    }
}

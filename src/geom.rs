//! # Geometry Primitives
//!
//! Tile coordinates, pixel coordinates, and cardinal facing shared by the
//! generator, the exploration controllers, and the save snapshot.

use crate::config::TILE_SIZE;
use serde::{Deserialize, Serialize};

/// A tile coordinate on a grid. Signed so neighbor arithmetic can step off
/// the map edge without wrapping; bounds checks happen at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The four cardinal neighbors, in N/E/S/W order.
    pub fn cardinal_neighbors(&self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y),
        ]
    }

    /// True when the position lies on the border of a `width`×`height` grid.
    pub fn on_edge(&self, width: usize, height: usize) -> bool {
        self.x == 0 || self.y == 0 || self.x == width as i32 - 1 || self.y == height as i32 - 1
    }
}

/// Sub-tile pixel position for smooth movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pixel position of a tile's top-left corner.
    pub fn from_tile(tile: Position) -> Self {
        Self {
            x: tile.x as f32 * TILE_SIZE,
            y: tile.y as f32 * TILE_SIZE,
        }
    }

    /// Tile containing this pixel.
    pub fn to_tile(self) -> Position {
        Position::new(
            (self.x / TILE_SIZE).floor() as i32,
            (self.y / TILE_SIZE).floor() as i32,
        )
    }
}

/// Cardinal facing for the player sprite and NPC lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit tile step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

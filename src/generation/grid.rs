//! # Grid Queries
//!
//! Walkability and reachability helpers shared by the placement passes.
//! Reachability is "can you walk from here to any map edge", which keeps
//! towns and dungeon entrances out of terrain pockets sealed off by water
//! or mountains.

use crate::geom::Position;
use crate::rng::Mulberry32;
use crate::world::TileKind;
use pathfinding::prelude::bfs;

/// Tile grid in `[row][col]` order.
pub type TileGrid = Vec<Vec<TileKind>>;

/// Tile kind at a position, if it is in bounds.
pub fn tile_at(tiles: &TileGrid, pos: Position) -> Option<TileKind> {
    if pos.x < 0 || pos.y < 0 {
        return None;
    }
    tiles
        .get(pos.y as usize)
        .and_then(|row| row.get(pos.x as usize))
        .copied()
}

/// True when the position is in bounds and its kind is walkable.
pub fn is_walkable_at(tiles: &TileGrid, pos: Position) -> bool {
    tile_at(tiles, pos).is_some_and(TileKind::is_walkable)
}

/// Breadth-first reachability from `start` to any map edge over walkable
/// tiles. Placement passes require this so every town and entrance is
/// connected to the wider world.
pub fn has_path_to_edge(tiles: &TileGrid, start: Position) -> bool {
    if !is_walkable_at(tiles, start) {
        return false;
    }
    let height = tiles.len();
    let width = tiles.first().map_or(0, Vec::len);
    bfs(
        &start,
        |p| {
            p.cardinal_neighbors()
                .into_iter()
                .filter(|n| is_walkable_at(tiles, *n))
                .collect::<Vec<_>>()
        },
        |p| p.on_edge(width, height),
    )
    .is_some()
}

/// Searches for a walkable, edge-reachable tile: bounded random sampling
/// first, then an exhaustive row scan. Returns `None` only on pathological
/// maps with no qualifying tile at all.
pub fn find_accessible_tile(tiles: &TileGrid, rng: &mut Mulberry32) -> Option<Position> {
    let height = tiles.len();
    let width = tiles.first().map_or(0, Vec::len);
    for _ in 0..400 {
        let x = rng.index(width) as i32;
        let y = rng.index(height) as i32;
        let pos = Position::new(x, y);
        if is_walkable_at(tiles, pos) && has_path_to_edge(tiles, pos) {
            return Some(pos);
        }
    }
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Position::new(x, y);
            if is_walkable_at(tiles, pos) && has_path_to_edge(tiles, pos) {
                return Some(pos);
            }
        }
    }
    None
}

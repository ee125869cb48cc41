//! # River Carving
//!
//! Rivers start on high ground and walk downhill, flooding what they pass.
//! Settlement markers survive a crossing; the road network is re-linked
//! afterwards to repair any severed links.

use crate::geom::Position;
use crate::rng::Mulberry32;
use crate::world::TileKind;

use super::grid::TileGrid;
use super::heightmap::HeightMap;

const SOURCE_ATTEMPTS: usize = 300;
const SOURCE_MIN_HEIGHT: f64 = 0.75;
const EDGE_MARGIN: i32 = 2;

/// Number of rivers scaled to map area, never fewer than two.
pub fn river_count(width: usize, height: usize) -> usize {
    ((width * height) / 2000).max(2)
}

/// Carves every river for the map. Each river needs a high-ground source;
/// a cramped or flat map may yield fewer rivers than requested.
pub fn carve_rivers(tiles: &mut TileGrid, heights: &HeightMap, rng: &mut Mulberry32) {
    let height = tiles.len();
    let width = tiles.first().map_or(0, Vec::len);
    for _ in 0..river_count(width, height) {
        if let Some(source) = find_source(heights, rng, width, height) {
            dig_river(tiles, heights, rng, source);
        }
    }
}

fn find_source(
    heights: &HeightMap,
    rng: &mut Mulberry32,
    width: usize,
    height: usize,
) -> Option<Position> {
    for _ in 0..SOURCE_ATTEMPTS {
        let x = rng.index(width);
        let y = rng.index(height);
        if heights[y][x] > SOURCE_MIN_HEIGHT {
            return Some(Position::new(x as i32, y as i32));
        }
    }
    None
}

/// Greedy downhill walk from the source. On a plateau (no lower neighbor)
/// the river picks a random direction instead of stopping, so it still
/// reaches open ground. The walk ends near the map edge or after a bounded
/// number of steps.
fn dig_river(tiles: &mut TileGrid, heights: &HeightMap, rng: &mut Mulberry32, source: Position) {
    let height = tiles.len() as i32;
    let width = tiles.first().map_or(0, Vec::len) as i32;
    let max_steps = (width + height) as usize;
    let mut current = source;

    for _ in 0..max_steps {
        flood(tiles, current);
        if current.x < EDGE_MARGIN
            || current.y < EDGE_MARGIN
            || current.x >= width - EDGE_MARGIN
            || current.y >= height - EDGE_MARGIN
        {
            break;
        }
        let neighbors = current.cardinal_neighbors();
        let mut next = None;
        let mut lowest = heights[current.y as usize][current.x as usize];
        for n in neighbors {
            if n.x < 0 || n.y < 0 || n.x >= width || n.y >= height {
                continue;
            }
            let h = heights[n.y as usize][n.x as usize];
            if h < lowest {
                lowest = h;
                next = Some(n);
            }
        }
        current = match next {
            Some(n) => n,
            // Plateau: one rng draw picks an arbitrary direction.
            None => neighbors[rng.index(4)],
        };
        if current.x < 0 || current.y < 0 || current.x >= width || current.y >= height {
            break;
        }
    }
}

fn flood(tiles: &mut TileGrid, pos: Position) {
    let cell = &mut tiles[pos.y as usize][pos.x as usize];
    if !cell.is_river_protected() {
        *cell = TileKind::Water;
    }
}

//! # Towns, Roads, and Fields
//!
//! Settlement passes of the world pipeline: scatter towns across a 3×3
//! region grid, link them all with roads, and grow tilled fields around
//! each town so settlements read as lived-in.

use crate::geom::Position;
use crate::rng::Mulberry32;
use crate::world::TileKind;
use pathfinding::prelude::bfs;

use super::grid::{has_path_to_edge, tile_at, TileGrid};

const REGIONS: i32 = 3;
const TOWNS_PER_REGION: usize = 2;
const MIN_TOWN_SEPARATION: i32 = 6;
const PLACEMENT_ATTEMPTS: usize = 300;

/// Places up to two towns per map region, marking their tiles, and returns
/// the placements in placement order.
pub fn place_region_towns(tiles: &mut TileGrid, rng: &mut Mulberry32) -> Vec<Position> {
    let height = tiles.len() as i32;
    let width = tiles.first().map_or(0, Vec::len) as i32;
    let region_w = width / REGIONS;
    let region_h = height / REGIONS;
    let mut towns = Vec::new();

    for ry in 0..REGIONS {
        for rx in 0..REGIONS {
            let start_x = rx * region_w;
            let end_x = if rx == REGIONS - 1 {
                width - 1
            } else {
                (rx + 1) * region_w - 1
            };
            let start_y = ry * region_h;
            let end_y = if ry == REGIONS - 1 {
                height - 1
            } else {
                (ry + 1) * region_h - 1
            };
            for _ in 0..TOWNS_PER_REGION {
                if let Some(spot) =
                    find_town_spot(tiles, rng, &towns, (start_x, end_x), (start_y, end_y))
                {
                    tiles[spot.y as usize][spot.x as usize] = TileKind::Town;
                    towns.push(spot);
                }
            }
        }
    }
    towns
}

fn find_town_spot(
    tiles: &TileGrid,
    rng: &mut Mulberry32,
    placed: &[Position],
    (start_x, end_x): (i32, i32),
    (start_y, end_y): (i32, i32),
) -> Option<Position> {
    let width = tiles.first().map_or(0, Vec::len) as i32;
    let height = tiles.len() as i32;
    let qualifies = |tiles: &TileGrid, pos: Position| {
        is_town_candidate(tiles, pos)
            && has_path_to_edge(tiles, pos)
            && placed
                .iter()
                .all(|p| p.manhattan_distance(pos) >= MIN_TOWN_SEPARATION)
    };

    for _ in 0..PLACEMENT_ATTEMPTS {
        let span_x = (end_x - start_x + 1).max(1);
        let span_y = (end_y - start_y + 1).max(1);
        let x = (start_x + (rng.next_f64() * f64::from(span_x)) as i32).clamp(0, width - 1);
        let y = (start_y + (rng.next_f64() * f64::from(span_y)) as i32).clamp(0, height - 1);
        let pos = Position::new(x, y);
        if qualifies(tiles, pos) {
            return Some(pos);
        }
    }
    // Random sampling found nothing; scan the region deterministically.
    for y in start_y..=end_y {
        for x in start_x..=end_x {
            let pos = Position::new(x, y);
            if qualifies(tiles, pos) {
                return Some(pos);
            }
        }
    }
    None
}

fn is_town_candidate(tiles: &TileGrid, pos: Position) -> bool {
    let settleable = |kind: TileKind| kind.is_settleable() || kind == TileKind::Field;
    if !tile_at(tiles, pos).is_some_and(settleable) {
        return false;
    }
    pos.cardinal_neighbors().into_iter().any(|n| {
        tile_at(tiles, n).is_some_and(|kind| settleable(kind) || kind == TileKind::Road)
    })
}

/// Connects every town to the network by repeatedly linking the closest
/// unconnected town to the connected set, carving each link as road.
/// Re-run after river carving to restore any flooded crossings.
pub fn connect_town_network(tiles: &mut TileGrid, towns: &[Position]) {
    if towns.len() < 2 {
        return;
    }
    let mut connected = vec![towns[0]];
    let mut remaining: Vec<Position> = towns[1..].to_vec();

    while !remaining.is_empty() {
        let mut best = (connected[0], 0usize, i32::MAX);
        for a in &connected {
            for (idx, b) in remaining.iter().enumerate() {
                let dist = a.manhattan_distance(*b);
                if dist < best.2 {
                    best = (*a, idx, dist);
                }
            }
        }
        let target = remaining.remove(best.1);
        carve_road(tiles, best.0, target);
        connected.push(target);
    }
}

/// Carves a shortest road between two towns over passable ground (anything
/// but water and mountain). Endpoints keep their town marker.
fn carve_road(tiles: &mut TileGrid, from: Position, to: Position) {
    let passable = |pos: Position| {
        tile_at(tiles, pos)
            .is_some_and(|kind| !matches!(kind, TileKind::Water | TileKind::Mountain))
    };
    let Some(path) = bfs(
        &from,
        |p| {
            p.cardinal_neighbors()
                .into_iter()
                .filter(|n| passable(*n))
                .collect::<Vec<_>>()
        },
        |p| *p == to,
    ) else {
        return;
    };
    for pos in path {
        let cell = &mut tiles[pos.y as usize][pos.x as usize];
        if *cell != TileKind::Town {
            *cell = TileKind::Road;
        }
    }
}

/// Converts ground around each town into tilled fields with a probability
/// that falls off with Manhattan distance from the town tile.
pub fn grow_fields_near_towns(tiles: &mut TileGrid, towns: &[Position], rng: &mut Mulberry32) {
    let height = tiles.len() as i32;
    let width = tiles.first().map_or(0, Vec::len) as i32;
    for town in towns {
        let radius = 3 + rng.index(2) as i32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let x = town.x + dx;
                let y = town.y + dy;
                if x < 0 || y < 0 || x >= width || y >= height || (dx == 0 && dy == 0) {
                    continue;
                }
                if !tiles[y as usize][x as usize].is_settleable() {
                    continue;
                }
                let distance = dx.abs() + dy.abs();
                let falloff = match distance {
                    0..=1 => 0.9,
                    2 => 0.7,
                    _ => 0.45,
                };
                if rng.chance(falloff) {
                    tiles[y as usize][x as usize] = TileKind::Field;
                }
            }
        }
    }
}

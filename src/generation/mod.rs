//! # World Generation
//!
//! Seeded overworld synthesis. One `Mulberry32` stream drives every random
//! decision, and the passes always run in the same order, so a seed fully
//! determines the world:
//!
//! 1. Height map (pure function of the seed, no stream draws)
//! 2. Sector biome assignment
//! 3. Per-tile terrain classification, row-major
//! 4. Dungeon entrance placement and room graphs
//! 5. Town placement and the first road network
//! 6. River carving
//! 7. Road repair after flooding, then field growth
//! 8. Forest-edge and river-bank masks (no stream draws)
//!
//! Reordering these passes, or adding a draw inside one, silently changes
//! every world generated from existing save seeds.

pub mod grid;
pub mod heightmap;
pub mod masks;
pub mod rivers;
pub mod settlements;

use log::{debug, info};
use serde::Serialize;

use crate::content::biomes::{BiomeId, BIOMES};
use crate::geom::Position;
use crate::rng::{clock_seed, Mulberry32};
use crate::world::TileKind;

pub use grid::{find_accessible_tile, has_path_to_edge, is_walkable_at, tile_at, TileGrid};
pub use heightmap::{create_height_map, HeightMap};
pub use masks::MaskGrid;

/// What a dungeon room is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Battle,
    Event,
    Rest,
    /// Always the final room of a layout
    Boss,
}

/// One node of a dungeon's room graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DungeonRoom {
    pub id: String,
    pub kind: RoomKind,
    /// Ids of rooms reachable from this one. Symmetric.
    pub connections: Vec<String>,
}

/// A dungeon stamped onto the overworld: its entrance tile, the biome it
/// inherits from that tile, and a small room graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DungeonLayout {
    pub id: String,
    pub biome: BiomeId,
    pub entrance: Position,
    pub rooms: Vec<DungeonRoom>,
}

/// Knobs for [`generate_world`]. All fields default: a wall-clock seed and
/// the standard dungeon count.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// World seed. `None` draws one from the wall clock; text seeds should
    /// be folded with [`crate::rng::fold_text_seed`] first.
    pub seed: Option<u32>,
    pub dungeon_count: Option<usize>,
}

/// Everything generation produces. Saves persist only `seed`; the rest is
/// regenerated on load.
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    pub seed: u32,
    pub tiles: TileGrid,
    pub biome_map: Vec<Vec<BiomeId>>,
    pub dungeons: Vec<DungeonLayout>,
    pub towns: Vec<Position>,
    pub forest_edges: MaskGrid,
    pub river_banks: MaskGrid,
}

impl GeneratedWorld {
    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }
}

/// Generates a `width`×`height` overworld.
pub fn generate_world(width: usize, height: usize, opts: &GenerationOptions) -> GeneratedWorld {
    let seed = opts.seed.unwrap_or_else(clock_seed);
    let mut rng = Mulberry32::new(seed);
    info!("generating {width}x{height} world from seed {seed}");

    let heights = create_height_map(width, height, seed);
    let sector_biomes = assign_sector_biomes(width, height, &mut rng);

    let mut tiles: TileGrid = Vec::with_capacity(height);
    let mut biome_map: Vec<Vec<BiomeId>> = Vec::with_capacity(height);
    for y in 0..height {
        let mut tile_row = Vec::with_capacity(width);
        let mut biome_row = Vec::with_capacity(width);
        for x in 0..width {
            biome_row.push(sector_biomes.biome_at(x, y));
            tile_row.push(tile_from_height(heights[y][x], &mut rng));
        }
        tiles.push(tile_row);
        biome_map.push(biome_row);
    }

    let dungeon_count = opts.dungeon_count.unwrap_or(crate::config::DEFAULT_DUNGEON_COUNT);
    let dungeons: Vec<DungeonLayout> = (0..dungeon_count)
        .map(|i| make_dungeon(format!("dng-{i}"), &mut tiles, &biome_map, &mut rng))
        .collect();

    let towns = settlements::place_region_towns(&mut tiles, &mut rng);
    settlements::connect_town_network(&mut tiles, &towns);
    rivers::carve_rivers(&mut tiles, &heights, &mut rng);
    // Rivers may flood road tiles; relink so every town stays reachable.
    settlements::connect_town_network(&mut tiles, &towns);
    settlements::grow_fields_near_towns(&mut tiles, &towns, &mut rng);

    let forest_edges = masks::forest_edge_masks(&tiles);
    let river_banks = masks::river_bank_masks(&tiles);

    debug!(
        "world ready: {} towns, {} dungeons",
        towns.len(),
        dungeons.len()
    );
    GeneratedWorld {
        seed,
        tiles,
        biome_map,
        dungeons,
        towns,
        forest_edges,
        river_banks,
    }
}

struct SectorBiomes {
    grid: Vec<Vec<BiomeId>>,
    sector_w: usize,
    sector_h: usize,
}

impl SectorBiomes {
    fn biome_at(&self, x: usize, y: usize) -> BiomeId {
        let cols = self.grid.first().map_or(1, Vec::len);
        let rows = self.grid.len();
        let sc = (x / self.sector_w).min(cols - 1);
        let sr = (y / self.sector_h).min(rows - 1);
        self.grid[sr][sc]
    }
}

/// Splits the map into roughly 4×4-tile sectors and draws one biome per
/// sector, row-major.
fn assign_sector_biomes(width: usize, height: usize, rng: &mut Mulberry32) -> SectorBiomes {
    let sector_cols = (width / 4).max(1);
    let sector_rows = (height / 4).max(1);
    let sector_w = (width / sector_cols).max(1);
    let sector_h = (height / sector_rows).max(1);
    let grid = (0..sector_rows)
        .map(|_| {
            (0..sector_cols)
                .map(|_| BIOMES[rng.index(BIOMES.len())].id)
                .collect()
        })
        .collect();
    SectorBiomes {
        grid,
        sector_w,
        sector_h,
    }
}

/// Classifies one tile from its elevation. Draw count depends on the
/// elevation band, so classification must stay row-major to be stable.
pub fn tile_from_height(h: f64, rng: &mut Mulberry32) -> TileKind {
    if h < 0.25 {
        return TileKind::Water;
    }
    if h < 0.32 {
        return TileKind::Plain;
    }
    if h > 0.78 {
        return TileKind::Mountain;
    }
    if h > 0.65 {
        return if rng.chance(0.5) {
            TileKind::Mountain
        } else {
            TileKind::AltPlain
        };
    }
    if h > 0.4 && rng.chance(0.35) {
        return TileKind::Forest;
    }
    if rng.chance(0.15) {
        TileKind::AltPlain
    } else {
        TileKind::Plain
    }
}

/// Stamps one dungeon: an edge-reachable entrance tile (map center on
/// pathological maps) and a linear room chain with at most one extra edge.
fn make_dungeon(
    id: String,
    tiles: &mut TileGrid,
    biome_map: &[Vec<BiomeId>],
    rng: &mut Mulberry32,
) -> DungeonLayout {
    let height = tiles.len();
    let width = tiles.first().map_or(0, Vec::len);
    let entrance = find_accessible_tile(tiles, rng)
        .unwrap_or_else(|| Position::new(width as i32 / 2, height as i32 / 2));
    let biome = biome_map
        .get(entrance.y as usize)
        .and_then(|row| row.get(entrance.x as usize))
        .copied()
        .unwrap_or(BIOMES[0].id);
    tiles[entrance.y as usize][entrance.x as usize] = TileKind::DungeonEntrance;

    let room_count = 4 + rng.index(3);
    let mut rooms: Vec<DungeonRoom> = (0..room_count)
        .map(|i| DungeonRoom {
            id: format!("{id}-room-{i}"),
            kind: [RoomKind::Battle, RoomKind::Event, RoomKind::Rest][rng.index(3)],
            connections: Vec::new(),
        })
        .collect();
    rooms[room_count - 1].kind = RoomKind::Boss;

    for i in 1..rooms.len() {
        let (left, right) = rooms.split_at_mut(i);
        let prev = &mut left[i - 1];
        let next = &mut right[0];
        prev.connections.push(next.id.clone());
        next.connections.push(prev.id.clone());
    }
    if rooms.len() >= 4 {
        let a = rng.index(rooms.len());
        let b = rng.index(rooms.len());
        if a != b && !rooms[a].connections.contains(&rooms[b].id) {
            let (a_id, b_id) = (rooms[a].id.clone(), rooms[b].id.clone());
            rooms[a].connections.push(b_id);
            rooms[b].connections.push(a_id);
        }
    }

    DungeonLayout {
        id,
        biome,
        entrance,
        rooms,
    }
}

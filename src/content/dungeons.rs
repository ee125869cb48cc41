//! Dungeon maps, authored as ASCII templates. Unknown glyphs parse as
//! floor so sketched templates stay loadable while being drawn up.

use std::sync::OnceLock;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::geom::Position;

/// Dungeon tile legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DungeonTile {
    Floor = 0,
    Wall = 1,
    /// Walk-blocking scenery such as fungal pits
    Hazard = 2,
    Exit = 3,
}

impl DungeonTile {
    pub fn is_walkable(self) -> bool {
        matches!(self, DungeonTile::Floor | DungeonTile::Exit)
    }
}

/// One authored dungeon map.
#[derive(Debug, Clone)]
pub struct DungeonDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub biome_name: &'static str,
    pub description: &'static str,
    pub tiles: Vec<Vec<DungeonTile>>,
    pub spawn: Position,
    pub exits: Vec<Position>,
    /// `[min, max]` steps between random encounters inside
    pub encounter_steps: (u32, u32),
    /// Battle-background hint passed to the encounter factory
    pub tile_type: u8,
}

impl DungeonDefinition {
    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile_at(&self, pos: Position) -> Option<DungeonTile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some_and(DungeonTile::is_walkable)
    }
}

fn glyph_tile(glyph: char) -> DungeonTile {
    match glyph {
        '#' | 'M' | 'P' => DungeonTile::Wall,
        '~' | 'f' | 'L' => DungeonTile::Hazard,
        '>' | 'S' => DungeonTile::Exit,
        _ => DungeonTile::Floor,
    }
}

/// Parses a template, collecting exit tiles as they are encountered.
pub fn parse_dungeon_template(template: &[&str]) -> (Vec<Vec<DungeonTile>>, Vec<Position>) {
    let mut tiles = Vec::with_capacity(template.len());
    let mut exits = Vec::new();
    for (y, row) in template.iter().enumerate() {
        let mut line = Vec::with_capacity(row.len());
        for (x, glyph) in row.chars().enumerate() {
            let tile = glyph_tile(glyph);
            if tile == DungeonTile::Exit {
                exits.push(Position::new(x as i32, y as i32));
            }
            line.push(tile);
        }
        tiles.push(line);
    }
    (tiles, exits)
}

const GLOOMHOLLOW_TEMPLATE: &[&str] = &[
    "############################",
    "#............##...........##",
    "#..####......##......####.##",
    "#..#..#..............#..#.##",
    "#..#..################..#.##",
    "#..#......#........#....#.##",
    "#..######.#...F...#.####.#.#",
    "#........#...F...#......#.##",
    "#.######.#...F...#.######.##",
    "#.#....#.#...F...#.#....#.##",
    "#.#.##.#.#...F...#.#.##.#.##",
    "#.#....#.#...F...#.#....#.##",
    "#.######.#...F...#.######.##",
    "#........#...F...#........##",
    "#..######.#...F...#.####..##",
    "#..#......#...F...#....#..##",
    "#..#..####.fffff.####..#..##",
    "#..#..#............#..#..###",
    "#..####......##......####.##",
    "#............##............#",
    "#>>>>>>>>>>>>>>>>>>>>>>>>>>#",
    "############################",
];

fn build_dungeons() -> Vec<DungeonDefinition> {
    let (tiles, exits) = parse_dungeon_template(GLOOMHOLLOW_TEMPLATE);
    vec![DungeonDefinition {
        id: "gloomhollow",
        name: "Gloomhollow Sink",
        biome_name: "Subterranean",
        description: "First breach beneath the Mistheart Spire, cool caverns lit by fungal bloom.",
        tiles,
        spawn: Position::new(12, 2),
        exits,
        encounter_steps: (3, 8),
        tile_type: 5,
    }]
}

static DUNGEONS: OnceLock<Vec<DungeonDefinition>> = OnceLock::new();

/// All dungeons in registry order; overworld entrances map onto this list
/// by index.
pub fn all_dungeons() -> &'static [DungeonDefinition] {
    DUNGEONS.get_or_init(build_dungeons)
}

/// The dungeon used when an entrance has no matching authored map.
pub fn default_dungeon() -> &'static DungeonDefinition {
    &all_dungeons()[0]
}

pub fn get_dungeon(id: &str) -> Option<&'static DungeonDefinition> {
    let found = all_dungeons().iter().find(|d| d.id == id);
    if found.is_none() {
        warn!("unknown dungeon id {id:?}");
    }
    found
}

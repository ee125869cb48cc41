//! Town maps, authored as ASCII templates and parsed once on first use.
//!
//! Template glyphs map to the numeric town tile palette; short rows are
//! padded with their last glyph so authors can trim trailing border
//! characters. Exits are every road tile on the bottom template row.

use std::sync::OnceLock;

use log::warn;

use crate::geom::{Facing, Position};

/// Town tile palette. Values below 10 reuse the overworld legend numbers;
/// 10 is the townhouse roof.
pub const TOWN_GRASS: u8 = 1;
pub const TOWN_FOREST: u8 = 5;
pub const TOWN_ROAD: u8 = 6;
pub const TOWN_FIELD: u8 = 9;
pub const TOWN_HOUSE: u8 = 10;

/// A townsperson standing on a fixed tile.
#[derive(Debug, Clone)]
pub struct TownNpc {
    pub id: &'static str,
    pub name: &'static str,
    pub pos: Position,
    pub facing: Facing,
    pub dialog: &'static [&'static str],
}

/// One parsed town map.
#[derive(Debug, Clone)]
pub struct TownDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub biome_name: &'static str,
    pub description: &'static str,
    pub tiles: Vec<Vec<u8>>,
    pub spawn: Position,
    pub exits: Vec<Position>,
    pub npcs: Vec<TownNpc>,
}

impl TownDefinition {
    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    /// Grass, alternate ground, and road are walkable; exit tiles are
    /// walkable regardless of their glyph.
    pub fn is_walkable(&self, pos: Position) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let Some(&tile) = self
            .tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
        else {
            return false;
        };
        tile == 0 || tile == TOWN_GRASS || tile == TOWN_ROAD || self.exits.contains(&pos)
    }

    pub fn npc_at(&self, pos: Position) -> Option<&TownNpc> {
        self.npcs.iter().find(|npc| npc.pos == pos)
    }
}

/// Maps a template glyph to a town tile; unknown glyphs become grass.
fn glyph_tile(glyph: char) -> u8 {
    match glyph {
        'F' | 'M' => TOWN_FOREST,
        'G' => TOWN_GRASS,
        '=' => TOWN_FIELD,
        'R' => TOWN_ROAD,
        'H' => TOWN_HOUSE,
        _ => TOWN_GRASS,
    }
}

/// Parses a template into a rectangular tile grid plus the exit tiles on
/// the bottom row. Rows shorter than the first are padded with their last
/// glyph.
fn parse_town_template(template: &[&str]) -> (Vec<Vec<u8>>, Vec<Position>) {
    let width = template.first().map_or(0, |row| row.chars().count());
    let normalized: Vec<Vec<char>> = template
        .iter()
        .map(|row| {
            let mut chars: Vec<char> = row.chars().collect();
            let filler = *chars.last().unwrap_or(&'F');
            while chars.len() < width {
                chars.push(filler);
            }
            chars.truncate(width);
            chars
        })
        .collect();

    let tiles: Vec<Vec<u8>> = normalized
        .iter()
        .map(|row| row.iter().map(|&c| glyph_tile(c)).collect())
        .collect();

    let exit_row = normalized.len().saturating_sub(1);
    let exits = normalized
        .last()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(_, &c)| c == 'R')
                .map(|(x, _)| Position::new(x as i32, exit_row as i32))
                .collect()
        })
        .unwrap_or_default();
    (tiles, exits)
}

const FOGWOOD_TEMPLATE: &[&str] = &[
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
    "FGGGGGGGGGGGGGGGGGGGGGGGGGGGGGF",
    "FGGGGGGGGGGGGGGGGGGGGGGGGGGGGGF",
    "FGGG======GGGGGGGGGGGGGG======GF",
    "FGGG======GGRRRRRRRRGG======GGF",
    "FGGGGGGGGGGRRRRRRRRRGGGGGGGGGF",
    "FGGGGGGGGGRRHHHHRRRGGGGGGGGGGF",
    "FGGGGGGGGGRRHHHHRRRGGGGGGGGGGF",
    "FGGGGGGRRRRRRRRRRRRRRRRRGGGGGF",
    "FGGGGGRRHHHHGGRRGGHHHHRRGGGGGF",
    "FGGGGGRRHHHHGGRRGGHHHHRRGGGGGF",
    "FGGGGGGRRRRRRRRRRRRRRRRRGGGGGF",
    "FGGGGGGGGGRRHHHHRRRGGGGGGGGGGF",
    "FGGGGGGGGGGRRRRRRRGGGGGGGGGGGF",
    "FGGGGG====GRRRRRRRG====GGGGGGF",
    "FGGGGG====GRRRRRRRG====GGGGGGF",
    "FGGGGGGGGGGGGGRRRRGGGGGGGGGGGF",
    "FFFFFFFFFFFFFFRRRFFFFFFFFFFFFFF",
];

const EMBERFALL_TEMPLATE: &[&str] = &[
    "MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM",
    "MGGGGGGGGGGGGGGGGGGGGGGGGGGGGGM",
    "MGGGGGGGGGGGGGGGGGGGGGGGGGGGGGM",
    "MGGGGG====GGGRRRRGGG====GGGGGGM",
    "MGGGGG====GGGRRRRGGG====GGGGGGM",
    "MGGGGGGGGGGGRRRRGGGGGGGGGGGGGM",
    "MGGGGGGGGGRRHHHHRRRGGGGGGGGGGM",
    "MGGGGGGGGGRRHHHHRRRGGGGGGGGGGM",
    "MGGGGGGRRRRRRRRRRRRRRRGGGGGGGM",
    "MGGGGGRRHHHRRHHRRHHHRRRGGGGGGM",
    "MGGGGGRRHHHRRHHRRHHHRRRGGGGGGM",
    "MGGGGGGRRRRRRRRRRRRRRRGGGGGGGM",
    "MGGGGGGGGGRRHHHHRRRGGGGGGGGGGM",
    "MGGGGGGGGGGGRRRRGGGGGGGGGGGGGM",
    "MGGGGG====GGGRRRRGGG====GGGGGGM",
    "MGGGGG====GGGRRRRGGG====GGGGGGM",
    "MGGGGGGGGGGGGRRRRGGGGGGGGGGGGM",
    "MMMMMMMMMMMMMMRRRMMMMMMMMMMMMMM",
];

fn build_towns() -> Vec<TownDefinition> {
    let (fogwood_tiles, fogwood_exits) = parse_town_template(FOGWOOD_TEMPLATE);
    let (emberfall_tiles, emberfall_exits) = parse_town_template(EMBERFALL_TEMPLATE);
    vec![
        TownDefinition {
            id: "fogwood",
            name: "Fogwood Watch",
            biome_name: "Fogwood Ward",
            description:
                "Gate town built into the treeline, first refuge outside the Ironpeak foothills.",
            tiles: fogwood_tiles,
            spawn: Position::new(16, 12),
            exits: fogwood_exits,
            npcs: vec![
                TownNpc {
                    id: "elder-marla",
                    name: "Elder Marla",
                    pos: Position::new(14, 9),
                    facing: Facing::Right,
                    dialog: &[
                        "Marla: The Mist presses closer each night.",
                        "Marla: Bring any Mist shards to the chapel brazier.",
                    ],
                },
                TownNpc {
                    id: "quartermaster",
                    name: "Quartermaster Venn",
                    pos: Position::new(19, 10),
                    facing: Facing::Left,
                    dialog: &[
                        "Venn: Gear up before you march north.",
                        "Venn: Our scouts swap field rations for mistling cores.",
                    ],
                },
                TownNpc {
                    id: "scout-rowan",
                    name: "Scout Rowan",
                    pos: Position::new(16, 15),
                    facing: Facing::Down,
                    dialog: &[
                        "Rowan: Press Enter near the south gate to step back onto the overworld.",
                        "Rowan: Stick to the roads if the party is hurting.",
                    ],
                },
            ],
        },
        TownDefinition {
            id: "emberfall",
            name: "Emberfall Crossing",
            biome_name: "Ashen Barrens",
            description:
                "Charcoal forges hugging the lava gullies; mercs refuel here before riding the firebreak.",
            tiles: emberfall_tiles,
            spawn: Position::new(16, 12),
            exits: emberfall_exits,
            npcs: vec![
                TownNpc {
                    id: "foreman-dask",
                    name: "Foreman Dask",
                    pos: Position::new(12, 9),
                    facing: Facing::Right,
                    dialog: &[
                        "Dask: Rivers run orange beyond the ridge.",
                        "Dask: Bring basalt cores if you expect fresh blades.",
                    ],
                },
                TownNpc {
                    id: "smith-jorra",
                    name: "Smith Jorra",
                    pos: Position::new(18, 9),
                    facing: Facing::Left,
                    dialog: &[
                        "Jorra: Emberfall hammers never cool.",
                        "Jorra: I'll swap ore for surplus mist shards.",
                    ],
                },
                TownNpc {
                    id: "scout-haldrin",
                    name: "Scout Haldrin",
                    pos: Position::new(16, 15),
                    facing: Facing::Down,
                    dialog: &[
                        "Haldrin: Take the south gate to return to the wastes.",
                        "Haldrin: Watch for molten fissures, they crack without warning.",
                    ],
                },
            ],
        },
    ]
}

static TOWNS: OnceLock<Vec<TownDefinition>> = OnceLock::new();

/// All towns in registry order. The order matters: overworld town markers
/// map onto this list by index.
pub fn all_towns() -> &'static [TownDefinition] {
    TOWNS.get_or_init(build_towns)
}

pub fn get_town(id: &str) -> Option<&'static TownDefinition> {
    let found = all_towns().iter().find(|t| t.id == id);
    if found.is_none() {
        warn!("unknown town id {id:?}");
    }
    found
}

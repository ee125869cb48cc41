//! # Biome Registry
//!
//! Named terrain regions with a render palette and encounter-frequency
//! tuning. Biome identity never affects walkability; it colors tiles and
//! scales how often the step counter rolls a battle.

use log::warn;
use serde::Serialize;

/// Stable biome identifier, stored per tile in the generated biome grid.
pub type BiomeId = &'static str;

/// Tile colors for one biome, as CSS-style hex strings the renderer
/// resolves. The core treats them as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BiomePalette {
    pub ground: &'static str,
    pub alternate: &'static str,
    pub water: &'static str,
    pub mountain: &'static str,
}

/// One entry of the biome table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BiomeConfig {
    pub id: BiomeId,
    pub name: &'static str,
    pub palette: BiomePalette,
    /// `[min, max]` steps between random encounters inside this biome
    pub encounter_steps: (u32, u32),
    /// Enemy ids that show up here (hint for the encounter factory)
    pub encounter_table: &'static [&'static str],
}

/// The full biome table, in generation-draw order.
pub const BIOMES: &[BiomeConfig] = &[
    BiomeConfig {
        id: "foothills",
        name: "Ironpeak Foothills",
        palette: BiomePalette {
            ground: "#6AA84F",
            alternate: "#38761D",
            water: "#4A86E8",
            mountain: "#A6A6A6",
        },
        encounter_steps: (2, 20),
        encounter_table: &["mistling", "shambler"],
    },
    BiomeConfig {
        id: "ashen",
        name: "Ashen Barrens",
        palette: BiomePalette {
            ground: "#8E695C",
            alternate: "#5C4033",
            water: "#5E7E9A",
            mountain: "#3A2F2A",
        },
        encounter_steps: (3, 18),
        encounter_table: &["shambler", "fog-wraith"],
    },
    BiomeConfig {
        id: "mire",
        name: "Verdigris Mire",
        palette: BiomePalette {
            ground: "#3C6E47",
            alternate: "#1F4F2F",
            water: "#2E4053",
            mountain: "#6B6E70",
        },
        encounter_steps: (1, 14),
        encounter_table: &["mistling", "hollow-knight"],
    },
];

/// Looks up a biome by id, falling back to the first table entry with a
/// warning. The table is compiled in, so the fallback only fires on stale
/// save data.
pub fn get_biome(id: &str) -> &'static BiomeConfig {
    BIOMES.iter().find(|b| b.id == id).unwrap_or_else(|| {
        warn!("unknown biome id {id:?}, falling back to {}", BIOMES[0].id);
        &BIOMES[0]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_nonempty_with_unique_ids() {
        assert!(!BIOMES.is_empty());
        for (i, a) in BIOMES.iter().enumerate() {
            for b in &BIOMES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_encounter_ranges_are_ordered() {
        for biome in BIOMES {
            let (min, max) = biome.encounter_steps;
            assert!(min >= 1);
            assert!(min <= max);
        }
    }

    #[test]
    fn test_unknown_id_falls_back() {
        assert_eq!(get_biome("no-such-biome").id, BIOMES[0].id);
        assert_eq!(get_biome("mire").id, "mire");
    }
}

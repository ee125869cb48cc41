//! # Overworld Tile Kinds
//!
//! The terrain legend for the generated overworld grid. Each cell of the
//! tile grid holds exactly one kind, and walkability is a property of the
//! kind alone; the parallel biome grid only affects palette and encounter
//! tuning, never collision.

use serde::{Deserialize, Serialize};

/// Terrain kind for one overworld cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    /// Mossy variant of plain ground, purely cosmetic
    AltPlain = 0,
    /// Default walkable ground
    Plain = 1,
    /// Rivers, lakes, and sea. Never walkable.
    Water = 2,
    /// High terrain. Never walkable.
    Mountain = 3,
    /// Entrance to a generated dungeon
    DungeonEntrance = 4,
    Forest = 5,
    Road = 6,
    Coast = 7,
    /// Town placement marker; doubles as the default spawn tile
    Town = 8,
    /// Tilled fields grown around towns
    Field = 9,
}

impl TileKind {
    /// Water and mountain block movement; every other kind is walkable.
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Water | TileKind::Mountain)
    }

    /// Kinds the river carver must not flood: towns, dungeon entrances,
    /// and roads survive a river crossing them.
    pub fn is_river_protected(self) -> bool {
        matches!(
            self,
            TileKind::Town | TileKind::DungeonEntrance | TileKind::Road
        )
    }

    /// Ground that towns can settle on or expand fields into.
    pub fn is_settleable(self) -> bool {
        matches!(
            self,
            TileKind::AltPlain | TileKind::Plain | TileKind::Forest
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkability_matches_legend() {
        assert!(!TileKind::Water.is_walkable());
        assert!(!TileKind::Mountain.is_walkable());
        for kind in [
            TileKind::AltPlain,
            TileKind::Plain,
            TileKind::DungeonEntrance,
            TileKind::Forest,
            TileKind::Road,
            TileKind::Coast,
            TileKind::Town,
            TileKind::Field,
        ] {
            assert!(kind.is_walkable(), "{kind:?} should be walkable");
        }
    }

    #[test]
    fn test_river_protection() {
        assert!(TileKind::Town.is_river_protected());
        assert!(TileKind::Road.is_river_protected());
        assert!(!TileKind::Forest.is_river_protected());
    }
}

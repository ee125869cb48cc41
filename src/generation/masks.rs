//! # Edge Masks
//!
//! Per-tile 4-bit adjacency masks the renderer uses to pick transition
//! sprites. Bit layout: north = 1, east = 2, south = 4, west = 8. Two mask
//! grids are produced: forest fringes and river banks.

use crate::geom::Position;
use crate::world::TileKind;

use super::grid::{tile_at, TileGrid};

/// Mask grid parallel to the tile grid, zero where no transition applies.
pub type MaskGrid = Vec<Vec<u8>>;

const BIT_NORTH: u8 = 1;
const BIT_EAST: u8 = 2;
const BIT_SOUTH: u8 = 4;
const BIT_WEST: u8 = 8;

fn directional_mask(pos: Position, mut neighbor_set: impl FnMut(Position) -> bool) -> u8 {
    let mut mask = 0;
    let [north, east, south, west] = pos.cardinal_neighbors();
    if neighbor_set(north) {
        mask |= BIT_NORTH;
    }
    if neighbor_set(east) {
        mask |= BIT_EAST;
    }
    if neighbor_set(south) {
        mask |= BIT_SOUTH;
    }
    if neighbor_set(west) {
        mask |= BIT_WEST;
    }
    mask
}

/// Masks for forest tiles bordering open ground. A neighbor counts as open
/// when it is neither forest, water, nor mountain; out-of-bounds neighbors
/// count as open so map-border forests still get a fringe.
pub fn forest_edge_masks(tiles: &TileGrid) -> MaskGrid {
    map_masks(tiles, |kind| kind == TileKind::Forest, |neighbor| {
        !matches!(
            neighbor,
            Some(TileKind::Forest | TileKind::Water | TileKind::Mountain)
        )
    })
}

/// Masks for ground tiles bordering water, drawn as river banks. Only
/// natural ground takes a bank; roads and settlements render their own
/// borders.
pub fn river_bank_masks(tiles: &TileGrid) -> MaskGrid {
    map_masks(
        tiles,
        |kind| {
            matches!(
                kind,
                TileKind::AltPlain | TileKind::Plain | TileKind::Field
            )
        },
        |neighbor| neighbor == Some(TileKind::Water),
    )
}

fn map_masks(
    tiles: &TileGrid,
    candidate: impl Fn(TileKind) -> bool,
    neighbor_set: impl Fn(Option<TileKind>) -> bool,
) -> MaskGrid {
    tiles
        .iter()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, &kind)| {
                    if !candidate(kind) {
                        return 0;
                    }
                    let pos = Position::new(x as i32, y as i32);
                    directional_mask(pos, |n| neighbor_set(tile_at(tiles, n)))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forest_fringe_bits() {
        // Single forest tile surrounded by plains: all four bits set.
        let mut tiles = vec![vec![TileKind::Plain; 3]; 3];
        tiles[1][1] = TileKind::Forest;
        let masks = forest_edge_masks(&tiles);
        assert_eq!(masks[1][1], BIT_NORTH | BIT_EAST | BIT_SOUTH | BIT_WEST);
        assert_eq!(masks[0][0], 0);
    }

    #[test]
    fn test_forest_interior_has_no_fringe() {
        let tiles = vec![vec![TileKind::Forest; 3]; 3];
        let masks = forest_edge_masks(&tiles);
        assert_eq!(masks[1][1], 0);
        // Border forests face out-of-bounds, which counts as open ground.
        assert_eq!(masks[0][1], BIT_NORTH);
    }

    #[test]
    fn test_river_bank_faces_water() {
        let mut tiles = vec![vec![TileKind::Plain; 3]; 3];
        tiles[0][1] = TileKind::Water;
        let masks = river_bank_masks(&tiles);
        assert_eq!(masks[1][1], BIT_NORTH);
        assert_eq!(masks[0][1], 0);
    }

    #[test]
    fn test_road_takes_no_bank() {
        let mut tiles = vec![vec![TileKind::Road; 3]; 3];
        tiles[0][1] = TileKind::Water;
        let masks = river_bank_masks(&tiles);
        assert_eq!(masks[1][1], 0);
    }
}

//! # Height Map Synthesis
//!
//! Scalar elevation field driving terrain classification and river flow.
//! Blends a radial falloff (high in the map center, low at the edges, so
//! continents form away from the border) with two octaves of seeded value
//! noise. The noise lattice is a pure function of the seed and coordinates,
//! so it consumes nothing from the generation RNG stream.

use noise::{NoiseFn, Value};

/// Elevation grid in `[0, 1]`, indexed `[row][col]`.
pub type HeightMap = Vec<Vec<f64>>;

const COARSE_FREQUENCY: f64 = 0.05;
const FINE_FREQUENCY: f64 = 0.1;

/// Builds the elevation field for a `width`×`height` map.
pub fn create_height_map(width: usize, height: usize, seed: u32) -> HeightMap {
    let lattice = Value::new(seed);
    let sample = |x: f64, y: f64| (lattice.get([x, y]) + 1.0) / 2.0;

    let mut map = vec![vec![0.0; width]; height];
    for (y, row) in map.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let nx = x as f64 / width as f64 - 0.5;
            let ny = y as f64 / height as f64 - 0.5;
            let base = 1.0 - (nx * nx + ny * ny).sqrt();
            let fine = sample(x as f64 * FINE_FREQUENCY, y as f64 * FINE_FREQUENCY);
            let coarse = sample(x as f64 * COARSE_FREQUENCY, y as f64 * COARSE_FREQUENCY);
            let noise = (fine + coarse * 0.5) / 1.5;
            *cell = (base * 0.7 + noise * 0.5).clamp(0.0, 1.0);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_map_dimensions_and_range() {
        let map = create_height_map(32, 20, 7);
        assert_eq!(map.len(), 20);
        for row in &map {
            assert_eq!(row.len(), 32);
            for &h in row {
                assert!((0.0..=1.0).contains(&h));
            }
        }
    }

    #[test]
    fn test_height_map_is_seed_deterministic() {
        let a = create_height_map(24, 24, 42);
        let b = create_height_map(24, 24, 42);
        assert_eq!(a, b);
        let c = create_height_map(24, 24, 43);
        assert_ne!(a, c);
    }

    #[test]
    fn test_center_tends_higher_than_corner() {
        let map = create_height_map(64, 64, 11);
        // Radial falloff dominates: the exact center outranks the corner.
        assert!(map[32][32] > map[0][0]);
    }
}

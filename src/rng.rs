//! # Deterministic RNG
//!
//! Seeded pseudo-random stream used by world generation and encounter
//! scheduling. A 32-bit seed produces an identical float sequence on every
//! run, which is what makes worlds reproducible from a stored save seed.

/// Mulberry32 stream: 32 bits of state, one add and two mixing rounds per
/// draw. Fast enough to sit inside the generation inner loops and small
/// enough to clone freely in tests.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a stream from a 32-bit seed. Same seed, same sequence.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit draw.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform index in `[0, len)`. Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_f64() * len as f64) as usize
    }

    /// Bernoulli draw: true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in `[min, max]` inclusive.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_f64() * f64::from(span)) as u32
    }
}

/// Folds a text seed down to 32 bits with FNV-1a so players can type
/// memorable seeds. Numeric seeds are used as-is by the caller.
pub fn fold_text_seed(text: &str) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for byte in text.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

/// Derives a non-deterministic seed from the wall clock, masked to 32 bits.
/// Used for "new game" when the player supplies no seed.
pub fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    (millis & 0xFFFF_FFFF) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Mulberry32::new(1234);
        let mut b = Mulberry32::new(1234);
        for _ in 0..256 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Mulberry32::new(1);
        let mut b = Mulberry32::new(2);
        let first: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_floats_in_unit_interval() {
        let mut rng = Mulberry32::new(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_index_bounds() {
        let mut rng = Mulberry32::new(7);
        for _ in 0..1000 {
            assert!(rng.index(5) < 5);
        }
        assert_eq!(rng.index(0), 0);
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let mut rng = Mulberry32::new(99);
        for _ in 0..1000 {
            let v = rng.range_inclusive(3, 9);
            assert!((3..=9).contains(&v));
        }
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(8, 2), 8);
    }

    #[test]
    fn test_text_seed_is_stable() {
        assert_eq!(fold_text_seed("mistheart"), fold_text_seed("mistheart"));
        assert_ne!(fold_text_seed("mistheart"), fold_text_seed("misthearT"));
        assert_eq!(fold_text_seed(""), 2_166_136_261);
    }
}

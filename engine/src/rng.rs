//! A pure, string-seeded PRNG.
//!
//! The stream depends only on the seed string: no wall clock, no
//! process state. This is what makes the puzzle generator (`puzzle`)
//! reproducible across runs and hosts.

/// Seeded pseudo-random stream over a 32-bit state.
#[derive(Debug, Clone, Copy)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    pub fn from_u32(state: u32) -> Self {
        Self { state }
    }

    /// Advances the stream and returns a float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        // xorshift32, then scale to [0, 1). Deterministic, host-independent.
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f64) / (u32::MAX as f64 + 1.0)
    }

    /// Picks an element from `sequence` using the next value in the stream.
    ///
    /// Returns `None` for an empty sequence.
    pub fn select<'a, T>(&mut self, sequence: &'a [T]) -> Option<&'a T> {
        if sequence.is_empty() {
            return None;
        }
        let idx = (self.next_float() * sequence.len() as f64) as usize;
        sequence.get(idx.min(sequence.len() - 1))
    }
}

/// Collapses a string seed to a 32-bit integer via repeated multiply-add
/// over its codepoints, truncated to 32 bits. Exposed so other
/// components (e.g. the cipher builder's rotation seed) can derive an
/// integer seed from the same date string without going through a full
/// `SeededRng` stream.
pub fn stable_hash(seed: &str) -> u32 {
    hash_seed(seed)
}

fn hash_seed(seed: &str) -> u32 {
    let mut acc: u32 = 0x9e37_79b9;
    for c in seed.chars() {
        acc = acc
            .wrapping_mul(31)
            .wrapping_add(c as u32)
            .wrapping_add(0x6d2b_79f5);
    }
    // avoid the all-zero state, which would make xorshift32 a fixed point.
    if acc == 0 { 0x2545_f491 } else { acc }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededRng::new("2026-07-27");
        let mut b = SeededRng::new("2026-07-27");
        let sample_a: Vec<f64> = (0..8).map(|_| a.next_float()).collect();
        let sample_b: Vec<f64> = (0..8).map(|_| b.next_float()).collect();
        assert_eq!(sample_a, sample_b);
    }

    #[test]
    fn different_seed_different_stream() {
        let mut a = SeededRng::new("2026-07-27");
        let mut b = SeededRng::new("2026-07-28");
        assert_ne!(a.next_float(), b.next_float());
    }

    #[test]
    fn floats_are_in_range() {
        let mut rng = SeededRng::new("range-check");
        for _ in 0..1000 {
            let f = rng.next_float();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn select_is_deterministic() {
        let xs = ["a", "b", "c", "d", "e"];
        let mut a = SeededRng::new("pick");
        let mut b = SeededRng::new("pick");
        assert_eq!(a.select(&xs), b.select(&xs));
    }

    #[test]
    fn select_on_empty_is_none() {
        let xs: [&str; 0] = [];
        let mut rng = SeededRng::new("empty");
        assert_eq!(rng.select(&xs), None);
    }
}

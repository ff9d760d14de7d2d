// Portable pseudo-random source for the introspection poem.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// The generator itself is hand-rolled so that a seeded run prints the same
// poem on every platform; `rand` is used only to draw an OS-entropy seed.
//
// Randomness enters the scan crate only through the `RandomSource` trait.
// `ScanRng` is the production implementation; tests substitute their own
// sources to pin the exact tokens a poem line draws. The helpers `shuffle`
// and `sample` are free functions over `RandomSource` so they work through
// `&mut dyn RandomSource` as well as concrete generators.
//
// **Constraint: determinism.** Given the same prior state, every method on
// `ScanRng` must return the same value regardless of platform or compiler.
// Only `ScanRng::from_entropy()` is allowed to look at the outside world,
// and only to pick a seed.

use serde::{Deserialize, Serialize};

/// A pluggable source of uniformly distributed random numbers.
///
/// Implementors only need `next_u64`. `below` has a bias-free default built
/// on it, but stubs may override it to script exact picks.
pub trait RandomSource {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform integer in `[0, bound)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `bound == 0`.
    fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "below: bound must be positive");
        let range = bound as u64;
        if range.is_power_of_two() {
            return (self.next_u64() & (range - 1)) as usize;
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (r % range) as usize;
            }
        }
    }
}

/// Xoshiro256++ generator used for the poem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanRng {
    s: [u64; 4],
}

impl ScanRng {
    /// Create a new generator seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    /// Two `ScanRng` instances created with the same seed produce identical
    /// output sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Create a generator seeded from OS entropy via `rand`.
    ///
    /// This is the default for an unseeded run. Only the seed comes from
    /// `rand`; the output stream is still xoshiro256++.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }
}

impl RandomSource for ScanRng {
    fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }
}

/// SplitMix64, used only for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Shuffle `items` in place (Fisher-Yates, walking from the back).
pub fn shuffle<R: RandomSource + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Draw `count` items uniformly without replacement.
///
/// `count` is clamped to `items.len()`, so an empty slice always yields an
/// empty sample. The input is left untouched; each call samples afresh.
pub fn sample<R: RandomSource + ?Sized, T: Clone>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    let count = count.min(items.len());
    let mut pool: Vec<T> = items.to_vec();
    // Partial Fisher-Yates: the first `count` slots become the sample.
    for i in 0..count {
        let j = i + rng.below(pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always picks the lowest index.
    struct FirstPick;

    impl RandomSource for FirstPick {
        fn next_u64(&mut self) -> u64 {
            0
        }

        fn below(&mut self, _bound: usize) -> usize {
            0
        }
    }

    #[test]
    fn determinism_same_seed_same_output() {
        let mut a = ScanRng::new(42);
        let mut b = ScanRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_different_output() {
        let mut a = ScanRng::new(42);
        let mut b = ScanRng::new(43);
        // Extremely unlikely to collide on the first value.
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn entropy_seeds_differ() {
        let mut a = ScanRng::from_entropy();
        let mut b = ScanRng::from_entropy();
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn below_within_bounds() {
        let mut rng = ScanRng::new(999);
        for bound in [1, 2, 3, 5, 7, 8, 100] {
            for _ in 0..2_000 {
                let v = rng.below(bound);
                assert!(v < bound, "below({bound}) returned {v}");
            }
        }
    }

    #[test]
    fn below_reaches_upper_value() {
        let mut rng = ScanRng::new(1);
        let saw_max = (0..10_000).any(|_| rng.below(3) == 2);
        assert!(saw_max, "below(3) should reach 2");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ScanRng::new(7);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted, "50 items should not stay in order");
    }

    #[test]
    fn shuffle_with_first_pick_rotates() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        shuffle(&mut FirstPick, &mut items);
        // i=3 swaps (3,0), i=2 swaps (2,0), i=1 swaps (1,0).
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);
    }

    #[test]
    fn sample_draws_without_replacement() {
        let mut rng = ScanRng::new(555);
        let items: Vec<usize> = (0..10).collect();
        for _ in 0..500 {
            let mut picked = sample(&mut rng, &items, 5);
            assert_eq!(picked.len(), 5);
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), 5, "sample repeated an index");
        }
    }

    #[test]
    fn sample_clamps_to_population() {
        let mut rng = ScanRng::new(3);
        assert_eq!(sample(&mut rng, &["x", "y"], 5).len(), 2);
        assert!(sample(&mut rng, &Vec::<&str>::new(), 5).is_empty());
    }

    #[test]
    fn sample_with_first_pick_takes_prefix() {
        let picked = sample(&mut FirstPick, &[1, 2, 3, 4, 5, 6], 3);
        assert_eq!(picked, vec![1, 2, 3]);
    }

    #[test]
    fn sample_through_trait_object() {
        let mut rng = ScanRng::new(11);
        let dyn_rng: &mut dyn RandomSource = &mut rng;
        assert_eq!(sample(dyn_rng, &[1, 2, 3], 2).len(), 2);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = ScanRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: ScanRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}

//! Deterministic random number generation for draws, shuffles and packs.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical draws, packs and ids
//! - **Serializable**: O(1) state capture and restore
//! - **Id minting**: fresh card ids come from the same stream, so a seeded
//!   session replays exactly
//!
//! ```
//! use card_binder::core::BinderRng;
//!
//! let mut a = BinderRng::new(7);
//! let mut b = BinderRng::new(7);
//! assert_eq!(a.unit(), b.unit());
//! assert_eq!(a.index(10), b.index(10));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::ids::CardId;

/// Seeded RNG used by every randomized operation.
///
/// Uses ChaCha8 for speed while keeping a uniform distribution.
#[derive(Clone, Debug)]
pub struct BinderRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BinderRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Remove and return a uniformly chosen element (swap-and-pop).
    ///
    /// Order of the remaining elements is not preserved.
    pub fn take_one<T>(&mut self, items: &mut Vec<T>) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        Some(items.swap_remove(i))
    }

    /// Mint a random id `<prefix><16 hex digits>` that `taken` rejects.
    pub fn mint(&mut self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = format!("{prefix}{:016x}", self.inner.gen::<u64>());
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Mint a card id that `taken` does not already claim.
    pub fn mint_card_id(&mut self, taken: impl Fn(&CardId) -> bool) -> CardId {
        let id = self.mint("c", |raw| taken(&CardId::new(raw)));
        CardId::new(id)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> BinderRngState {
        BinderRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &BinderRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinderRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = BinderRng::new(42);
        let mut rng2 = BinderRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.index(1000), rng2.index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = BinderRng::new(1);
        let mut rng2 = BinderRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_unit_range() {
        let mut rng = BinderRng::new(3);
        for _ in 0..1000 {
            let r = rng.unit();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_take_one_drains_without_repeats() {
        let mut rng = BinderRng::new(9);
        let mut items: Vec<u32> = (0..20).collect();
        let mut seen = Vec::new();

        while let Some(x) = rng.take_one(&mut items) {
            assert!(!seen.contains(&x));
            seen.push(x);
        }

        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        assert!(rng.take_one(&mut items).is_none());
    }

    #[test]
    fn test_shuffle() {
        let mut rng = BinderRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_mint_skips_taken_ids() {
        let mut probe = BinderRng::new(5);
        let first = probe.mint_card_id(|_| false);

        let mut rng = BinderRng::new(5);
        let minted = rng.mint_card_id(|id| *id == first);
        assert_ne!(minted, first);
        assert!(minted.as_str().starts_with('c'));
        assert_eq!(minted.as_str().len(), 17);
    }

    #[test]
    fn test_mint_prefix() {
        let mut rng = BinderRng::new(5);
        let id = rng.mint("d", |_| false);
        assert!(id.starts_with('d'));
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = BinderRng::new(42);
        for _ in 0..50 {
            rng.unit();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.index(1000)).collect();

        let mut restored = BinderRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.index(1000)).collect();

        assert_eq!(expected, actual);
        assert_eq!(restored.seed(), 42);
    }
}

//! Bucketed sampling without replacement.
//!
//! Candidates are split into one bucket per rarity. Each requested slot
//! takes a uniformly random unused candidate from its bucket; slots whose
//! bucket ran dry are then filled from the unused candidates of any rarity.
//! Picks use swap-and-pop on index vectors, so every pick is O(1).

use crate::cards::Rarity;
use crate::core::rng::BinderRng;

/// Indices into the candidate list, chosen for a pack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Chosen candidate indices, in slot order. Unfilled slots are skipped.
    pub picks: Vec<usize>,
    /// Number of slots requested.
    pub requested: usize,
}

impl Sample {
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.picks.len() < self.requested
    }
}

/// Pick one distinct candidate per slot.
///
/// `rarities[i]` is the rarity of candidate `i`.
pub fn sample(rarities: &[Rarity], slots: &[Rarity], rng: &mut BinderRng) -> Sample {
    let mut buckets: [Vec<usize>; Rarity::COUNT] = Default::default();
    for (i, rarity) in rarities.iter().enumerate() {
        buckets[rarity.index()].push(i);
    }

    let mut used = vec![false; rarities.len()];
    let mut chosen: Vec<Option<usize>> = slots
        .iter()
        .map(|rarity| {
            let pick = rng.take_one(&mut buckets[rarity.index()]);
            if let Some(i) = pick {
                used[i] = true;
            }
            pick
        })
        .collect();

    if chosen.iter().any(Option::is_none) {
        let mut remaining: Vec<usize> = (0..rarities.len()).filter(|i| !used[*i]).collect();
        for slot in chosen.iter_mut().filter(|s| s.is_none()) {
            match rng.take_one(&mut remaining) {
                Some(i) => *slot = Some(i),
                None => break,
            }
        }
    }

    Sample {
        picks: chosen.into_iter().flatten().collect(),
        requested: slots.len(),
    }
}

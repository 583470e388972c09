//! Rarity tiers: which rarity slots a pack asks for.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Rarity;

/// Rarity slots of one pack. Never more than ten.
pub type TierSlots = SmallVec<[Rarity; 10]>;

/// The four pack shapes, picked by one uniform roll.
///
/// | Roll | Tier | Slots |
/// |---|---|---|
/// | `r < 0.65` | `Base` | Common x4, Uncommon x2, Rare |
/// | `0.65 <= r < 0.80` | `Set` | Base + Set |
/// | `0.80 <= r < 0.95` | `Legendary` | Set + Legendary |
/// | `r >= 0.95` | `Unique` | Legendary + Unique |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Base,
    Set,
    Legendary,
    Unique,
}

impl RarityTier {
    /// Map a roll in `[0, 1)` to a tier.
    #[must_use]
    pub fn from_roll(r: f64) -> Self {
        if r < 0.65 {
            RarityTier::Base
        } else if r < 0.80 {
            RarityTier::Set
        } else if r < 0.95 {
            RarityTier::Legendary
        } else {
            RarityTier::Unique
        }
    }

    /// The requested rarity of each slot, in pick order.
    #[must_use]
    pub fn slots(self) -> TierSlots {
        let mut slots: TierSlots = SmallVec::new();
        slots.extend([Rarity::Common; 4]);
        slots.extend([Rarity::Uncommon; 2]);
        slots.push(Rarity::Rare);
        if self >= RarityTier::Set {
            slots.push(Rarity::Set);
        }
        if self >= RarityTier::Legendary {
            slots.push(Rarity::Legendary);
        }
        if self >= RarityTier::Unique {
            slots.push(Rarity::Unique);
        }
        slots
    }

    /// Cards a full pack of this tier holds.
    #[must_use]
    pub fn slot_count(self) -> usize {
        match self {
            RarityTier::Base => 7,
            RarityTier::Set => 8,
            RarityTier::Legendary => 9,
            RarityTier::Unique => 10,
        }
    }
}

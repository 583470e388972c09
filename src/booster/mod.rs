//! Booster pack generation.
//!
//! Opening a pack:
//!
//! 1. Resolve the pack key to a tag and collect Catalog candidates whose
//!    tags contain it (case-insensitive). `Universal` takes the whole
//!    Catalog. No candidates is a warning and nothing changes.
//! 2. Roll a [`RarityTier`].
//! 3. [`sample`] one distinct candidate per slot, bucketed by rarity, with
//!    fallback to any rarity.
//! 4. Clone each pick onto a fresh id and append it to the Pool.
//!
//! A pack that cannot fill every slot is still opened; `shortfall()` on
//! the result reports it.
//!
//! ## Usage
//!
//! ```
//! use card_binder::booster::RarityTier;
//! use card_binder::cards::{CardMeta, Rarity};
//! use card_binder::collection::Collection;
//! use card_binder::core::{BinderConfig, BinderRng};
//!
//! let mut rng = BinderRng::new(21);
//! let mut binder = Collection::new();
//! for name in ["a", "b", "c", "d", "e", "f", "g", "h"] {
//!     binder.create_card(name, None, CardMeta::new("Unit", Rarity::Common), &mut rng);
//! }
//!
//! let pack = binder
//!     .open_booster_tier("Universal", RarityTier::Base, &BinderConfig::default(), &mut rng)
//!     .unwrap();
//! assert_eq!(pack.cards.len(), 7);
//! assert_eq!(binder.zones.pool.len(), 7);
//! assert!(pack.shortfall().is_none());
//! ```

pub mod sampler;
pub mod tier;

pub use sampler::{sample, Sample};
pub use tier::{RarityTier, TierSlots};

use tracing::{debug, info, warn};

use crate::cards::Rarity;
use crate::collection::Collection;
use crate::core::config::BinderConfig;
use crate::core::error::Warning;
use crate::core::ids::CardId;
use crate::core::rng::BinderRng;

/// An opened pack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoosterPack {
    pub pack_key: String,
    pub tier: RarityTier,
    /// Newly minted ids now in the Pool, in slot order.
    pub cards: Vec<CardId>,
    /// Catalog id each card was cloned from, parallel to `cards`.
    pub sources: Vec<CardId>,
    /// Slots the tier asked for.
    pub requested: usize,
}

impl BoosterPack {
    /// The short-pack warning, if not every slot was filled.
    #[must_use]
    pub fn shortfall(&self) -> Option<Warning> {
        (self.cards.len() < self.requested).then(|| Warning::ShortPack {
            pack: self.pack_key.clone(),
            requested: self.requested,
            filled: self.cards.len(),
        })
    }
}

impl Collection {
    /// Catalog entries a pack may draw, with their rarity.
    #[must_use]
    pub fn booster_candidates(&self, pack_key: &str, config: &BinderConfig) -> Vec<(CardId, Rarity)> {
        let tag = config.pack_tag(pack_key);
        self.catalog
            .iter()
            .filter(|entry| match &tag {
                None => true,
                Some(tag) => self.registry.meta(&entry.id).is_some_and(|m| m.has_tag(tag)),
            })
            .map(|entry| (entry.id.clone(), self.registry.rarity(&entry.id)))
            .collect()
    }

    /// Open a pack, rolling its tier.
    pub fn open_booster(
        &mut self,
        pack_key: &str,
        config: &BinderConfig,
        rng: &mut BinderRng,
    ) -> Result<BoosterPack, Warning> {
        let candidates = self.booster_candidates(pack_key, config);
        if candidates.is_empty() {
            return Err(Warning::EmptyCandidatePool(pack_key.to_string()));
        }
        let roll = rng.unit();
        let tier = RarityTier::from_roll(roll);
        debug!(pack = pack_key, roll, ?tier, "rolled rarity tier");
        Ok(self.instantiate_pack(pack_key, tier, &candidates, rng))
    }

    /// Open a pack with a fixed tier.
    pub fn open_booster_tier(
        &mut self,
        pack_key: &str,
        tier: RarityTier,
        config: &BinderConfig,
        rng: &mut BinderRng,
    ) -> Result<BoosterPack, Warning> {
        let candidates = self.booster_candidates(pack_key, config);
        if candidates.is_empty() {
            return Err(Warning::EmptyCandidatePool(pack_key.to_string()));
        }
        Ok(self.instantiate_pack(pack_key, tier, &candidates, rng))
    }

    fn instantiate_pack(
        &mut self,
        pack_key: &str,
        tier: RarityTier,
        candidates: &[(CardId, Rarity)],
        rng: &mut BinderRng,
    ) -> BoosterPack {
        let rarities: Vec<Rarity> = candidates.iter().map(|(_, r)| *r).collect();
        let picked = sample(&rarities, &tier.slots(), rng);

        let mut pack = BoosterPack {
            pack_key: pack_key.to_string(),
            tier,
            cards: Vec::with_capacity(picked.picks.len()),
            sources: Vec::with_capacity(picked.picks.len()),
            requested: tier.slot_count(),
        };
        for i in picked.picks {
            let source = &candidates[i].0;
            let minted = self.clone_card(source, rng);
            if !self.zones.pool.contains(&minted) {
                self.zones.pool.push(minted.clone());
            }
            pack.cards.push(minted);
            pack.sources.push(source.clone());
        }

        if let Some(short) = pack.shortfall() {
            warn!(pack = pack_key, "{short}");
        }
        info!(pack = pack_key, ?tier, cards = pack.cards.len(), "opened booster");

        self.reconcile();
        pack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardMeta;
    use crate::core::config::PackConfig;

    fn binder_with(cards: &[(&str, Rarity, Option<&str>)]) -> (Collection, BinderRng) {
        let mut rng = BinderRng::new(17);
        let mut binder = Collection::new();
        for (name, rarity, tag) in cards {
            let mut meta = CardMeta::new("Unit", *rarity);
            if let Some(tag) = tag {
                meta = meta.with_tag(*tag);
            }
            binder.create_card(*name, None, meta, &mut rng);
        }
        (binder, rng)
    }

    #[test]
    fn test_candidates_filter_by_tag() {
        let (binder, _) = binder_with(&[
            ("a", Rarity::Common, Some("Fire")),
            ("b", Rarity::Common, Some("water")),
            ("c", Rarity::Rare, None),
        ]);
        let config = BinderConfig::default().with_pack(PackConfig::tagged("Inferno", "fire"));

        assert_eq!(binder.booster_candidates("Universal", &config).len(), 3);
        assert_eq!(binder.booster_candidates("Inferno", &config).len(), 1);
        assert_eq!(binder.booster_candidates("WATER", &config).len(), 1);
        assert!(binder.booster_candidates("Air", &config).is_empty());
    }

    #[test]
    fn test_empty_pool_warns_without_change() {
        let (mut binder, mut rng) = binder_with(&[("a", Rarity::Common, None)]);
        let before = binder.clone();

        let result = binder.open_booster("Fire", &BinderConfig::default(), &mut rng);

        assert_eq!(result, Err(Warning::EmptyCandidatePool("Fire".into())));
        assert_eq!(binder, before);
    }

    #[test]
    fn test_pack_clones_into_pool() {
        let (mut binder, mut rng) = binder_with(&[
            ("a", Rarity::Common, None),
            ("b", Rarity::Uncommon, None),
            ("c", Rarity::Rare, None),
        ]);

        let pack = binder
            .open_booster_tier("Universal", RarityTier::Base, &BinderConfig::default(), &mut rng)
            .unwrap();

        assert_eq!(pack.cards.len(), 3);
        assert_eq!(
            pack.shortfall(),
            Some(Warning::ShortPack {
                pack: "Universal".into(),
                requested: 7,
                filled: 3
            })
        );
        assert_eq!(binder.zones.pool, pack.cards);
        assert_eq!(binder.catalog.len(), 3);
        for (card, source) in pack.cards.iter().zip(&pack.sources) {
            assert_ne!(card, source);
            assert_eq!(binder.registry.meta(card), binder.registry.meta(source));
        }
    }
}

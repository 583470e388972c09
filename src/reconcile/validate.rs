//! Postcondition check for a reconciled collection.
//!
//! `validate` does not repair anything. It reports the first invariant a
//! collection breaks, and is what the session asserts after each commit
//! and what the property tests check.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::collection::Collection;
use crate::core::ids::CardId;
use crate::zones::ZoneRef;

/// A broken collection invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("card {id} is owned by both {first} and {second}")]
    DuplicateOwnership {
        id: CardId,
        first: ZoneRef,
        second: ZoneRef,
    },

    #[error("empty card id in {0}")]
    EmptyId(ZoneRef),

    #[error("catalog lists card {0} more than once")]
    DuplicateCatalogEntry(CardId),

    #[error("registry entry for {0} is not referenced anywhere")]
    OrphanRegistryEntry(CardId),
}

/// Check single ownership, catalog uniqueness and registry pruning.
pub fn validate(collection: &Collection) -> Result<(), InvariantViolation> {
    let mut owner: FxHashMap<&CardId, ZoneRef> = FxHashMap::default();

    for (zone, id) in zone_entries(collection) {
        if id.is_empty() {
            return Err(InvariantViolation::EmptyId(zone));
        }
        if let Some(first) = owner.get(id) {
            return Err(InvariantViolation::DuplicateOwnership {
                id: id.clone(),
                first: first.clone(),
                second: zone,
            });
        }
        owner.insert(id, zone);
    }

    let mut catalog: FxHashSet<&CardId> = FxHashSet::default();
    for entry in &collection.catalog {
        if entry.id.is_empty() {
            return Err(InvariantViolation::EmptyId(ZoneRef::Catalog));
        }
        if !catalog.insert(&entry.id) {
            return Err(InvariantViolation::DuplicateCatalogEntry(entry.id.clone()));
        }
    }

    if let Some(orphan) = collection
        .registry
        .ids()
        .find(|id| !owner.contains_key(id) && !catalog.contains(id))
    {
        return Err(InvariantViolation::OrphanRegistryEntry(orphan.clone()));
    }
    Ok(())
}

/// Every (zone, id) pair, hands first.
fn zone_entries(collection: &Collection) -> Vec<(ZoneRef, &CardId)> {
    let zones = &collection.zones;
    let mut entries = Vec::with_capacity(zones.total_cards());

    for hand in &zones.hands {
        let cards = hand.cards.iter().map(|id| (ZoneRef::HandCards(hand.id.clone()), id));
        let discard = hand.discard.iter().map(|id| (ZoneRef::HandDiscard(hand.id.clone()), id));
        let slots = hand
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|id| (ZoneRef::HandSlot(hand.id.clone(), i), id)));
        entries.extend(cards.chain(discard).chain(slots));
    }
    for deck in &zones.decks {
        entries.extend(deck.cards.iter().map(|id| (ZoneRef::Deck(deck.id.clone()), id)));
    }
    entries.extend(zones.pool.iter().map(|id| (ZoneRef::Pool, id)));
    entries
}

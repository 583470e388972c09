//! Zone store for card locations and movement.
//!
//! The `ZoneStore` holds the mutable collections:
//! - the Pool, an unordered bag of ids
//! - Decks, ordered stacks (last = top)
//! - Hands, each with a card list, a discard list and ten slots
//!
//! It answers "where is this card" and performs raw removals/insertions.
//! It does not enforce single ownership by itself; the reconciler does.
//!
//! ## Usage
//!
//! ```
//! use card_binder::zones::{Deck, ZoneRef, ZoneStore};
//! use card_binder::core::{CardId, DeckId};
//!
//! let mut store = ZoneStore::new();
//! store.decks.push(Deck::new("d1", "Main"));
//!
//! let card = CardId::new("a");
//! store.insert(&ZoneRef::Pool, card.clone()).unwrap();
//! store.remove_everywhere(&card);
//! store.insert(&ZoneRef::Deck(DeckId::new("d1")), card.clone()).unwrap();
//!
//! assert_eq!(store.locate(&card), vec![ZoneRef::Deck(DeckId::new("d1"))]);
//! ```

use super::deck::Deck;
use super::hand::Hand;
use super::zone_ref::ZoneRef;
use super::SLOT_COUNT;
use crate::core::error::Warning;
use crate::core::ids::{CardId, DeckId, HandId};

/// Result of inserting a card into a zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inserted {
    /// False if the id was already present in the target sequence.
    pub added: bool,

    /// Card previously in the target slot.
    pub displaced: Option<CardId>,
}

/// The mutable card containers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneStore {
    pub pool: Vec<CardId>,
    pub decks: Vec<Deck>,
    pub hands: Vec<Hand>,
}

impl ZoneStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn deck(&self, id: &DeckId) -> Option<&Deck> {
        self.decks.iter().find(|d| &d.id == id)
    }

    pub fn deck_mut(&mut self, id: &DeckId) -> Option<&mut Deck> {
        self.decks.iter_mut().find(|d| &d.id == id)
    }

    #[must_use]
    pub fn hand(&self, id: &HandId) -> Option<&Hand> {
        self.hands.iter().find(|h| &h.id == id)
    }

    pub fn hand_mut(&mut self, id: &HandId) -> Option<&mut Hand> {
        self.hands.iter_mut().find(|h| &h.id == id)
    }

    /// Deck lookup that reports a missing deck.
    pub fn require_deck(&self, id: &DeckId) -> Result<&Deck, Warning> {
        self.deck(id).ok_or_else(|| Warning::DeckNotFound(id.clone()))
    }

    /// Hand lookup that reports a missing hand.
    pub fn require_hand(&self, id: &HandId) -> Result<&Hand, Warning> {
        self.hand(id).ok_or_else(|| Warning::HandNotFound(id.clone()))
    }

    /// Check that a zone can receive a card.
    ///
    /// The Catalog always passes; inserting into it is a no-op.
    pub fn check_target(&self, zone: &ZoneRef) -> Result<(), Warning> {
        match zone {
            ZoneRef::Catalog | ZoneRef::Pool => Ok(()),
            ZoneRef::Deck(d) => self.require_deck(d).map(|_| ()),
            ZoneRef::HandCards(h) | ZoneRef::HandDiscard(h) => self.require_hand(h).map(|_| ()),
            ZoneRef::HandSlot(h, i) => {
                if *i >= SLOT_COUNT {
                    return Err(Warning::SlotOutOfRange(*i));
                }
                self.require_hand(h).map(|_| ())
            }
        }
    }

    /// Every zone currently holding `id`, in precedence scan order.
    #[must_use]
    pub fn locate(&self, id: &CardId) -> Vec<ZoneRef> {
        let mut found = Vec::new();
        for hand in &self.hands {
            if hand.cards.contains(id) {
                found.push(ZoneRef::HandCards(hand.id.clone()));
            }
            if hand.discard.contains(id) {
                found.push(ZoneRef::HandDiscard(hand.id.clone()));
            }
            for (i, slot) in hand.slots.iter().enumerate() {
                if slot.as_ref() == Some(id) {
                    found.push(ZoneRef::HandSlot(hand.id.clone(), i));
                }
            }
        }
        for deck in &self.decks {
            if deck.contains(id) {
                found.push(ZoneRef::Deck(deck.id.clone()));
            }
        }
        if self.pool.contains(id) {
            found.push(ZoneRef::Pool);
        }
        found
    }

    /// True if any zone holds `id`.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.pool.contains(id)
            || self.decks.iter().any(|d| d.contains(id))
            || self.hands.iter().any(|h| h.holds(id))
    }

    /// Remove `id` from the pool, every deck and every hand (slots included).
    ///
    /// Returns true if it was found anywhere.
    pub fn remove_everywhere(&mut self, id: &CardId) -> bool {
        let mut found = self.remove_from_pool(id);
        for deck in self.decks.iter_mut() {
            found |= deck.remove(id);
        }
        for hand in self.hands.iter_mut() {
            found |= hand.remove(id);
        }
        found
    }

    /// Remove `id` from the pool, decks and hand lists, leaving slots alone.
    pub fn remove_except_slots(&mut self, id: &CardId) -> bool {
        let mut found = self.remove_from_pool(id);
        for deck in self.decks.iter_mut() {
            found |= deck.remove(id);
        }
        for hand in self.hands.iter_mut() {
            found |= hand.remove_from_lists(id);
        }
        found
    }

    fn remove_from_pool(&mut self, id: &CardId) -> bool {
        let before = self.pool.len();
        self.pool.retain(|c| c != id);
        self.pool.len() != before
    }

    /// Insert `id` into `zone`.
    ///
    /// Sequences get an append unless the id is already there. A slot is
    /// overwritten and its previous occupant returned in `displaced`. The
    /// Catalog ignores the insert.
    pub fn insert(&mut self, zone: &ZoneRef, id: CardId) -> Result<Inserted, Warning> {
        self.check_target(zone)?;
        if id.is_empty() {
            return Ok(Inserted::default());
        }

        let added = match zone {
            ZoneRef::Catalog => false,
            ZoneRef::Pool => push_unique(&mut self.pool, id),
            ZoneRef::Deck(d) => self
                .deck_mut(d)
                .ok_or_else(|| Warning::DeckNotFound(d.clone()))?
                .push_top(id),
            ZoneRef::HandCards(h) => push_unique(&mut self.hand_by_id(h)?.cards, id),
            ZoneRef::HandDiscard(h) => push_unique(&mut self.hand_by_id(h)?.discard, id),
            ZoneRef::HandSlot(h, i) => {
                let hand = self.hand_by_id(h)?;
                let displaced = hand.set_slot(*i, id.clone())?.filter(|prev| *prev != id);
                return Ok(Inserted {
                    added: true,
                    displaced,
                });
            }
        };
        Ok(Inserted {
            added,
            displaced: None,
        })
    }

    fn hand_by_id(&mut self, id: &HandId) -> Result<&mut Hand, Warning> {
        self.hand_mut(id).ok_or_else(|| Warning::HandNotFound(id.clone()))
    }

    /// Every id held by any zone, in scan order (may repeat).
    pub fn all_ids(&self) -> impl Iterator<Item = &CardId> {
        let hands = self.hands.iter().flat_map(|h| {
            h.cards
                .iter()
                .chain(h.discard.iter())
                .chain(h.slots.iter().flatten())
        });
        let decks = self.decks.iter().flat_map(|d| d.cards.iter());
        hands.chain(decks).chain(self.pool.iter())
    }

    /// Total number of zone entries.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.all_ids().count()
    }
}

fn push_unique(list: &mut Vec<CardId>, id: CardId) -> bool {
    if list.contains(&id) {
        return false;
    }
    list.push(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    fn store() -> ZoneStore {
        let mut store = ZoneStore::new();
        store.decks.push(Deck::new("d1", "Main"));
        store.hands.push(Hand::new("h1", "Table"));
        store
    }

    #[test]
    fn test_insert_into_each_zone() {
        let mut store = store();
        let hand = HandId::new("h1");

        store.insert(&ZoneRef::Pool, id("p")).unwrap();
        store.insert(&ZoneRef::Deck(DeckId::new("d1")), id("d")).unwrap();
        store.insert(&ZoneRef::HandCards(hand.clone()), id("c")).unwrap();
        store.insert(&ZoneRef::HandDiscard(hand.clone()), id("x")).unwrap();
        store.insert(&ZoneRef::HandSlot(hand.clone(), 2), id("s")).unwrap();

        assert_eq!(store.pool, vec![id("p")]);
        assert_eq!(store.locate(&id("d")), vec![ZoneRef::Deck(DeckId::new("d1"))]);
        assert_eq!(store.locate(&id("s")), vec![ZoneRef::HandSlot(hand, 2)]);
        assert_eq!(store.total_cards(), 5);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = store();
        assert!(store.insert(&ZoneRef::Pool, id("a")).unwrap().added);
        assert!(!store.insert(&ZoneRef::Pool, id("a")).unwrap().added);
        assert_eq!(store.pool.len(), 1);
    }

    #[test]
    fn test_slot_insert_reports_displaced() {
        let mut store = store();
        let slot = ZoneRef::HandSlot(HandId::new("h1"), 0);

        assert_eq!(store.insert(&slot, id("a")).unwrap().displaced, None);
        assert_eq!(store.insert(&slot, id("b")).unwrap().displaced, Some(id("a")));
        assert_eq!(store.insert(&slot, id("b")).unwrap().displaced, None);
    }

    #[test]
    fn test_insert_into_missing_zone() {
        let mut store = store();

        assert_eq!(
            store.insert(&ZoneRef::Deck(DeckId::new("nope")), id("a")),
            Err(Warning::DeckNotFound(DeckId::new("nope")))
        );
        assert_eq!(
            store.insert(&ZoneRef::HandSlot(HandId::new("h1"), SLOT_COUNT), id("a")),
            Err(Warning::SlotOutOfRange(SLOT_COUNT))
        );
        assert_eq!(store.total_cards(), 0);
    }

    #[test]
    fn test_catalog_and_empty_inserts_are_ignored() {
        let mut store = store();
        assert!(!store.insert(&ZoneRef::Catalog, id("a")).unwrap().added);
        assert!(!store.insert(&ZoneRef::Pool, id("")).unwrap().added);
        assert_eq!(store.total_cards(), 0);
    }

    #[test]
    fn test_remove_everywhere() {
        let mut store = store();
        store.pool.push(id("a"));
        store.decks[0].cards.push(id("a"));
        store.hands[0].discard.push(id("a"));
        store.hands[0].set_slot(9, id("a")).unwrap();

        assert_eq!(store.locate(&id("a")).len(), 4);
        assert!(store.remove_everywhere(&id("a")));
        assert!(!store.contains(&id("a")));
        assert!(!store.remove_everywhere(&id("a")));
    }

    #[test]
    fn test_remove_except_slots() {
        let mut store = store();
        store.hands[0].cards.push(id("a"));
        store.hands[0].set_slot(4, id("a")).unwrap();

        store.remove_except_slots(&id("a"));
        assert_eq!(
            store.locate(&id("a")),
            vec![ZoneRef::HandSlot(HandId::new("h1"), 4)]
        );
    }
}

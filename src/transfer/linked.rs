//! Operations between a hand and the deck it is linked to.
//!
//! All of them first resolve `hand.src_deck_id`. A missing hand, a hand
//! with no link, or a link to a deleted deck is reported as a warning and
//! nothing changes.

use tracing::debug;

use crate::collection::Collection;
use crate::core::error::Warning;
use crate::core::ids::{CardId, DeckId, HandId};
use crate::core::rng::BinderRng;
use crate::zones::{Deck, DrawMode, Hand};

impl Collection {
    /// The deck a hand draws from, checked to exist.
    pub fn linked_deck(&self, hand: &HandId) -> Result<DeckId, Warning> {
        let linked = self
            .zones
            .require_hand(hand)?
            .linked_deck()
            .ok_or_else(|| Warning::NoLinkedDeck(hand.clone()))?;
        if self.zones.deck(linked).is_none() {
            return Err(Warning::LinkedDeckMissing {
                hand: hand.clone(),
                deck: linked.clone(),
            });
        }
        Ok(linked.clone())
    }

    /// Remove `card` from every zone and put it at index 0 of the linked deck.
    pub fn return_card_to_linked_deck(&mut self, hand: &HandId, card: &CardId) -> Result<(), Warning> {
        let deck = self.linked_deck(hand)?;
        if !self.is_known(card) {
            return Err(Warning::CardNotFound(card.clone()));
        }

        self.return_to_front(&deck, card);
        debug!(hand = %hand, deck = %deck, card = %card, "returned card to deck");

        self.reconcile();
        Ok(())
    }

    /// Return the hand's cards, discard and slot cards to the linked deck.
    ///
    /// Each card goes to index 0 in turn, so the last one returned ends up
    /// at the bottom. Returns the cards moved.
    pub fn return_all_to_linked_deck(&mut self, hand: &HandId) -> Result<Vec<CardId>, Warning> {
        let deck = self.linked_deck(hand)?;
        let returned = self.zones.require_hand(hand)?.all_cards();

        for card in &returned {
            self.return_to_front(&deck, card);
        }
        debug!(hand = %hand, deck = %deck, count = returned.len(), "returned hand to deck");

        self.reconcile();
        Ok(returned)
    }

    /// Draw up to `count` cards from the linked deck into the hand.
    ///
    /// Stops early when the deck runs out. Returns the drawn ids in draw order.
    pub fn draw_to_hand(
        &mut self,
        hand: &HandId,
        count: usize,
        mode: DrawMode,
        rng: &mut BinderRng,
    ) -> Result<Vec<CardId>, Warning> {
        let deck = self.linked_deck(hand)?;
        let (deck, target) = self.deck_and_hand(&deck, hand)?;

        let drawn = draw_into(deck, target, count, mode, rng);
        debug!(hand = %hand, requested = count, drawn = drawn.len(), ?mode, "drew cards");

        self.reconcile();
        Ok(drawn)
    }

    /// Put the hand's card list back on top of the linked deck, then draw
    /// `count` cards at random.
    ///
    /// Discard and slots are not touched.
    pub fn mulligan(&mut self, hand: &HandId, count: usize, rng: &mut BinderRng) -> Result<Vec<CardId>, Warning> {
        let deck = self.linked_deck(hand)?;
        let (deck, target) = self.deck_and_hand(&deck, hand)?;

        let returned = std::mem::take(&mut target.cards);
        let returned_count = returned.len();
        for card in returned {
            deck.push_top(card);
        }
        let drawn = draw_into(deck, target, count, DrawMode::Random, rng);
        debug!(hand = %hand, returned = returned_count, drawn = drawn.len(), "mulligan");

        self.reconcile();
        Ok(drawn)
    }

    fn return_to_front(&mut self, deck: &DeckId, card: &CardId) {
        self.zones.remove_everywhere(card);
        if let Some(deck) = self.zones.deck_mut(deck) {
            deck.push_front(card.clone());
        }
    }

    fn deck_and_hand(&mut self, deck: &DeckId, hand: &HandId) -> Result<(&mut Deck, &mut Hand), Warning> {
        let zones = &mut self.zones;
        let deck = zones
            .decks
            .iter_mut()
            .find(|d| &d.id == deck)
            .ok_or_else(|| Warning::DeckNotFound(deck.clone()))?;
        let hand = zones
            .hands
            .iter_mut()
            .find(|h| &h.id == hand)
            .ok_or_else(|| Warning::HandNotFound(hand.clone()))?;
        Ok((deck, hand))
    }
}

fn draw_into(deck: &mut Deck, hand: &mut Hand, count: usize, mode: DrawMode, rng: &mut BinderRng) -> Vec<CardId> {
    let mut drawn = Vec::with_capacity(count.min(deck.len()));
    while drawn.len() < count {
        let Some(card) = deck.draw(mode, rng) else {
            break;
        };
        if !hand.cards.contains(&card) {
            hand.cards.push(card.clone());
        }
        drawn.push(card);
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::ZoneRef;

    fn ids(raw: &[&str]) -> Vec<CardId> {
        raw.iter().map(|s| CardId::new(*s)).collect()
    }

    fn linked_binder(deck_cards: &[&str]) -> Collection {
        let mut binder = Collection::new();
        binder.zones.decks.push(Deck::new("d1", "Main").with_cards(ids(deck_cards)));
        binder.zones.hands.push(Hand::new("h1", "Table").linked_to("d1"));
        binder
    }

    #[test]
    fn test_linked_deck_warnings() {
        let mut binder = Collection::new();
        binder.zones.hands.push(Hand::new("h1", "T"));
        binder.zones.hands.push(Hand::new("h2", "T").linked_to("gone"));

        assert_eq!(binder.linked_deck(&"h0".into()), Err(Warning::HandNotFound("h0".into())));
        assert_eq!(binder.linked_deck(&"h1".into()), Err(Warning::NoLinkedDeck("h1".into())));
        assert_eq!(
            binder.linked_deck(&"h2".into()),
            Err(Warning::LinkedDeckMissing {
                hand: "h2".into(),
                deck: "gone".into()
            })
        );
    }

    #[test]
    fn test_draw_top_in_order() {
        let mut binder = linked_binder(&["a", "b", "c"]);
        let mut rng = BinderRng::new(1);

        let drawn = binder.draw_to_hand(&"h1".into(), 2, DrawMode::Top, &mut rng).unwrap();

        assert_eq!(drawn, ids(&["c", "b"]));
        assert_eq!(binder.zones.decks[0].cards, ids(&["a"]));
        assert_eq!(binder.zones.hands[0].cards, ids(&["c", "b"]));
    }

    #[test]
    fn test_draw_stops_when_deck_empties() {
        let mut binder = linked_binder(&["a", "b"]);
        let mut rng = BinderRng::new(1);

        let drawn = binder.draw_to_hand(&"h1".into(), 5, DrawMode::Bottom, &mut rng).unwrap();

        assert_eq!(drawn, ids(&["a", "b"]));
        assert!(binder.zones.decks[0].is_empty());
    }

    #[test]
    fn test_draw_without_link_changes_nothing() {
        let mut binder = linked_binder(&["a"]);
        binder.zones.hands[0].src_deck_id = None;
        let before = binder.clone();
        let mut rng = BinderRng::new(1);

        assert_eq!(
            binder.draw_to_hand(&"h1".into(), 1, DrawMode::Top, &mut rng),
            Err(Warning::NoLinkedDeck("h1".into()))
        );
        assert_eq!(binder, before);
    }

    #[test]
    fn test_return_card_goes_to_index_zero() {
        let mut binder = linked_binder(&["a", "b"]);
        binder.zones.hands[0].set_slot(2, CardId::new("s")).unwrap();

        binder.return_card_to_linked_deck(&"h1".into(), &CardId::new("s")).unwrap();

        assert_eq!(binder.zones.decks[0].cards, ids(&["s", "a", "b"]));
        assert_eq!(binder.zones.hands[0].slot(2), None);
    }

    #[test]
    fn test_return_all_collects_every_hand_zone() {
        let mut binder = linked_binder(&["z"]);
        {
            let hand = &mut binder.zones.hands[0];
            hand.cards = ids(&["a", "b"]);
            hand.discard = ids(&["c"]);
            hand.set_slot(7, CardId::new("d")).unwrap();
        }

        let returned = binder.return_all_to_linked_deck(&"h1".into()).unwrap();

        assert_eq!(returned, ids(&["a", "b", "c", "d"]));
        assert_eq!(binder.zones.decks[0].cards, ids(&["d", "c", "b", "a", "z"]));
        assert!(binder.zones.hands[0].all_cards().is_empty());
        assert_eq!(binder.zones.locate(&CardId::new("d")), vec![ZoneRef::Deck("d1".into())]);
    }

    #[test]
    fn test_mulligan_returns_then_draws() {
        let mut binder = linked_binder(&["x", "y"]);
        binder.zones.hands[0].cards = ids(&["a", "b", "c"]);
        binder.zones.hands[0].discard = ids(&["q"]);
        let mut rng = BinderRng::new(8);

        let drawn = binder.mulligan(&"h1".into(), 3, &mut rng).unwrap();

        assert_eq!(drawn.len(), 3);
        assert_eq!(binder.zones.hands[0].cards, drawn);
        assert_eq!(binder.zones.hands[0].discard, ids(&["q"]));
        assert_eq!(binder.zones.decks[0].len(), 2);

        let mut all: Vec<CardId> = binder.zones.decks[0].cards.clone();
        all.extend(drawn);
        all.sort();
        assert_eq!(all, ids(&["a", "b", "c", "x", "y"]));
    }
}

//! Hands - a card list, a discard list and ten fixed slots.
//!
//! `cards`, `discard` and `slots` are peers: all three are owned by the hand
//! and outrank decks and the pool during reconciliation.

use serde::{Deserialize, Serialize};

use super::wire::{fixed_slots, nullable_seq};
use super::SLOT_COUNT;
use crate::core::error::Warning;
use crate::core::ids::{CardId, DeckId, HandId};

/// A named hand, optionally linked to the deck it draws from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    pub id: HandId,

    #[serde(default)]
    pub name: String,

    #[serde(default, with = "nullable_seq")]
    pub cards: Vec<CardId>,

    #[serde(default, with = "nullable_seq")]
    pub discard: Vec<CardId>,

    #[serde(default, with = "fixed_slots")]
    pub slots: [Option<CardId>; SLOT_COUNT],

    #[serde(default, with = "fixed_slots")]
    pub slot_images: [Option<String>; SLOT_COUNT],

    #[serde(default)]
    pub src_deck_id: Option<DeckId>,
}

impl Hand {
    #[must_use]
    pub fn new(id: impl Into<HandId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Link to a source deck.
    #[must_use]
    pub fn linked_to(mut self, deck: impl Into<DeckId>) -> Self {
        self.src_deck_id = Some(deck.into());
        self
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// The linked deck id, ignoring falsy ids.
    #[must_use]
    pub fn linked_deck(&self) -> Option<&DeckId> {
        self.src_deck_id.as_ref().filter(|d| !d.is_empty())
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&CardId> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Put `id` in a slot, returning what was there.
    pub fn set_slot(&mut self, index: usize, id: CardId) -> Result<Option<CardId>, Warning> {
        let slot = self.slots.get_mut(index).ok_or(Warning::SlotOutOfRange(index))?;
        Ok(slot.replace(id))
    }

    /// True if the card is in `cards`, `discard` or any slot.
    #[must_use]
    pub fn holds(&self, id: &CardId) -> bool {
        self.cards.contains(id)
            || self.discard.contains(id)
            || self.slots.iter().any(|s| s.as_ref() == Some(id))
    }

    /// Remove `id` from the card list, discard and every slot.
    pub fn remove(&mut self, id: &CardId) -> bool {
        let mut found = remove_from(&mut self.cards, id);
        found |= remove_from(&mut self.discard, id);
        found |= self.clear_slots_holding(id);
        found
    }

    /// Remove `id` from the card list and discard only.
    pub fn remove_from_lists(&mut self, id: &CardId) -> bool {
        let in_cards = remove_from(&mut self.cards, id);
        remove_from(&mut self.discard, id) || in_cards
    }

    /// Empty every slot holding `id`.
    pub fn clear_slots_holding(&mut self, id: &CardId) -> bool {
        let mut found = false;
        for slot in self.slots.iter_mut() {
            if slot.as_ref() == Some(id) {
                *slot = None;
                found = true;
            }
        }
        found
    }

    /// Union of cards, discard and occupied slots, first occurrence wins.
    #[must_use]
    pub fn all_cards(&self) -> Vec<CardId> {
        let mut out: Vec<CardId> = Vec::new();
        let slots = self.slots.iter().flatten();
        for id in self.cards.iter().chain(self.discard.iter()).chain(slots) {
            if !out.contains(id) {
                out.push(id.clone());
            }
        }
        out
    }

    /// Fill absent slot images from `defaults`.
    pub fn apply_default_slot_images(&mut self, defaults: &[Option<String>; SLOT_COUNT]) {
        for (image, fallback) in self.slot_images.iter_mut().zip(defaults) {
            let absent = image.as_deref().map_or(true, str::is_empty);
            if absent {
                image.clone_from(fallback);
            }
        }
    }
}

fn remove_from(list: &mut Vec<CardId>, id: &CardId) -> bool {
    let before = list.len();
    list.retain(|c| c != id);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    #[test]
    fn test_new_hand_is_empty_and_fixed_width() {
        let hand = Hand::new("h1", "Table");
        assert!(hand.cards.is_empty());
        assert_eq!(hand.slots.len(), SLOT_COUNT);
        assert_eq!(hand.slot_images.len(), SLOT_COUNT);
        assert_eq!(hand.linked_deck(), None);
    }

    #[test]
    fn test_set_slot_returns_previous() {
        let mut hand = Hand::new("h1", "Table");
        assert_eq!(hand.set_slot(3, id("a")), Ok(None));
        assert_eq!(hand.set_slot(3, id("b")), Ok(Some(id("a"))));
        assert_eq!(hand.slot(3), Some(&id("b")));
        assert_eq!(hand.slot(99), None);
    }

    #[test]
    fn test_set_slot_out_of_range() {
        let mut hand = Hand::new("h1", "Table");
        assert_eq!(hand.set_slot(SLOT_COUNT, id("a")), Err(Warning::SlotOutOfRange(SLOT_COUNT)));
        assert!(!hand.holds(&id("a")));
    }

    #[test]
    fn test_remove_everywhere_in_hand() {
        let mut hand = Hand::new("h1", "Table").with_cards([id("a"), id("b")]);
        hand.discard.push(id("a"));
        hand.set_slot(0, id("a")).unwrap();

        assert!(hand.holds(&id("a")));
        assert!(hand.remove(&id("a")));
        assert!(!hand.holds(&id("a")));
        assert_eq!(hand.cards, vec![id("b")]);
    }

    #[test]
    fn test_remove_from_lists_keeps_slots() {
        let mut hand = Hand::new("h1", "Table").with_cards([id("a")]);
        hand.set_slot(1, id("a")).unwrap();

        assert!(hand.remove_from_lists(&id("a")));
        assert_eq!(hand.slot(1), Some(&id("a")));
    }

    #[test]
    fn test_all_cards_union() {
        let mut hand = Hand::new("h1", "Table").with_cards([id("a"), id("b")]);
        hand.discard = vec![id("c"), id("a")];
        hand.set_slot(5, id("d")).unwrap();
        hand.set_slot(6, id("b")).unwrap();

        assert_eq!(hand.all_cards(), vec![id("a"), id("b"), id("c"), id("d")]);
    }

    #[test]
    fn test_linked_deck_ignores_falsy() {
        let hand = Hand::new("h1", "Table").linked_to("");
        assert_eq!(hand.linked_deck(), None);

        let hand = Hand::new("h1", "Table").linked_to("d1");
        assert_eq!(hand.linked_deck(), Some(&DeckId::new("d1")));
    }

    #[test]
    fn test_default_slot_images() {
        let mut defaults: [Option<String>; SLOT_COUNT] = Default::default();
        defaults[0] = Some("bg0.png".into());
        defaults[1] = Some("bg1.png".into());

        let mut hand = Hand::new("h1", "Table");
        hand.slot_images[1] = Some("custom.png".into());
        hand.apply_default_slot_images(&defaults);

        assert_eq!(hand.slot_images[0].as_deref(), Some("bg0.png"));
        assert_eq!(hand.slot_images[1].as_deref(), Some("custom.png"));
        assert_eq!(hand.slot_images[2], None);
    }

    #[test]
    fn test_decode_camel_case() {
        let hand: Hand = serde_json::from_str(
            r#"{"id": "h1", "name": "T", "cards": ["a"], "slots": ["x"], "srcDeckId": "d1"}"#,
        )
        .unwrap();

        assert_eq!(hand.cards, vec![id("a")]);
        assert_eq!(hand.slot(0), Some(&id("x")));
        assert_eq!(hand.slots.len(), SLOT_COUNT);
        assert_eq!(hand.linked_deck(), Some(&DeckId::new("d1")));

        let json = serde_json::to_value(&hand).unwrap();
        assert!(json.get("slotImages").is_some());
        assert!(json.get("srcDeckId").is_some());
    }
}

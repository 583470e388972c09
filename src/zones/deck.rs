//! Decks - ordered stacks of card ids.
//!
//! Index 0 is the bottom of the deck, the last element is the top.

use serde::{Deserialize, Serialize};

use super::wire::nullable_seq;
use crate::core::ids::{CardId, DeckId};
use crate::core::rng::BinderRng;

/// Where to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    /// Last element.
    Top,
    /// First element.
    Bottom,
    /// Uniformly random position.
    Random,
}

/// A named deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,

    #[serde(default)]
    pub name: String,

    #[serde(default, with = "nullable_seq")]
    pub cards: Vec<CardId>,
}

impl Deck {
    #[must_use]
    pub fn new(id: impl Into<DeckId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.cards.extend(cards);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains(id)
    }

    #[must_use]
    pub fn top(&self) -> Option<&CardId> {
        self.cards.last()
    }

    /// Append to the top unless already present.
    pub fn push_top(&mut self, id: CardId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.cards.push(id);
        true
    }

    /// Insert at index 0 unless already present.
    pub fn push_front(&mut self, id: CardId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.cards.insert(0, id);
        true
    }

    /// Remove every occurrence of `id`. Returns true if any was found.
    pub fn remove(&mut self, id: &CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c != id);
        self.cards.len() != before
    }

    /// Remove and return one card per `mode`.
    pub fn draw(&mut self, mode: DrawMode, rng: &mut BinderRng) -> Option<CardId> {
        if self.cards.is_empty() {
            return None;
        }
        match mode {
            DrawMode::Top => self.cards.pop(),
            DrawMode::Bottom => Some(self.cards.remove(0)),
            DrawMode::Random => {
                let i = rng.index(self.cards.len());
                Some(self.cards.remove(i))
            }
        }
    }

    pub fn shuffle(&mut self, rng: &mut BinderRng) {
        rng.shuffle(&mut self.cards);
    }
}

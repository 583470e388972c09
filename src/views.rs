//! Read-only views for rendering.
//!
//! Nothing here mutates the collection. Views resolve display state through
//! the Registry, falling back to the Catalog name.

use serde::{Deserialize, Serialize};

use crate::cards::Rarity;
use crate::collection::Collection;
use crate::core::config::{BinderConfig, UNIVERSAL_PACK};
use crate::core::ids::{CardId, DeckId, HandId};
use crate::zones::{ZoneRef, SLOT_COUNT};

/// One card as a list renders it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub name: String,
    pub image: Option<String>,
    pub rarity: Rarity,
}

/// Narrowing of a card list. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Case-insensitive substring of the name.
    pub text: Option<String>,
    /// Tag the card must carry (case-insensitive).
    pub tag: Option<String>,
    pub rarity: Option<Rarity>,
}

impl ViewFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }
}

/// List ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Order as stored in the zone.
    #[default]
    Stored,
    /// By name, case-insensitive.
    Name,
    /// By rarity, ties by name.
    Rarity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub id: DeckId,
    pub name: String,
    pub size: usize,
    /// Hands drawing from this deck.
    pub linked_hands: Vec<HandId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    pub id: HandId,
    pub name: String,
    pub cards: usize,
    pub discard: usize,
    pub slots_filled: usize,
    pub linked_deck: Option<DeckId>,
}

/// A pack type as the pack picker shows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackTile {
    pub key: String,
    pub image: Option<String>,
}

impl Collection {
    #[must_use]
    pub fn card_view(&self, id: &CardId) -> CardView {
        CardView {
            id: id.clone(),
            name: self.display_name(id).to_string(),
            image: self.registry.image(id).map(str::to_string),
            rarity: self.registry.rarity(id),
        }
    }

    /// Ids in a zone, in stored order. Empty if the zone does not exist.
    #[must_use]
    pub fn zone_ids(&self, zone: &ZoneRef) -> Vec<CardId> {
        let zones = &self.zones;
        match zone {
            ZoneRef::Catalog => self.catalog.iter().map(|c| c.id.clone()).collect(),
            ZoneRef::Pool => zones.pool.clone(),
            ZoneRef::Deck(d) => zones.deck(d).map(|d| d.cards.clone()).unwrap_or_default(),
            ZoneRef::HandCards(h) => zones.hand(h).map(|h| h.cards.clone()).unwrap_or_default(),
            ZoneRef::HandDiscard(h) => zones.hand(h).map(|h| h.discard.clone()).unwrap_or_default(),
            ZoneRef::HandSlot(h, i) => zones
                .hand(h)
                .and_then(|h| h.slot(*i))
                .cloned()
                .into_iter()
                .collect(),
        }
    }

    /// Filtered, sorted cards of one zone.
    #[must_use]
    pub fn zone_view(&self, zone: &ZoneRef, filter: &ViewFilter, order: SortOrder) -> Vec<CardView> {
        let mut views: Vec<CardView> = self
            .zone_ids(zone)
            .iter()
            .filter(|id| self.matches(id, filter))
            .map(|id| self.card_view(id))
            .collect();

        match order {
            SortOrder::Stored => {}
            SortOrder::Name => views.sort_by_cached_key(|v| v.name.to_lowercase()),
            SortOrder::Rarity => views.sort_by_cached_key(|v| (v.rarity, v.name.to_lowercase())),
        }
        views
    }

    /// A hand's slots, always ten entries.
    #[must_use]
    pub fn slot_views(&self, hand: &HandId) -> [Option<CardView>; SLOT_COUNT] {
        let mut views: [Option<CardView>; SLOT_COUNT] = Default::default();
        if let Some(hand) = self.zones.hand(hand) {
            for (view, slot) in views.iter_mut().zip(&hand.slots) {
                *view = slot.as_ref().map(|id| self.card_view(id));
            }
        }
        views
    }

    #[must_use]
    pub fn deck_summaries(&self) -> Vec<DeckSummary> {
        self.zones
            .decks
            .iter()
            .map(|deck| DeckSummary {
                id: deck.id.clone(),
                name: deck.name.clone(),
                size: deck.len(),
                linked_hands: self
                    .zones
                    .hands
                    .iter()
                    .filter(|h| h.linked_deck() == Some(&deck.id))
                    .map(|h| h.id.clone())
                    .collect(),
            })
            .collect()
    }

    #[must_use]
    pub fn hand_summaries(&self) -> Vec<HandSummary> {
        self.zones
            .hands
            .iter()
            .map(|hand| HandSummary {
                id: hand.id.clone(),
                name: hand.name.clone(),
                cards: hand.cards.len(),
                discard: hand.discard.len(),
                slots_filled: hand.slots.iter().flatten().count(),
                linked_deck: hand.linked_deck().cloned(),
            })
            .collect()
    }

    /// Configured pack types, `Universal` first.
    ///
    /// An image the user set on the collection beats the configured one.
    #[must_use]
    pub fn pack_tiles(&self, config: &BinderConfig) -> Vec<PackTile> {
        let mut packs: Vec<_> = config.packs.iter().collect();
        packs.sort_by_key(|p| !p.key.eq_ignore_ascii_case(UNIVERSAL_PACK));

        packs
            .into_iter()
            .map(|pack| PackTile {
                key: pack.key.clone(),
                image: self
                    .pack_images
                    .get(&pack.key)
                    .cloned()
                    .or_else(|| pack.image.clone()),
            })
            .collect()
    }

    fn matches(&self, id: &CardId, filter: &ViewFilter) -> bool {
        if let Some(text) = filter.text.as_deref().filter(|t| !t.is_empty()) {
            let name = self.display_name(id).to_lowercase();
            if !name.contains(&text.to_lowercase()) {
                return false;
            }
        }
        if let Some(tag) = filter.tag.as_deref().filter(|t| !t.is_empty()) {
            if !self.registry.meta(id).is_some_and(|m| m.has_tag(tag)) {
                return false;
            }
        }
        filter.rarity.map_or(true, |r| self.registry.rarity(id) == r)
    }
}

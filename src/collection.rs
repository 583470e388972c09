//! The whole binder document: Catalog, Registry, zones and pack images.
//!
//! ## Key Types
//!
//! - `Collection`: the single store value every operation takes by `&mut`
//! - `CardEdit`: partial update for `edit_card`
//!
//! Every mutator here ends with a reconciliation pass, so a `Collection`
//! handed back to the caller always satisfies the ownership invariants.
//!
//! ## Usage
//!
//! ```
//! use card_binder::cards::{CardMeta, Rarity};
//! use card_binder::collection::Collection;
//! use card_binder::core::BinderRng;
//!
//! let mut rng = BinderRng::new(1);
//! let mut binder = Collection::new();
//!
//! let bolt = binder.create_card("Bolt", None, CardMeta::new("Spell", Rarity::Rare), &mut rng);
//! let deck = binder.create_deck("Burn", &mut rng);
//!
//! assert!(binder.in_catalog(&bolt));
//! assert_eq!(binder.zones.deck(&deck).map(|d| d.name.as_str()), Some("Burn"));
//! ```

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cards::{CardDefinition, CardMeta, CardRegistry};
use crate::core::error::Warning;
use crate::core::ids::{CardId, DeckId, HandId};
use crate::core::rng::BinderRng;
use crate::zones::{Deck, Hand, ZoneStore, SLOT_COUNT};

/// Catalog + Registry + zones + per-pack tile images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collection {
    /// Master definitions, the templates for cloning.
    pub catalog: Vec<CardDefinition>,
    pub registry: CardRegistry,
    pub zones: ZoneStore,
    /// Pack key -> tile image chosen by the user.
    pub pack_images: FxHashMap<String, String>,
}

/// Partial update of a card's display state.
///
/// `None` leaves a field alone. `image: Some(None)` clears the image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardEdit {
    pub name: Option<String>,
    pub image: Option<Option<String>>,
    pub meta: Option<CardMeta>,
}

impl CardEdit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: CardMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_catalog(&self, id: &CardId) -> bool {
        self.catalog.iter().any(|c| &c.id == id)
    }

    #[must_use]
    pub fn catalog_entry(&self, id: &CardId) -> Option<&CardDefinition> {
        self.catalog.iter().find(|c| &c.id == id)
    }

    /// True if the id is in the Catalog, the Registry or any zone.
    #[must_use]
    pub fn is_known(&self, id: &CardId) -> bool {
        !id.is_empty()
            && (self.in_catalog(id) || self.registry.contains(id) || self.zones.contains(id))
    }

    /// Display name: Registry first, then the Catalog entry.
    #[must_use]
    pub fn display_name(&self, id: &CardId) -> &str {
        self.registry
            .name(id)
            .or_else(|| self.catalog_entry(id).map(|c| c.name.as_str()))
            .unwrap_or_default()
    }

    /// Mint a card id no part of the collection uses yet.
    pub fn mint_card_id(&self, rng: &mut BinderRng) -> CardId {
        rng.mint_card_id(|id| self.is_known(id))
    }

    /// Copy the display state of `source` onto a fresh id.
    ///
    /// A Catalog entry without a Registry entry still yields its name.
    /// The new id is not placed in any zone.
    pub(crate) fn clone_card(&mut self, source: &CardId, rng: &mut BinderRng) -> CardId {
        let minted = self.mint_card_id(rng);
        if !self.registry.clone_entry(source, minted.clone()) {
            let name = self.display_name(source).to_string();
            self.registry.set_name(&minted, name);
        }
        minted
    }

    // === Catalog ===

    /// Add a new master card to the Catalog and Registry.
    pub fn create_card(
        &mut self,
        name: impl Into<String>,
        image: Option<String>,
        meta: CardMeta,
        rng: &mut BinderRng,
    ) -> CardId {
        let id = self.mint_card_id(rng);
        let name = name.into();
        self.catalog.push(CardDefinition::new(id.clone(), name.clone()));
        self.registry.insert(id.clone(), name, image, meta);
        debug!(card = %id, "created catalog card");
        self.reconcile();
        id
    }

    /// Update the display state of any known card.
    ///
    /// Renaming a Catalog id renames its Catalog entry as well.
    pub fn edit_card(&mut self, id: &CardId, edit: CardEdit) -> Result<(), Warning> {
        if !self.is_known(id) {
            return Err(Warning::CardNotFound(id.clone()));
        }

        if let Some(name) = edit.name {
            if let Some(entry) = self.catalog.iter_mut().find(|c| &c.id == id) {
                entry.name.clone_from(&name);
            }
            self.registry.set_name(id, name);
        }
        if let Some(image) = edit.image {
            self.registry.set_image(id, image);
        }
        if let Some(meta) = edit.meta {
            self.registry.set_meta(id, meta);
        }

        self.reconcile();
        Ok(())
    }

    // === Decks ===

    pub fn create_deck(&mut self, name: impl Into<String>, rng: &mut BinderRng) -> DeckId {
        let id = DeckId::new(rng.mint("d", |raw| self.zones.decks.iter().any(|d| d.id.as_str() == raw)));
        self.zones.decks.push(Deck::new(id.clone(), name));
        id
    }

    pub fn rename_deck(&mut self, id: &DeckId, name: impl Into<String>) -> Result<(), Warning> {
        let deck = self
            .zones
            .deck_mut(id)
            .ok_or_else(|| Warning::DeckNotFound(id.clone()))?;
        deck.name = name.into();
        Ok(())
    }

    /// Delete a deck. Its cards go to the Pool and linked hands are unlinked.
    ///
    /// Returns the released card ids.
    pub fn delete_deck(&mut self, id: &DeckId) -> Result<Vec<CardId>, Warning> {
        let index = self
            .zones
            .decks
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| Warning::DeckNotFound(id.clone()))?;

        let deck = self.zones.decks.remove(index);
        for hand in self.zones.hands.iter_mut() {
            if hand.src_deck_id.as_ref() == Some(id) {
                hand.src_deck_id = None;
            }
        }
        self.zones.pool.extend(deck.cards.iter().cloned());
        debug!(deck = %id, released = deck.cards.len(), "deleted deck");

        self.reconcile();
        Ok(deck.cards)
    }

    pub fn shuffle_deck(&mut self, id: &DeckId, rng: &mut BinderRng) -> Result<(), Warning> {
        self.zones
            .deck_mut(id)
            .ok_or_else(|| Warning::DeckNotFound(id.clone()))?
            .shuffle(rng);
        Ok(())
    }

    // === Hands ===

    /// Create a hand, optionally linked to an existing deck.
    pub fn create_hand(
        &mut self,
        name: impl Into<String>,
        src_deck: Option<DeckId>,
        default_images: &[Option<String>; SLOT_COUNT],
        rng: &mut BinderRng,
    ) -> Result<HandId, Warning> {
        if let Some(deck) = &src_deck {
            self.zones.require_deck(deck)?;
        }
        let id = HandId::new(rng.mint("h", |raw| self.zones.hands.iter().any(|h| h.id.as_str() == raw)));

        let mut hand = Hand::new(id.clone(), name);
        hand.src_deck_id = src_deck;
        hand.apply_default_slot_images(default_images);
        self.zones.hands.push(hand);
        Ok(id)
    }

    pub fn rename_hand(&mut self, id: &HandId, name: impl Into<String>) -> Result<(), Warning> {
        self.hand_or_warn(id)?.name = name.into();
        Ok(())
    }

    /// Set or clear the deck a hand draws from.
    pub fn link_hand(&mut self, id: &HandId, deck: Option<DeckId>) -> Result<(), Warning> {
        if let Some(deck) = &deck {
            self.zones.require_deck(deck)?;
        }
        self.hand_or_warn(id)?.src_deck_id = deck;
        Ok(())
    }

    /// Delete a hand. Cards, discard and slot cards go to the Pool.
    pub fn delete_hand(&mut self, id: &HandId) -> Result<Vec<CardId>, Warning> {
        let index = self
            .zones
            .hands
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| Warning::HandNotFound(id.clone()))?;

        let released = self.zones.hands.remove(index).all_cards();
        self.zones.pool.extend(released.iter().cloned());
        debug!(hand = %id, released = released.len(), "deleted hand");

        self.reconcile();
        Ok(released)
    }

    /// Set or clear one slot's background image.
    pub fn set_slot_image(
        &mut self,
        id: &HandId,
        index: usize,
        image: Option<String>,
    ) -> Result<(), Warning> {
        if index >= SLOT_COUNT {
            return Err(Warning::SlotOutOfRange(index));
        }
        self.hand_or_warn(id)?.slot_images[index] = image.filter(|i| !i.is_empty());
        Ok(())
    }

    /// Set or clear the tile image of a pack type.
    pub fn set_pack_image(&mut self, pack_key: &str, image: Option<String>) {
        match image.filter(|i| !i.is_empty()) {
            Some(image) => {
                self.pack_images.insert(pack_key.to_string(), image);
            }
            None => {
                self.pack_images.remove(pack_key);
            }
        }
    }

    fn hand_or_warn(&mut self, id: &HandId) -> Result<&mut Hand, Warning> {
        self.zones
            .hand_mut(id)
            .ok_or_else(|| Warning::HandNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rarity;
    use crate::zones::ZoneRef;

    fn no_images() -> [Option<String>; SLOT_COUNT] {
        Default::default()
    }

    #[test]
    fn test_create_card_enters_catalog_and_registry() {
        let mut rng = BinderRng::new(1);
        let mut binder = Collection::new();

        let id = binder.create_card("Bolt", Some("bolt.png".into()), CardMeta::default(), &mut rng);

        assert!(binder.in_catalog(&id));
        assert_eq!(binder.registry.name(&id), Some("Bolt"));
        assert_eq!(binder.registry.image(&id), Some("bolt.png"));
        assert!(binder.zones.locate(&id).is_empty());
    }

    #[test]
    fn test_edit_card_propagates_rename_to_catalog() {
        let mut rng = BinderRng::new(1);
        let mut binder = Collection::new();
        let id = binder.create_card("Bolt", None, CardMeta::default(), &mut rng);

        binder
            .edit_card(
                &id,
                CardEdit::new()
                    .name("Lightning Bolt")
                    .meta(CardMeta::new("Instant", Rarity::Uncommon)),
            )
            .unwrap();

        assert_eq!(binder.catalog_entry(&id).unwrap().name, "Lightning Bolt");
        assert_eq!(binder.registry.name(&id), Some("Lightning Bolt"));
        assert_eq!(binder.registry.rarity(&id), Rarity::Uncommon);
    }

    #[test]
    fn test_edit_unknown_card_warns_without_change() {
        let mut binder = Collection::new();
        let before = binder.clone();

        let result = binder.edit_card(&CardId::new("ghost"), CardEdit::new().name("x"));
        assert_eq!(result, Err(Warning::CardNotFound(CardId::new("ghost"))));
        assert_eq!(binder, before);
    }

    #[test]
    fn test_delete_deck_releases_cards_and_unlinks_hands() {
        let mut rng = BinderRng::new(2);
        let mut binder = Collection::new();
        let deck = binder.create_deck("Main", &mut rng);
        let hand = binder
            .create_hand("Table", Some(deck.clone()), &no_images(), &mut rng)
            .unwrap();
        binder.zones.insert(&ZoneRef::Deck(deck.clone()), CardId::new("a")).unwrap();
        binder.registry.set_name(&CardId::new("a"), "A");

        let released = binder.delete_deck(&deck).unwrap();

        assert_eq!(released, vec![CardId::new("a")]);
        assert_eq!(binder.zones.pool, vec![CardId::new("a")]);
        assert_eq!(binder.zones.hand(&hand).unwrap().src_deck_id, None);
        assert_eq!(binder.delete_deck(&deck), Err(Warning::DeckNotFound(deck)));
    }

    #[test]
    fn test_delete_hand_releases_everything() {
        let mut rng = BinderRng::new(3);
        let mut binder = Collection::new();
        let hand = binder.create_hand("Table", None, &no_images(), &mut rng).unwrap();
        {
            let h = binder.zones.hand_mut(&hand).unwrap();
            h.cards.push(CardId::new("a"));
            h.discard.push(CardId::new("b"));
            h.set_slot(4, CardId::new("c")).unwrap();
        }

        let released = binder.delete_hand(&hand).unwrap();

        assert_eq!(released.len(), 3);
        assert_eq!(binder.zones.pool.len(), 3);
        assert!(binder.zones.hands.is_empty());
    }

    #[test]
    fn test_create_hand_requires_existing_deck() {
        let mut rng = BinderRng::new(4);
        let mut binder = Collection::new();

        let result = binder.create_hand("T", Some(DeckId::new("nope")), &no_images(), &mut rng);
        assert_eq!(result, Err(Warning::DeckNotFound(DeckId::new("nope"))));
        assert!(binder.zones.hands.is_empty());
    }

    #[test]
    fn test_link_and_rename() {
        let mut rng = BinderRng::new(5);
        let mut binder = Collection::new();
        let deck = binder.create_deck("Main", &mut rng);
        let hand = binder.create_hand("Table", None, &no_images(), &mut rng).unwrap();

        binder.link_hand(&hand, Some(deck.clone())).unwrap();
        binder.rename_hand(&hand, "Board").unwrap();
        binder.rename_deck(&deck, "Side").unwrap();

        let h = binder.zones.hand(&hand).unwrap();
        assert_eq!(h.linked_deck(), Some(&deck));
        assert_eq!(h.name, "Board");
        assert_eq!(binder.zones.deck(&deck).unwrap().name, "Side");

        binder.link_hand(&hand, None).unwrap();
        assert_eq!(binder.zones.hand(&hand).unwrap().linked_deck(), None);
    }

    #[test]
    fn test_slot_and_pack_images() {
        let mut rng = BinderRng::new(6);
        let mut binder = Collection::new();
        let hand = binder.create_hand("Table", None, &no_images(), &mut rng).unwrap();

        binder.set_slot_image(&hand, 2, Some("bg.png".into())).unwrap();
        assert_eq!(
            binder.set_slot_image(&hand, SLOT_COUNT, None),
            Err(Warning::SlotOutOfRange(SLOT_COUNT))
        );
        assert_eq!(
            binder.zones.hand(&hand).unwrap().slot_images[2].as_deref(),
            Some("bg.png")
        );

        binder.set_pack_image("Fire", Some("fire.png".into()));
        assert_eq!(binder.pack_images.get("Fire").map(String::as_str), Some("fire.png"));
        binder.set_pack_image("Fire", Some(String::new()));
        assert!(binder.pack_images.is_empty());
    }
}

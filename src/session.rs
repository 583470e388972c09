//! Single-writer session over a collection and its store.
//!
//! A `Session` owns the in-memory collection, the RNG, the configuration
//! and the snapshot store. Every mutation is a transaction:
//!
//! 1. clone the collection
//! 2. run the operation on the clone
//! 3. reconcile and (in debug builds) validate
//! 4. swap the clone in and save
//!
//! An operation that refuses with a warning leaves the collection untouched.
//! Saved snapshots carry the RNG position, so reopening a seeded session
//! continues its stream instead of replaying it.
//! Because every mutator takes `&mut self`, the borrow checker enforces a
//! single writer; share a session across threads behind a `Mutex`.
//!
//! ## Usage
//!
//! ```
//! use card_binder::cards::{CardMeta, Rarity};
//! use card_binder::core::BinderConfig;
//! use card_binder::persist::MemoryStore;
//! use card_binder::session::Session;
//! use card_binder::zones::{DrawMode, ZoneRef};
//!
//! let mut session = Session::open(MemoryStore::new(), BinderConfig::new().with_seed(5)).unwrap();
//! let master = session.create_card("Bolt", None, CardMeta::new("Spell", Rarity::Rare)).unwrap();
//! let deck = session.create_deck("Burn").unwrap();
//! let hand = session.create_hand("Table", Some(deck.clone())).unwrap();
//!
//! session.move_card(&master, &ZoneRef::Catalog, &ZoneRef::Deck(deck)).unwrap();
//! let drawn = session.draw_to_hand(&hand, 1, DrawMode::Top).unwrap();
//!
//! assert_eq!(drawn.len(), 1);
//! assert_eq!(session.store().saves(), 5);
//! ```

use tracing::{debug, info, warn};

use crate::booster::BoosterPack;
use crate::cards::CardMeta;
use crate::collection::{CardEdit, Collection};
use crate::core::config::BinderConfig;
use crate::core::error::{PersistError, SessionError, Warning};
use crate::core::ids::{CardId, DeckId, HandId};
use crate::core::rng::BinderRng;
use crate::persist::{Snapshot, SnapshotStore};
use crate::reconcile::validate;
use crate::transfer::Placement;
use crate::zones::{DrawMode, ZoneRef};

/// Result type of session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// A collection bound to its store.
pub struct Session<S: SnapshotStore> {
    collection: Collection,
    config: BinderConfig,
    rng: BinderRng,
    store: S,
}

impl<S: SnapshotStore> Session<S> {
    /// Load the stored snapshot and normalize it.
    pub fn open(mut store: S, config: BinderConfig) -> Result<Self, PersistError> {
        let mut snapshot = store.load()?;
        let rng = match (snapshot.rng.take(), config.seed) {
            (Some(state), seed) if seed.map_or(true, |s| s == state.seed) => BinderRng::from_state(&state),
            (_, Some(seed)) => BinderRng::new(seed),
            (_, None) => BinderRng::from_entropy(),
        };
        let collection = snapshot.into_collection(&config.default_slot_images);

        info!(
            catalog = collection.catalog.len(),
            decks = collection.zones.decks.len(),
            hands = collection.zones.hands.len(),
            cards = collection.zones.total_cards(),
            seed = rng.seed(),
            "opened binder session"
        );
        Ok(Self {
            collection,
            config,
            rng,
            store,
        })
    }

    #[must_use]
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    #[must_use]
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand back the store, dropping the in-memory state.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The collection and RNG position as a saveable document.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rng: Some(self.rng.state()),
            ..Snapshot::from(&self.collection)
        }
    }

    /// Persist the current collection.
    pub fn save(&mut self) -> Result<(), PersistError> {
        let snapshot = self.snapshot();
        self.store.save(&snapshot)
    }

    /// Run `op` as one transaction.
    pub fn transact<T>(
        &mut self,
        label: &'static str,
        op: impl FnOnce(&mut Collection, &mut BinderRng, &BinderConfig) -> Result<T, Warning>,
    ) -> SessionResult<T> {
        let mut working = self.collection.clone();
        let value = match op(&mut working, &mut self.rng, &self.config) {
            Ok(value) => value,
            Err(warning) => {
                warn!(op = label, %warning, "operation refused");
                return Err(warning.into());
            }
        };

        working.reconcile();
        debug_assert!(
            validate(&working).is_ok(),
            "{label} left an invalid collection: {:?}",
            validate(&working)
        );
        self.collection = working;
        debug!(op = label, "committed");

        self.save()?;
        Ok(value)
    }

    // === Transfer ===

    pub fn move_card(&mut self, card: &CardId, from: &ZoneRef, to: &ZoneRef) -> SessionResult<Placement> {
        self.transact("move_card", |c, rng, cfg| {
            c.move_card(card, from, to, cfg.displaced_card_policy, rng)
        })
    }

    pub fn move_card_to_slot(
        &mut self,
        card: &CardId,
        from: &ZoneRef,
        hand: &HandId,
        index: usize,
    ) -> SessionResult<Placement> {
        self.transact("move_card_to_slot", |c, rng, cfg| {
            c.move_card_to_slot(card, from, hand, index, cfg.displaced_card_policy, rng)
        })
    }

    pub fn return_card_to_linked_deck(&mut self, hand: &HandId, card: &CardId) -> SessionResult<()> {
        self.transact("return_card_to_linked_deck", |c, _, _| {
            c.return_card_to_linked_deck(hand, card)
        })
    }

    pub fn return_all_to_linked_deck(&mut self, hand: &HandId) -> SessionResult<Vec<CardId>> {
        self.transact("return_all_to_linked_deck", |c, _, _| c.return_all_to_linked_deck(hand))
    }

    pub fn draw_to_hand(&mut self, hand: &HandId, count: usize, mode: DrawMode) -> SessionResult<Vec<CardId>> {
        self.transact("draw_to_hand", |c, rng, _| c.draw_to_hand(hand, count, mode, rng))
    }

    pub fn mulligan(&mut self, hand: &HandId, count: usize) -> SessionResult<Vec<CardId>> {
        self.transact("mulligan", |c, rng, _| c.mulligan(hand, count, rng))
    }

    pub fn delete_card(&mut self, card: &CardId) -> SessionResult<()> {
        self.transact("delete_card", |c, _, cfg| c.delete_card(card, cfg.slot_delete_policy))
    }

    // === Boosters ===

    /// Open a pack. A short pack is committed and reported on the result.
    pub fn open_booster(&mut self, pack_key: &str) -> SessionResult<BoosterPack> {
        self.transact("open_booster", |c, rng, cfg| c.open_booster(pack_key, cfg, rng))
    }

    // === Catalog and containers ===

    pub fn create_card(
        &mut self,
        name: &str,
        image: Option<String>,
        meta: CardMeta,
    ) -> SessionResult<CardId> {
        self.transact("create_card", |c, rng, _| Ok(c.create_card(name, image, meta, rng)))
    }

    pub fn edit_card(&mut self, card: &CardId, edit: CardEdit) -> SessionResult<()> {
        self.transact("edit_card", |c, _, _| c.edit_card(card, edit))
    }

    pub fn create_deck(&mut self, name: &str) -> SessionResult<DeckId> {
        self.transact("create_deck", |c, rng, _| Ok(c.create_deck(name, rng)))
    }

    pub fn rename_deck(&mut self, deck: &DeckId, name: &str) -> SessionResult<()> {
        self.transact("rename_deck", |c, _, _| c.rename_deck(deck, name))
    }

    pub fn delete_deck(&mut self, deck: &DeckId) -> SessionResult<Vec<CardId>> {
        self.transact("delete_deck", |c, _, _| c.delete_deck(deck))
    }

    pub fn shuffle_deck(&mut self, deck: &DeckId) -> SessionResult<()> {
        self.transact("shuffle_deck", |c, rng, _| c.shuffle_deck(deck, rng))
    }

    pub fn create_hand(&mut self, name: &str, src_deck: Option<DeckId>) -> SessionResult<HandId> {
        self.transact("create_hand", |c, rng, cfg| {
            c.create_hand(name, src_deck, &cfg.default_slot_images, rng)
        })
    }

    pub fn rename_hand(&mut self, hand: &HandId, name: &str) -> SessionResult<()> {
        self.transact("rename_hand", |c, _, _| c.rename_hand(hand, name))
    }

    pub fn link_hand(&mut self, hand: &HandId, deck: Option<DeckId>) -> SessionResult<()> {
        self.transact("link_hand", |c, _, _| c.link_hand(hand, deck))
    }

    pub fn delete_hand(&mut self, hand: &HandId) -> SessionResult<Vec<CardId>> {
        self.transact("delete_hand", |c, _, _| c.delete_hand(hand))
    }

    pub fn set_slot_image(&mut self, hand: &HandId, index: usize, image: Option<String>) -> SessionResult<()> {
        self.transact("set_slot_image", |c, _, _| c.set_slot_image(hand, index, image))
    }

    pub fn set_pack_image(&mut self, pack_key: &str, image: Option<String>) -> SessionResult<()> {
        self.transact("set_pack_image", |c, _, _| {
            c.set_pack_image(pack_key, image);
            Ok(())
        })
    }
}

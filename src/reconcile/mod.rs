//! Ownership reconciliation.
//!
//! `reconcile` restores every collection invariant in one deterministic
//! pass:
//!
//! 1. Decks: drop empty and repeated ids. An id already owned by an earlier
//!    deck is dropped from later ones.
//! 2. Hands: the same for `cards` and `discard`. Slots holding an empty id
//!    or an id the hand set already owns are emptied. Within a hand the
//!    order is cards, discard, then slots by index; earlier hands win.
//! 3. Pool: drop ids owned by any hand or deck, then dedupe.
//! 4. Decks lose every id a hand owns.
//! 5. Catalog: dedupe by id.
//! 6. Registry: prune every id nothing references.
//!
//! The pass is idempotent: `reconcile(reconcile(s)) == reconcile(s)`.
//!
//! ```
//! use card_binder::collection::Collection;
//! use card_binder::core::CardId;
//! use card_binder::reconcile::reconcile;
//! use card_binder::zones::{Deck, Hand};
//!
//! let x = CardId::new("x");
//! let mut binder = Collection::new();
//! binder.zones.decks.push(Deck::new("d1", "Main").with_cards([x.clone()]));
//! binder.zones.hands.push(Hand::new("h1", "Table").with_cards([x.clone()]));
//!
//! let binder = reconcile(binder);
//! assert!(binder.zones.decks[0].is_empty());
//! assert_eq!(binder.zones.hands[0].cards, vec![x]);
//! ```

mod validate;

pub use validate::{validate, InvariantViolation};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::collection::Collection;
use crate::core::ids::CardId;

/// What a reconciliation pass repaired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Zone entries removed (empty ids, repeats, lower-precedence copies).
    pub dropped: usize,
    /// Catalog entries removed as duplicates.
    pub catalog_dropped: usize,
    /// Registry ids pruned as orphans.
    pub pruned: usize,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.catalog_dropped == 0 && self.pruned == 0
    }
}

/// Reconcile a collection by value.
#[must_use]
pub fn reconcile(mut collection: Collection) -> Collection {
    collection.reconcile();
    collection
}

impl Collection {
    /// Restore every invariant in place.
    pub fn reconcile(&mut self) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let zones = &mut self.zones;

        let mut deck_owned: FxHashSet<CardId> = FxHashSet::default();
        for deck in zones.decks.iter_mut() {
            report.dropped += claim_all(&mut deck.cards, &mut deck_owned);
        }

        let mut hand_owned: FxHashSet<CardId> = FxHashSet::default();
        for hand in zones.hands.iter_mut() {
            report.dropped += claim_all(&mut hand.cards, &mut hand_owned);
            report.dropped += claim_all(&mut hand.discard, &mut hand_owned);
            for slot in hand.slots.iter_mut() {
                let keep = match slot.as_ref() {
                    Some(id) => claim(id, &mut hand_owned),
                    None => true,
                };
                if !keep {
                    *slot = None;
                    report.dropped += 1;
                }
            }
            for image in hand.slot_images.iter_mut() {
                if image.as_deref() == Some("") {
                    *image = None;
                }
            }
        }

        let mut pool_seen: FxHashSet<CardId> = FxHashSet::default();
        let before = zones.pool.len();
        zones.pool.retain(|id| {
            !id.is_empty()
                && !hand_owned.contains(id)
                && !deck_owned.contains(id)
                && pool_seen.insert(id.clone())
        });
        report.dropped += before - zones.pool.len();

        for deck in zones.decks.iter_mut() {
            let before = deck.cards.len();
            deck.cards.retain(|id| !hand_owned.contains(id));
            report.dropped += before - deck.cards.len();
        }

        let mut catalog_seen: FxHashSet<CardId> = FxHashSet::default();
        let before = self.catalog.len();
        self.catalog
            .retain(|c| !c.id.is_empty() && catalog_seen.insert(c.id.clone()));
        report.catalog_dropped = before - self.catalog.len();

        let mut referenced = catalog_seen;
        referenced.extend(pool_seen);
        referenced.extend(hand_owned);
        for deck in &zones.decks {
            referenced.extend(deck.cards.iter().cloned());
        }
        report.pruned = self.registry.prune(&referenced);

        if !report.is_clean() {
            debug!(
                dropped = report.dropped,
                catalog_dropped = report.catalog_dropped,
                pruned = report.pruned,
                "reconciled collection"
            );
        }
        report
    }
}

/// Claim `id` for an owner set. False if empty or already claimed.
fn claim(id: &CardId, owned: &mut FxHashSet<CardId>) -> bool {
    !id.is_empty() && owned.insert(id.clone())
}

/// Keep only ids not yet claimed, claiming them. Returns the number dropped.
fn claim_all(list: &mut Vec<CardId>, owned: &mut FxHashSet<CardId>) -> usize {
    let before = list.len();
    list.retain(|id| claim(id, owned));
    before - list.len()
}

//! Transfer engine: moving, cloning and deleting cards.
//!
//! Every operation here is an `impl Collection` method that validates its
//! inputs first, mutates, and finishes with a reconciliation pass. A
//! returned `Err(Warning)` means nothing changed.
//!
//! ## Operations
//!
//! - `move_card`: clone out of the Catalog, or move between zones
//! - `move_card_to_slot`: same, targeting exactly one hand slot
//! - `delete_card`: remove an id from the Catalog, every zone and the Registry
//! - linked-deck operations (return, draw, mulligan) live in [`linked`]
//!
//! ## Usage
//!
//! ```
//! use card_binder::cards::CardMeta;
//! use card_binder::collection::Collection;
//! use card_binder::core::{BinderRng, DisplacedCardPolicy};
//! use card_binder::zones::ZoneRef;
//!
//! let mut rng = BinderRng::new(3);
//! let mut binder = Collection::new();
//! let master = binder.create_card("Bolt", None, CardMeta::default(), &mut rng);
//! let deck = binder.create_deck("Burn", &mut rng);
//!
//! let placed = binder
//!     .move_card(&master, &ZoneRef::Catalog, &ZoneRef::Deck(deck.clone()), DisplacedCardPolicy::Orphan, &mut rng)
//!     .unwrap();
//!
//! assert_ne!(placed.card, master);
//! assert_eq!(binder.zones.deck(&deck).unwrap().cards, vec![placed.card]);
//! ```

pub mod linked;

use tracing::debug;

use crate::collection::Collection;
use crate::core::config::{DisplacedCardPolicy, SlotDeletePolicy};
use crate::core::error::Warning;
use crate::core::ids::{CardId, HandId};
use crate::core::rng::BinderRng;
use crate::zones::ZoneRef;

/// Where a moved or cloned card ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The id now in the target zone. A fresh id when cloned.
    pub card: CardId,
    /// Catalog id the card was cloned from.
    pub cloned_from: Option<CardId>,
    pub zone: ZoneRef,
    /// Previous occupant of the target slot.
    pub displaced: Option<CardId>,
}

impl Placement {
    fn unchanged(card: &CardId, zone: &ZoneRef) -> Self {
        Self {
            card: card.clone(),
            cloned_from: None,
            zone: zone.clone(),
            displaced: None,
        }
    }
}

impl Collection {
    /// Move `card` from `from` to `to`.
    ///
    /// From the Catalog this is a copy: a new id gets the source's name,
    /// image and meta and is placed in `to`; the Catalog is untouched.
    /// Otherwise the card is removed from every zone and inserted into `to`.
    /// Dropping onto the Catalog does nothing.
    pub fn move_card(
        &mut self,
        card: &CardId,
        from: &ZoneRef,
        to: &ZoneRef,
        policy: DisplacedCardPolicy,
        rng: &mut BinderRng,
    ) -> Result<Placement, Warning> {
        if !self.is_known(card) {
            return Err(Warning::CardNotFound(card.clone()));
        }
        self.zones.check_target(to)?;
        if *to == ZoneRef::Catalog {
            debug!(card = %card, "drop onto catalog ignored");
            return Ok(Placement::unchanged(card, to));
        }

        let (placed, cloned_from) = if *from == ZoneRef::Catalog {
            (self.clone_card(card, rng), Some(card.clone()))
        } else {
            self.zones.remove_everywhere(card);
            (card.clone(), None)
        };

        let inserted = self.zones.insert(to, placed.clone())?;
        if let Some(displaced) = &inserted.displaced {
            match policy {
                DisplacedCardPolicy::Orphan => {
                    debug!(card = %displaced, zone = %to, "slot occupant displaced");
                }
                DisplacedCardPolicy::ReturnToPool => {
                    self.zones.insert(&ZoneRef::Pool, displaced.clone())?;
                }
            }
        }
        debug!(card = %placed, from = %from, to = %to, cloned = cloned_from.is_some(), "moved card");

        self.reconcile();
        Ok(Placement {
            card: placed,
            cloned_from,
            zone: to.clone(),
            displaced: inserted.displaced,
        })
    }

    /// Move or clone `card` into one slot of a hand, overwriting it.
    pub fn move_card_to_slot(
        &mut self,
        card: &CardId,
        from: &ZoneRef,
        hand: &HandId,
        index: usize,
        policy: DisplacedCardPolicy,
        rng: &mut BinderRng,
    ) -> Result<Placement, Warning> {
        self.move_card(card, from, &ZoneRef::HandSlot(hand.clone(), index), policy, rng)
    }

    /// Delete a card from the Catalog, every zone and the Registry.
    ///
    /// With `SlotDeletePolicy::Keep` hand slots still reference the id.
    pub fn delete_card(&mut self, card: &CardId, policy: SlotDeletePolicy) -> Result<(), Warning> {
        if !self.is_known(card) {
            return Err(Warning::CardNotFound(card.clone()));
        }

        self.catalog.retain(|c| &c.id != card);
        match policy {
            SlotDeletePolicy::Clear => self.zones.remove_everywhere(card),
            SlotDeletePolicy::Keep => self.zones.remove_except_slots(card),
        };
        self.registry.remove(card);
        debug!(card = %card, ?policy, "deleted card");

        self.reconcile();
        Ok(())
    }
}

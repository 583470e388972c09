//! Zone system for card locations.
//!
//! Zones are the mutually exclusive containers a card instance can live in:
//! the Pool, any Deck, and a Hand's card list, discard list or one of its
//! ten slots. The Catalog is not a zone.
//!
//! ## Key Types
//!
//! - `ZoneStore`: the Pool, Decks and Hands, with lookup and raw movement
//! - `Deck` / `Hand`: the containers themselves
//! - `ZoneRef`: explicit zone reference passed by callers
//! - `DrawMode`: top / bottom / random draws

pub mod deck;
pub mod hand;
pub mod store;
pub mod wire;
pub mod zone_ref;

/// Number of slots in every hand.
pub const SLOT_COUNT: usize = 10;

pub use deck::{Deck, DrawMode};
pub use hand::Hand;
pub use store::{Inserted, ZoneStore};
pub use wire::{fixed_slots, nullable_seq, normalize_slots};
pub use zone_ref::ZoneRef;

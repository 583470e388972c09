//! # card-binder
//!
//! A persistent card collection: card instances spread across mutually
//! exclusive zones, a master Catalog to clone from, and a booster pack
//! generator.
//!
//! ## Design Principles
//!
//! 1. **Single Ownership**: a card id lives in at most one of the Pool, a
//!    Deck, or a Hand's cards / discard / slots. The reconciler restores
//!    this after every operation, resolving conflicts Hand > Deck > Pool.
//!
//! 2. **Explicit Zones**: callers name source and target with a `ZoneRef`.
//!    The core never guesses a zone.
//!
//! 3. **Nothing Fatal**: operations complete, complete partially and say
//!    so, or refuse with a `Warning` and change nothing. Malformed saved
//!    data is repaired, not rejected.
//!
//! 4. **Deterministic**: all randomness (draws, shuffles, packs, new ids)
//!    comes from one seeded `BinderRng`.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, configuration, errors
//! - `cards`: Catalog definitions, metadata, rarity, the Registry
//! - `zones`: Pool, Decks, Hands and `ZoneRef`
//! - `collection`: the whole document plus catalog/deck/hand management
//! - `reconcile`: the invariant-restoring pass and its validator
//! - `transfer`: moving, cloning, drawing and deleting cards
//! - `booster`: tiered, tag-filtered pack generation
//! - `views`: read-only lists and summaries for rendering
//! - `persist`: snapshots and the stores that keep them
//! - `session`: transactions over a collection and its store

pub mod booster;
pub mod cards;
pub mod collection;
pub mod core;
pub mod persist;
pub mod reconcile;
pub mod session;
pub mod transfer;
pub mod views;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    BinderConfig, BinderRng, BinderRngState, CardId, DeckId, DisplacedCardPolicy, HandId,
    PackConfig, PersistError, SessionError, SlotDeletePolicy, Warning, UNIVERSAL_PACK,
};

pub use crate::cards::{CardDefinition, CardMeta, CardRegistry, Rarity, Tags};

pub use crate::zones::{Deck, DrawMode, Hand, ZoneRef, ZoneStore, SLOT_COUNT};

pub use crate::collection::{CardEdit, Collection};

pub use crate::reconcile::{reconcile, validate, InvariantViolation, ReconcileReport};

pub use crate::transfer::Placement;

pub use crate::booster::{BoosterPack, RarityTier};

pub use crate::views::{CardView, DeckSummary, HandSummary, PackTile, SortOrder, ViewFilter};

pub use crate::persist::{FileStore, MemoryStore, Snapshot, SnapshotFormat, SnapshotStore};

pub use crate::session::{Session, SessionResult};

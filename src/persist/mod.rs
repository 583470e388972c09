//! Snapshot persistence.
//!
//! ## Key Types
//!
//! - `Snapshot`: the saved document (`catalog`, `pool`, `decks`, `hands`,
//!   `registry`, `packImages`, plus the session's `rng` position)
//! - `SnapshotStore`: the `load`/`save` contract of the storage collaborator
//! - `MemoryStore`: in-process store for tests and embedding
//! - `FileStore`: JSON or bincode file with atomic replace
//!
//! Loading never fails on shape problems. Absent fields default, `null`s
//! are dropped, and [`Snapshot::into_collection`] normalizes hands and
//! reconciles before anything else sees the data.

mod file;

pub use file::{FileStore, SnapshotFormat};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardRegistry};
use crate::collection::Collection;
use crate::core::error::PersistError;
use crate::core::ids::CardId;
use crate::core::rng::BinderRngState;
use crate::zones::{nullable_seq, Deck, Hand, ZoneStore, SLOT_COUNT};

/// The whole saved document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "nullable_seq")]
    pub catalog: Vec<CardDefinition>,
    #[serde(with = "nullable_seq")]
    pub pool: Vec<CardId>,
    #[serde(with = "nullable_seq")]
    pub decks: Vec<Deck>,
    #[serde(with = "nullable_seq")]
    pub hands: Vec<Hand>,
    pub registry: CardRegistry,
    pub pack_images: FxHashMap<String, String>,
    /// Where the session's random stream stopped. Absent in documents
    /// written outside a session.
    pub rng: Option<BinderRngState>,
}

impl Snapshot {
    /// Build a collection, filling absent slot images and reconciling.
    #[must_use]
    pub fn into_collection(self, default_slot_images: &[Option<String>; SLOT_COUNT]) -> Collection {
        let mut hands = self.hands;
        for hand in hands.iter_mut() {
            hand.apply_default_slot_images(default_slot_images);
        }

        let mut collection = Collection {
            catalog: self.catalog,
            registry: self.registry,
            zones: ZoneStore {
                pool: self.pool,
                decks: self.decks,
                hands,
            },
            pack_images: self.pack_images,
        };
        collection.reconcile();
        collection
    }
}

impl From<&Collection> for Snapshot {
    fn from(collection: &Collection) -> Self {
        Self {
            catalog: collection.catalog.clone(),
            pool: collection.zones.pool.clone(),
            decks: collection.zones.decks.clone(),
            hands: collection.zones.hands.clone(),
            registry: collection.registry.clone(),
            pack_images: collection.pack_images.clone(),
            rng: None,
        }
    }
}

/// Storage collaborator contract.
pub trait SnapshotStore {
    /// The last saved snapshot, or an empty one if nothing was saved.
    fn load(&mut self) -> Result<Snapshot, PersistError>;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError>;
}

/// Keeps the snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a snapshot already stored.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Number of completed saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Snapshot, PersistError> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

//! Core types: ids, RNG, configuration and errors.
//!
//! These are the building blocks every other module shares.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

pub use config::{BinderConfig, DisplacedCardPolicy, PackConfig, SlotDeletePolicy, UNIVERSAL_PACK};
pub use error::{ParseZoneRefError, PersistError, SessionError, Warning};
pub use ids::{CardId, DeckId, HandId};
pub use rng::{BinderRng, BinderRngState};

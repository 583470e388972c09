//! Card system: Catalog definitions, metadata and the shared registry.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Catalog entry (`{id, name}`), the cloning template
//! - `CardMeta`: type line, rarity, rules text, tags
//! - `Rarity`: fixed total order used for sorting and booster buckets
//! - `CardRegistry`: id -> name / image / meta lookup shared by all zones

pub mod definition;
pub mod meta;
pub mod rarity;
pub mod registry;

pub use definition::CardDefinition;
pub use meta::{CardMeta, Tags};
pub use rarity::{ParseRarityError, Rarity};
pub use registry::CardRegistry;

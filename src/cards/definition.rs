//! Catalog entries - master card templates.
//!
//! A `CardDefinition` is only an id and a name. Everything displayed about
//! the card lives in the [`CardRegistry`](super::CardRegistry) under the same
//! id, which is what cloning copies.

use serde::{Deserialize, Serialize};

use crate::core::ids::CardId;

/// Master card definition in the Catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    #[serde(default)]
    pub name: String,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

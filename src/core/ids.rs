//! String identifiers for cards, decks and hands.
//!
//! Ids are opaque strings so snapshots written by other tools load without
//! translation. An empty string is the "falsy" id: it is never inserted into
//! a zone and the reconciler drops it wherever it appears.
//!
//! ```
//! use card_binder::core::CardId;
//!
//! let id = CardId::new("c0001");
//! assert_eq!(id.as_str(), "c0001");
//! assert!(!id.is_empty());
//! assert!(CardId::new("").is_empty());
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an id from any string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the falsy (empty) id.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identity of a card instance (and of Catalog templates).
    CardId
);

string_id!(
    /// Identity of a deck.
    DeckId
);

string_id!(
    /// Identity of a hand.
    HandId
);

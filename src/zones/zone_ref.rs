//! Explicit references to where a card is or should go.
//!
//! Callers name source and target zones with a `ZoneRef`; the core never
//! infers a zone from UI structure. The string form is what drag-and-drop
//! payloads carry:
//!
//! | Variant | String |
//! |---|---|
//! | `Catalog` | `master` |
//! | `Pool` | `pool` |
//! | `Deck(d)` | `deck:<d>` |
//! | `HandCards(h)` | `hand-cards:<h>` |
//! | `HandDiscard(h)` | `hand-discard:<h>` |
//! | `HandSlot(h, i)` | `hand-slot:<h>:<i>` |
//!
//! ```
//! use card_binder::zones::ZoneRef;
//! use card_binder::core::HandId;
//!
//! let zone: ZoneRef = "hand-slot:h1:3".parse().unwrap();
//! assert_eq!(zone, ZoneRef::HandSlot(HandId::new("h1"), 3));
//! assert_eq!(zone.to_string(), "hand-slot:h1:3");
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::ParseZoneRefError;
use crate::core::ids::{DeckId, HandId};

/// A place a card can come from or go to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneRef {
    /// The master Catalog. A source for cloning, never a destination.
    Catalog,
    Pool,
    Deck(DeckId),
    HandCards(HandId),
    HandDiscard(HandId),
    HandSlot(HandId, usize),
}

impl ZoneRef {
    /// The hand this zone belongs to, if any.
    #[must_use]
    pub fn hand(&self) -> Option<&HandId> {
        match self {
            ZoneRef::HandCards(h) | ZoneRef::HandDiscard(h) | ZoneRef::HandSlot(h, _) => Some(h),
            _ => None,
        }
    }
}

impl std::fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneRef::Catalog => write!(f, "master"),
            ZoneRef::Pool => write!(f, "pool"),
            ZoneRef::Deck(d) => write!(f, "deck:{d}"),
            ZoneRef::HandCards(h) => write!(f, "hand-cards:{h}"),
            ZoneRef::HandDiscard(h) => write!(f, "hand-discard:{h}"),
            ZoneRef::HandSlot(h, i) => write!(f, "hand-slot:{h}:{i}"),
        }
    }
}

impl std::str::FromStr for ZoneRef {
    type Err = ParseZoneRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseZoneRefError(s.to_string());
        let nonempty = |id: &str| if id.is_empty() { None } else { Some(id.to_string()) };

        match s.trim() {
            "master" | "catalog" => return Ok(ZoneRef::Catalog),
            "pool" => return Ok(ZoneRef::Pool),
            _ => {}
        }

        let (kind, rest) = s.trim().split_once(':').ok_or_else(err)?;
        match kind {
            "deck" => nonempty(rest).map(|d| ZoneRef::Deck(DeckId(d))).ok_or_else(err),
            "hand-cards" => nonempty(rest).map(|h| ZoneRef::HandCards(HandId(h))).ok_or_else(err),
            "hand-discard" => nonempty(rest)
                .map(|h| ZoneRef::HandDiscard(HandId(h)))
                .ok_or_else(err),
            "hand-slot" => {
                // Hand ids may contain ':', the index never does.
                let (hand, index) = rest.rsplit_once(':').ok_or_else(err)?;
                let index: usize = index.parse().map_err(|_| err())?;
                let hand = nonempty(hand).ok_or_else(err)?;
                Ok(ZoneRef::HandSlot(HandId(hand), index))
            }
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_forms() {
        assert_eq!("master".parse::<ZoneRef>(), Ok(ZoneRef::Catalog));
        assert_eq!("pool".parse::<ZoneRef>(), Ok(ZoneRef::Pool));
        assert_eq!("deck:d1".parse::<ZoneRef>(), Ok(ZoneRef::Deck(DeckId::new("d1"))));
        assert_eq!(
            "hand-cards:h1".parse::<ZoneRef>(),
            Ok(ZoneRef::HandCards(HandId::new("h1")))
        );
        assert_eq!(
            "hand-discard:h1".parse::<ZoneRef>(),
            Ok(ZoneRef::HandDiscard(HandId::new("h1")))
        );
        assert_eq!(
            "hand-slot:a:b:9".parse::<ZoneRef>(),
            Ok(ZoneRef::HandSlot(HandId::new("a:b"), 9))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "deck:", "hand-slot:h1", "hand-slot:h1:x", "table:1", "hand-slot::2"] {
            assert!(bad.parse::<ZoneRef>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_display_round_trip() {
        let zones = [
            ZoneRef::Catalog,
            ZoneRef::Pool,
            ZoneRef::Deck(DeckId::new("d")),
            ZoneRef::HandCards(HandId::new("h")),
            ZoneRef::HandDiscard(HandId::new("h")),
            ZoneRef::HandSlot(HandId::new("h"), 7),
        ];
        for zone in zones {
            assert_eq!(zone.to_string().parse::<ZoneRef>(), Ok(zone));
        }
    }

    #[test]
    fn test_hand_of_zone() {
        assert_eq!(ZoneRef::Deck(DeckId::new("d")).hand(), None);
        assert_eq!(
            ZoneRef::HandSlot(HandId::new("h"), 0).hand(),
            Some(&HandId::new("h"))
        );
    }
}

//! Card rarity with a fixed total order.
//!
//! `Common < Uncommon < Rare < Set < Legendary < Unique`. The order drives
//! sorting in views and the bucket layout of booster generation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rarity of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Set,
    Legendary,
    Unique,
}

impl Rarity {
    /// Number of rarities (and booster buckets).
    pub const COUNT: usize = 6;

    /// All rarities, lowest first.
    pub const ALL: [Rarity; Self::COUNT] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Set,
        Rarity::Legendary,
        Rarity::Unique,
    ];

    /// Position in the total order (0 = Common).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Set => "Set",
            Rarity::Legendary => "Legendary",
            Rarity::Unique => "Unique",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown rarity name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown rarity {0:?}")]
pub struct ParseRarityError(pub String);

impl std::str::FromStr for Rarity {
    type Err = ParseRarityError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseRarityError(s.to_string()))
    }
}

// Written as an optional string so bincode reads back the shape it wrote.
impl Serialize for Rarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Some(self.as_str()).serialize(serializer)
    }
}

// `null` and unknown names decode as Common rather than failing the whole
// snapshot.
impl<'de> Deserialize<'de> for Rarity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|r| r.parse().ok()).unwrap_or_default())
    }
}

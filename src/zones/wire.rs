//! Lenient serde helpers for zone contents.
//!
//! Saved documents come from older tools and hand edits. Sequences may hold
//! `null`, slot arrays may have the wrong length. Decoding repairs both so
//! the reconciler only ever sees well-typed data.

use super::SLOT_COUNT;

/// `#[serde(with = "...")]` adapter for sequences (ids, decks, hands, ...).
///
/// Reads `null` entries (and a `null` sequence) and drops them. Writes the
/// same optional shape so compact binary encodings read back what they wrote.
pub mod nullable_seq {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        Some(items.iter().map(Some).collect::<Vec<_>>()).serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let raw = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
        Ok(raw.unwrap_or_default().into_iter().flatten().collect())
    }
}

/// Pad with empty slots or truncate to exactly [`SLOT_COUNT`] entries.
pub fn normalize_slots<T>(raw: impl IntoIterator<Item = Option<T>>) -> [Option<T>; SLOT_COUNT] {
    let mut slots: [Option<T>; SLOT_COUNT] = std::array::from_fn(|_| None);
    for (slot, value) in slots.iter_mut().zip(raw) {
        *slot = value;
    }
    slots
}

/// `#[serde(with = "...")]` adapter for fixed-width slot arrays.
///
/// Writes exactly [`SLOT_COUNT`] entries; reads any length (or `null`) and
/// normalizes.
pub mod fixed_slots {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{normalize_slots, SLOT_COUNT};

    pub fn serialize<S, T>(slots: &[Option<T>; SLOT_COUNT], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        Some(slots.as_slice()).serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<[Option<T>; SLOT_COUNT], D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let raw = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
        Ok(normalize_slots(raw.unwrap_or_default()))
    }
}

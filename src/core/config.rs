//! Binder configuration.
//!
//! Hosts configure the core at startup by providing:
//! - `PackConfig`: booster pack types (key, tag filter, tile image)
//! - `BinderConfig`: seed, default slot images, packs and the slot policies
//!
//! Every field has a default, so `BinderConfig::default()` is a working
//! configuration with only the `Universal` pack.

use serde::{Deserialize, Serialize};

use crate::zones::SLOT_COUNT;

/// Pack key that never filters the Catalog by tag.
pub const UNIVERSAL_PACK: &str = "Universal";

/// Configuration for one booster pack type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Key the UI requests the pack by.
    pub key: String,

    /// Tag a Catalog entry must carry. `None` uses the key as the tag;
    /// only the `Universal` pack matches the whole Catalog.
    #[serde(default)]
    pub tag: Option<String>,

    /// Tile image shown for the pack.
    #[serde(default)]
    pub image: Option<String>,
}

impl PackConfig {
    /// A pack filtered by `tag`.
    pub fn tagged(key: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tag: Some(tag.into()),
            image: None,
        }
    }

    /// The unfiltered `Universal` pack.
    pub fn universal() -> Self {
        Self {
            key: UNIVERSAL_PACK.to_string(),
            tag: None,
            image: None,
        }
    }

    /// Set the tile image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// What happens to a card pushed out of an occupied hand slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplacedCardPolicy {
    /// The displaced card becomes unowned and is pruned on reconciliation.
    #[default]
    Orphan,
    /// The displaced card is appended to the Pool.
    ReturnToPool,
}

/// Whether deleting a card also clears hand slots holding it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotDeletePolicy {
    /// Clear every slot holding the deleted id.
    #[default]
    Clear,
    /// Leave slot contents alone; the caller clears them.
    Keep,
}

/// Complete binder configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderConfig {
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Slot images used when a saved hand has none for a slot.
    #[serde(with = "crate::zones::fixed_slots")]
    pub default_slot_images: [Option<String>; SLOT_COUNT],

    /// Known pack types, in tile display order.
    pub packs: Vec<PackConfig>,

    pub displaced_card_policy: DisplacedCardPolicy,

    pub slot_delete_policy: SlotDeletePolicy,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_slot_images: Default::default(),
            packs: vec![PackConfig::universal()],
            displaced_card_policy: DisplacedCardPolicy::default(),
            slot_delete_policy: SlotDeletePolicy::default(),
        }
    }
}

impl BinderConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add a pack type (replacing any pack with the same key).
    #[must_use]
    pub fn with_pack(mut self, pack: PackConfig) -> Self {
        self.packs.retain(|p| !p.key.eq_ignore_ascii_case(&pack.key));
        self.packs.push(pack);
        self
    }

    /// Set the default image for every slot.
    #[must_use]
    pub fn with_default_slot_images(mut self, images: [Option<String>; SLOT_COUNT]) -> Self {
        self.default_slot_images = images;
        self
    }

    #[must_use]
    pub fn with_displaced_card_policy(mut self, policy: DisplacedCardPolicy) -> Self {
        self.displaced_card_policy = policy;
        self
    }

    #[must_use]
    pub fn with_slot_delete_policy(mut self, policy: SlotDeletePolicy) -> Self {
        self.slot_delete_policy = policy;
        self
    }

    /// Look up a pack by key (case-insensitive).
    #[must_use]
    pub fn pack(&self, key: &str) -> Option<&PackConfig> {
        self.packs.iter().find(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// Resolve a pack key to its tag filter.
    ///
    /// `Universal` has none. A configured pack uses its own tag, falling
    /// back to its key; an unconfigured key is treated as the tag itself.
    #[must_use]
    pub fn pack_tag(&self, key: &str) -> Option<String> {
        if key.eq_ignore_ascii_case(UNIVERSAL_PACK) {
            return None;
        }
        match self.pack(key) {
            Some(pack) => pack.tag.clone().or_else(|| Some(pack.key.clone())),
            None => Some(key.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BinderConfig::default();

        assert_eq!(config.seed, None);
        assert_eq!(config.packs, vec![PackConfig::universal()]);
        assert!(config.default_slot_images.iter().all(Option::is_none));
        assert_eq!(config.displaced_card_policy, DisplacedCardPolicy::Orphan);
        assert_eq!(config.slot_delete_policy, SlotDeletePolicy::Clear);
    }

    #[test]
    fn test_builder() {
        let config = BinderConfig::new()
            .with_seed(9)
            .with_pack(PackConfig::tagged("Fire", "fire").with_image("fire.png"))
            .with_displaced_card_policy(DisplacedCardPolicy::ReturnToPool);

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.packs.len(), 2);
        assert_eq!(config.pack("fire").unwrap().image.as_deref(), Some("fire.png"));
    }

    #[test]
    fn test_with_pack_replaces_same_key() {
        let config = BinderConfig::new()
            .with_pack(PackConfig::tagged("Fire", "fire"))
            .with_pack(PackConfig::tagged("FIRE", "flame"));

        assert_eq!(config.packs.len(), 2);
        assert_eq!(config.pack_tag("Fire").as_deref(), Some("flame"));
    }

    #[test]
    fn test_pack_tag_resolution() {
        let config = BinderConfig::new().with_pack(PackConfig::tagged("Sea Pack", "water"));

        assert_eq!(config.pack_tag("Universal"), None);
        assert_eq!(config.pack_tag("universal"), None);
        assert_eq!(config.pack_tag("Sea Pack").as_deref(), Some("water"));
        assert_eq!(config.pack_tag("Forest").as_deref(), Some("Forest"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = BinderConfig::from_json_str(
            r#"{
                "seed": 11,
                "packs": [{"key": "Universal"}, {"key": "Fire", "tag": "fire"}],
                "slotDeletePolicy": "Keep"
            }"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(11));
        assert_eq!(config.packs.len(), 2);
        assert_eq!(config.slot_delete_policy, SlotDeletePolicy::Keep);
        assert_eq!(config.displaced_card_policy, DisplacedCardPolicy::Orphan);
    }

    #[test]
    fn test_untagged_pack_filters_by_key() {
        let config = BinderConfig::from_json_str(
            r#"{"packs": [{"key": "Universal"}, {"key": "Fire"}]}"#,
        )
        .unwrap();

        assert_eq!(config.pack_tag("fire").as_deref(), Some("Fire"));
        assert_eq!(config.pack_tag("Universal"), None);
    }
}

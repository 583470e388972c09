//! Card registry: the display state of every card id.
//!
//! The registry holds three flat maps keyed by [`CardId`] - name, image and
//! metadata - shared by the Catalog and every zone. Zones only store ids;
//! rendering and booster filtering read through here.
//!
//! ## Example
//!
//! ```
//! use card_binder::cards::{CardMeta, CardRegistry, Rarity};
//! use card_binder::core::CardId;
//!
//! let mut registry = CardRegistry::new();
//! let bolt = CardId::new("bolt");
//! registry.insert(bolt.clone(), "Lightning Bolt", None, CardMeta::new("Spell", Rarity::Common));
//!
//! let copy = CardId::new("bolt-2");
//! assert!(registry.clone_entry(&bolt, copy.clone()));
//! assert_eq!(registry.name(&copy), Some("Lightning Bolt"));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::meta::CardMeta;
use super::rarity::Rarity;
use crate::core::ids::CardId;

/// Registry of card display state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRegistry {
    #[serde(default)]
    pub names: FxHashMap<CardId, String>,

    #[serde(
        default,
        serialize_with = "images_as_options",
        deserialize_with = "images_without_nulls"
    )]
    pub images: FxHashMap<CardId, String>,

    #[serde(default)]
    pub meta: FxHashMap<CardId, CardMeta>,
}

// Images are written as `Option<String>` values so both encodings agree on
// the shape `images_without_nulls` reads back.
fn images_as_options<S>(images: &FxHashMap<CardId, String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(images.iter().map(|(id, image)| (id, Some(image))))
}

fn images_without_nulls<'de, D>(deserializer: D) -> Result<FxHashMap<CardId, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = FxHashMap::<CardId, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, image)| image.filter(|i| !i.is_empty()).map(|i| (id, i)))
        .collect())
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the full entry of `id`.
    pub fn insert(
        &mut self,
        id: CardId,
        name: impl Into<String>,
        image: Option<String>,
        meta: CardMeta,
    ) {
        self.names.insert(id.clone(), name.into());
        self.set_image(&id, image);
        self.meta.insert(id, meta);
    }

    /// Deep-copy the entry of `source` to `target`.
    ///
    /// Returns false (and changes nothing) if `source` has no entry.
    pub fn clone_entry(&mut self, source: &CardId, target: CardId) -> bool {
        if !self.contains(source) {
            return false;
        }
        let name = self.names.get(source).cloned().unwrap_or_default();
        let image = self.images.get(source).cloned();
        let meta = self.meta.get(source).cloned().unwrap_or_default();
        self.insert(target, name, image, meta);
        true
    }

    /// True if any of the three maps has `id`.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.names.contains_key(id) || self.images.contains_key(id) || self.meta.contains_key(id)
    }

    #[must_use]
    pub fn name(&self, id: &CardId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn image(&self, id: &CardId) -> Option<&str> {
        self.images.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn meta(&self, id: &CardId) -> Option<&CardMeta> {
        self.meta.get(id)
    }

    /// Rarity of `id`, `Common` when unset.
    #[must_use]
    pub fn rarity(&self, id: &CardId) -> Rarity {
        self.meta.get(id).map(|m| m.rarity).unwrap_or_default()
    }

    pub fn set_name(&mut self, id: &CardId, name: impl Into<String>) {
        self.names.insert(id.clone(), name.into());
    }

    /// Set or clear the image. Empty strings clear.
    pub fn set_image(&mut self, id: &CardId, image: Option<String>) {
        match image.filter(|i| !i.is_empty()) {
            Some(image) => {
                self.images.insert(id.clone(), image);
            }
            None => {
                self.images.remove(id);
            }
        }
    }

    pub fn set_meta(&mut self, id: &CardId, meta: CardMeta) {
        self.meta.insert(id.clone(), meta);
    }

    /// Remove every trace of `id`. Returns true if anything was removed.
    pub fn remove(&mut self, id: &CardId) -> bool {
        let name = self.names.remove(id).is_some();
        let image = self.images.remove(id).is_some();
        let meta = self.meta.remove(id).is_some();
        name || image || meta
    }

    /// Drop every entry whose id is not in `referenced`.
    ///
    /// Returns the number of distinct ids removed.
    pub fn prune(&mut self, referenced: &FxHashSet<CardId>) -> usize {
        let orphans: FxHashSet<CardId> = self
            .ids()
            .filter(|id| !referenced.contains(*id))
            .cloned()
            .collect();
        for id in &orphans {
            self.remove(id);
        }
        orphans.len()
    }

    /// Every id with at least one entry (may repeat across maps).
    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.names
            .keys()
            .chain(self.images.keys())
            .chain(self.meta.keys())
    }

    /// Number of distinct ids with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids().collect::<FxHashSet<_>>().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.images.is_empty() && self.meta.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> (CardId, CardMeta) {
        (
            CardId::new("bolt"),
            CardMeta::new("Spell", Rarity::Uncommon).with_tag("Fire"),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = CardRegistry::new();
        let (id, meta) = bolt();
        registry.insert(id.clone(), "Bolt", Some("bolt.png".into()), meta.clone());

        assert_eq!(registry.name(&id), Some("Bolt"));
        assert_eq!(registry.image(&id), Some("bolt.png"));
        assert_eq!(registry.meta(&id), Some(&meta));
        assert_eq!(registry.rarity(&id), Rarity::Uncommon);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clone_entry_is_independent() {
        let mut registry = CardRegistry::new();
        let (id, meta) = bolt();
        registry.insert(id.clone(), "Bolt", None, meta.clone());

        let copy = CardId::new("bolt-copy");
        assert!(registry.clone_entry(&id, copy.clone()));

        registry.meta.get_mut(&copy).unwrap().tags.insert("Edited");

        assert_eq!(registry.meta(&id), Some(&meta));
        assert!(registry.meta(&copy).unwrap().has_tag("edited"));
        assert_eq!(registry.image(&copy), None);
    }

    #[test]
    fn test_clone_missing_source() {
        let mut registry = CardRegistry::new();
        assert!(!registry.clone_entry(&CardId::new("nope"), CardId::new("x")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_prune() {
        let mut registry = CardRegistry::new();
        registry.insert(CardId::new("a"), "A", Some("a.png".into()), CardMeta::default());
        registry.insert(CardId::new("b"), "B", None, CardMeta::default());
        registry.set_image(&CardId::new("c"), Some("c.png".into()));

        let referenced: FxHashSet<CardId> = [CardId::new("a")].into_iter().collect();
        assert_eq!(registry.prune(&referenced), 2);

        assert!(registry.contains(&CardId::new("a")));
        assert!(!registry.contains(&CardId::new("b")));
        assert!(!registry.contains(&CardId::new("c")));
    }

    #[test]
    fn test_empty_image_clears() {
        let mut registry = CardRegistry::new();
        let id = CardId::new("a");
        registry.set_image(&id, Some("a.png".into()));
        registry.set_image(&id, Some(String::new()));
        assert_eq!(registry.image(&id), None);
    }

    #[test]
    fn test_decode_null_images() {
        let registry: CardRegistry = serde_json::from_str(
            r#"{"names": {"a": "A"}, "images": {"a": null, "b": "b.png"}}"#,
        )
        .unwrap();

        assert_eq!(registry.image(&CardId::new("a")), None);
        assert_eq!(registry.image(&CardId::new("b")), Some("b.png"));
        assert!(registry.meta.is_empty());
    }
}

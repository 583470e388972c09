//! Card metadata: type line, rarity, rules text and tags.
//!
//! Tags form an ordered set. Membership is case-insensitive, so `Fire` and
//! `fire` are the same tag and the first spelling inserted is kept.

use serde::{Deserialize, Serialize};

use super::rarity::Rarity;

/// Ordered, case-insensitive set of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Option<Vec<String>>")]
pub struct Tags(Vec<String>);

impl Tags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Returns false if it was already present or blank.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into().trim().to_string();
        if tag.is_empty() || self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Remove a tag (case-insensitive). Returns true if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| !t.eq_ignore_ascii_case(tag.trim()));
        self.0.len() != before
    }

    /// Case-insensitive membership.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.0.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// A `null` tag list reads as no tags.
impl From<Option<Vec<String>>> for Tags {
    fn from(raw: Option<Vec<String>>) -> Self {
        raw.unwrap_or_default().into_iter().collect()
    }
}

impl From<Tags> for Option<Vec<String>> {
    fn from(tags: Tags) -> Self {
        Some(tags.0)
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

/// Display metadata of a card id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMeta {
    /// Type line ("Creature", "Spell", ...). Free text.
    #[serde(default, rename = "type")]
    pub card_type: String,

    #[serde(default)]
    pub rarity: Rarity,

    /// Rules text as HTML, stored verbatim.
    #[serde(default, rename = "rulesHTML")]
    pub rules_html: String,

    #[serde(default)]
    pub tags: Tags,
}

impl CardMeta {
    #[must_use]
    pub fn new(card_type: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            card_type: card_type.into(),
            rarity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules_html: impl Into<String>) -> Self {
        self.rules_html = rules_html.into();
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Case-insensitive tag check.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

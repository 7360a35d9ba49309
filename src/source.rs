//! Character source: the collaborator the network is mined from
//!
//! Every method is best-effort. Transport or parse failures are absorbed by
//! the implementation and surface as "nothing": an empty set, an empty
//! biography, an empty URL.

use crate::graph::CharacterId;
use std::collections::{BTreeMap, BTreeSet};

/// Where characters, biographies and thumbnails come from.
pub trait CharacterSource {
    /// Every character the source knows. Empty on failure.
    fn enumerate_characters(&self) -> BTreeSet<CharacterId>;

    /// Plain-text biography of a character. Empty on failure.
    fn fetch_biography(&self, character: &CharacterId) -> String;

    /// Thumbnail URL of a character. Empty when there is none.
    fn fetch_image_url(&self, character: &CharacterId) -> String;
}

impl<S: CharacterSource + ?Sized> CharacterSource for &S {
    fn enumerate_characters(&self) -> BTreeSet<CharacterId> {
        (**self).enumerate_characters()
    }

    fn fetch_biography(&self, character: &CharacterId) -> String {
        (**self).fetch_biography(character)
    }

    fn fetch_image_url(&self, character: &CharacterId) -> String {
        (**self).fetch_image_url(character)
    }
}

/// A fixed, in-memory source.
///
/// Characters without a biography or image simply return empty strings.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    biographies: BTreeMap<CharacterId, String>,
    images: BTreeMap<CharacterId, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a character with its biography text
    pub fn with_character(mut self, id: impl Into<CharacterId>, biography: impl Into<String>) -> Self {
        self.biographies.insert(id.into(), biography.into());
        self
    }

    /// Set a character's thumbnail URL
    pub fn with_image(mut self, id: impl Into<CharacterId>, url: impl Into<String>) -> Self {
        self.images.insert(id.into(), url.into());
        self
    }
}

impl CharacterSource for StaticSource {
    fn enumerate_characters(&self) -> BTreeSet<CharacterId> {
        self.biographies.keys().cloned().collect()
    }

    fn fetch_biography(&self, character: &CharacterId) -> String {
        self.biographies.get(character).cloned().unwrap_or_default()
    }

    fn fetch_image_url(&self, character: &CharacterId) -> String {
        self.images.get(character).cloned().unwrap_or_default()
    }
}

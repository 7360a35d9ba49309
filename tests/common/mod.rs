//! Common test utilities for charnet integration tests
//!
//! Provides a scripted in-memory character source that records every call,
//! plus a few fixture universes.

#![allow(dead_code)]

use charnet::{CharacterId, CharacterSource};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// A [`CharacterSource`] backed by fixed text that logs every request.
#[derive(Default)]
pub struct ScriptedSource {
    biographies: BTreeMap<CharacterId, String>,
    images: BTreeMap<CharacterId, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(characters: &[(&str, &str)]) -> Self {
        Self {
            biographies: characters
                .iter()
                .map(|(id, bio)| (CharacterId::new(*id), bio.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, id: &str, url: &str) -> Self {
        self.images.insert(CharacterId::new(id), url.to_string());
        self
    }

    /// Every call so far, as `"enumerate"`, `"bio:<id>"` or `"image:<id>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CharacterSource for ScriptedSource {
    fn enumerate_characters(&self) -> BTreeSet<CharacterId> {
        self.record("enumerate".to_string());
        self.biographies.keys().cloned().collect()
    }

    fn fetch_biography(&self, character: &CharacterId) -> String {
        self.record(format!("bio:{}", character));
        self.biographies.get(character).cloned().unwrap_or_default()
    }

    fn fetch_image_url(&self, character: &CharacterId) -> String {
        self.record(format!("image:{}", character));
        self.images.get(character).cloned().unwrap_or_default()
    }
}

/// Alice mentions Bob twice, Bob mentions Alice once, Carol says nothing.
pub fn alice_bob_carol() -> ScriptedSource {
    ScriptedSource::new(&[
        ("Alice", "Bob is here, Bob again"),
        ("Bob", "Alice once"),
        ("Carol", ""),
    ])
    .with_image("Alice", "https://img.example/alice.png")
}

/// A small universe with overlapping names and punctuation in titles.
pub fn hogwarts() -> ScriptedSource {
    ScriptedSource::new(&[
        (
            "Harry Potter",
            "Harry Potter befriended Ron Weasley and Hermione Granger. \
             Ron Weasley and Harry Potter later met Albus Dumbledore.",
        ),
        (
            "Ron Weasley",
            "Ron Weasley is the best friend of Harry Potter. Ronald Weasley is not a match.",
        ),
        (
            "Hermione Granger",
            "Hermione Granger helped Harry Potter, Harry Potter, and Ron Weasley.",
        ),
        ("Albus Dumbledore", "Headmaster. Harry Potter trusted him."),
        ("Gellert Grindelwald", "A dark wizard."),
    ])
}

pub fn id(s: &str) -> CharacterId {
    CharacterId::new(s)
}

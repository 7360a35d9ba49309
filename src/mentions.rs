//! Whole-word, case-insensitive mention counting
//!
//! Each character id is escaped and anchored with a word boundary on every
//! side that ends in a word character, so `Ron` matches "Ron." and "RON"
//! but not "Ronald", and ids containing regex metacharacters (`J.R.`,
//! `Anakin (Clone)`) are matched literally.

use crate::graph::CharacterId;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Mentions of each known character in one text, keyed by id
pub type MentionCounts = BTreeMap<CharacterId, u64>;

/// Compiled matchers for a fixed character set.
///
/// Compile once per build and reuse for every biography. The counter does
/// not know which character a text belongs to; callers discard self
/// mentions.
#[derive(Debug, Clone)]
pub struct MentionCounter {
    patterns: Vec<(CharacterId, Option<Regex>)>,
}

impl MentionCounter {
    /// Compile matchers for every distinct id in `characters`.
    ///
    /// Blank ids never match. An id whose pattern cannot be compiled
    /// (only possible past the regex size limit) is logged and counts zero.
    pub fn new<'a>(characters: impl IntoIterator<Item = &'a CharacterId>) -> Self {
        let unique: BTreeSet<&CharacterId> = characters.into_iter().collect();
        let patterns = unique
            .into_iter()
            .map(|id| (id.clone(), compile(id)))
            .collect();
        Self { patterns }
    }

    /// Count mentions of every known character in `text`.
    ///
    /// The result has an entry for every character, including zeros.
    pub fn count(&self, text: &str) -> MentionCounts {
        self.patterns
            .iter()
            .map(|(id, pattern)| {
                let n = match pattern {
                    Some(re) if !text.is_empty() => re.find_iter(text).count() as u64,
                    _ => 0,
                };
                (id.clone(), n)
            })
            .collect()
    }

    /// Characters this counter knows, in lexicographic order
    pub fn characters(&self) -> impl Iterator<Item = &CharacterId> {
        self.patterns.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// One-shot convenience: compile and count in a single call
pub fn count_mentions<'a>(
    text: &str,
    characters: impl IntoIterator<Item = &'a CharacterId>,
) -> MentionCounts {
    MentionCounter::new(characters).count(text)
}

static WORD_CHAR: OnceLock<Regex> = OnceLock::new();

/// Same notion of "word character" as the `\b` assertion
fn is_word_char(c: char) -> bool {
    let re = WORD_CHAR.get_or_init(|| Regex::new(r"^\w$").expect("static pattern"));
    re.is_match(c.encode_utf8(&mut [0; 4]))
}

fn compile(id: &CharacterId) -> Option<Regex> {
    let name = id.as_str();
    if name.trim().is_empty() {
        return None;
    }
    // A boundary next to a non-word end would demand a word character
    // beyond it, so those sides stay unanchored.
    let boundary = |c: Option<char>| if c.is_some_and(is_word_char) { r"\b" } else { "" };
    let pattern = format!(
        "{}{}{}",
        boundary(name.chars().next()),
        regex::escape(name),
        boundary(name.chars().next_back())
    );
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(character = %id, error = %e, "cannot compile mention pattern, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<CharacterId> {
        names.iter().map(|s| CharacterId::new(*s)).collect()
    }

    fn count_of(counts: &MentionCounts, name: &str) -> u64 {
        counts[&CharacterId::new(name)]
    }

    #[test]
    fn counts_whole_words_only() {
        let chars = ids(&["Ron"]);
        let counts = count_mentions("Ronald met Ron. Later, ron left; Ron's hat.", &chars);
        assert_eq!(count_of(&counts, "Ron"), 3);
    }

    #[test]
    fn substring_is_not_a_mention() {
        let chars = ids(&["Ron"]);
        let counts = count_mentions("Ronald and Byron and Ronny", &chars);
        assert_eq!(count_of(&counts, "Ron"), 0);
    }

    #[test]
    fn trailing_punctuation_still_counts() {
        let chars = ids(&["Ron"]);
        assert_eq!(count_of(&count_mentions("Ron.", &chars), "Ron"), 1);
        assert_eq!(count_of(&count_mentions("(Ron)", &chars), "Ron"), 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let chars = ids(&["Harry Potter"]);
        let counts = count_mentions("HARRY POTTER, harry potter and Harry Potter", &chars);
        assert_eq!(count_of(&counts, "Harry Potter"), 3);
    }

    #[test]
    fn metacharacters_are_literal() {
        let chars = ids(&["J.R", "Mr. Smith", "Anakin (Clone)"]);
        let text = "J.R waved. JxR did not. Mr. Smith and Mr  Smith. Anakin (Clone) fought Anakin Clone.";
        let counts = count_mentions(text, &chars);
        assert_eq!(count_of(&counts, "J.R"), 1);
        assert_eq!(count_of(&counts, "Mr. Smith"), 1);
        assert_eq!(count_of(&counts, "Anakin (Clone)"), 1);
    }

    #[test]
    fn punctuation_at_either_end_still_matches() {
        let chars = ids(&["Anakin (Clone)", "J.R.", "(Unnamed)"]);
        let counts = count_mentions("Anakin (Clone) fought. J.R. waved at (Unnamed).", &chars);
        assert_eq!(count_of(&counts, "Anakin (Clone)"), 1);
        assert_eq!(count_of(&counts, "J.R."), 1);
        assert_eq!(count_of(&counts, "(Unnamed)"), 1);
    }

    #[test]
    fn word_ends_keep_their_boundary() {
        let chars = ids(&["J.R.", "Anakin (Clone)"]);
        // "AJ.R." starts inside a word; "XAnakin (Clone)" likewise
        let counts = count_mentions("AJ.R. and XAnakin (Clone)", &chars);
        assert_eq!(count_of(&counts, "J.R."), 0);
        assert_eq!(count_of(&counts, "Anakin (Clone)"), 0);
    }

    #[test]
    fn every_character_has_an_entry() {
        let chars = ids(&["Alice", "Bob", "Carol"]);
        let counts = count_mentions("Bob is here, Bob again", &chars);
        assert_eq!(counts.len(), 3);
        assert_eq!(count_of(&counts, "Alice"), 0);
        assert_eq!(count_of(&counts, "Bob"), 2);
        assert_eq!(count_of(&counts, "Carol"), 0);
    }

    #[test]
    fn source_character_is_not_special_cased() {
        let chars = ids(&["Alice", "Bob"]);
        let counts = count_mentions("Alice thinks Alice is great", &chars);
        assert_eq!(count_of(&counts, "Alice"), 2);
    }

    #[test]
    fn empty_text_yields_zeros() {
        let chars = ids(&["Alice", "Bob"]);
        let counts = count_mentions("", &chars);
        assert!(counts.values().all(|&n| n == 0));
    }

    #[test]
    fn blank_identifier_never_matches() {
        let chars = ids(&["", "  "]);
        let counts = count_mentions("some words here", &chars);
        assert!(counts.values().all(|&n| n == 0));
    }

    #[test]
    fn result_is_independent_of_input_order() {
        let forward = ids(&["Alice", "Bob", "Carol"]);
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();
        let text = "Carol, Bob, Alice, Bob";
        assert_eq!(count_mentions(text, &forward), count_mentions(text, &reversed));
    }

    #[test]
    fn duplicate_ids_are_compiled_once() {
        let chars = ids(&["Alice", "Alice", "Bob"]);
        let counter = MentionCounter::new(&chars);
        assert_eq!(counter.len(), 2);
        let names: Vec<_> = counter.characters().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn unicode_names_fold_case() {
        let chars = ids(&["Éowyn"]);
        let counts = count_mentions("ÉOWYN rode out; éowyn returned", &chars);
        assert_eq!(count_of(&counts, "Éowyn"), 2);
    }
}

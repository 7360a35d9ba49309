//! Character identity in the co-occurrence network

use serde::{Deserialize, Serialize};

/// Identifier of a character: the wiki page title, verbatim.
///
/// No normalization is applied; case and punctuation are preserved exactly
/// as the source reported them. Serializes as a plain string and orders
/// lexicographically, which is the order every deterministic output uses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    /// Create a CharacterId from a page title
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CharacterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Undirected weighted edge between two characters

use super::character::CharacterId;
use serde::{Deserialize, Serialize};

/// Unordered pair of distinct characters, stored smaller id first.
///
/// `EdgeKey::new(a, b)` and `EdgeKey::new(b, a)` produce equal keys, so a map
/// keyed by `EdgeKey` can never hold parallel edges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: CharacterId,
    high: CharacterId,
}

impl EdgeKey {
    /// Canonical key for the pair, or `None` for a self pair.
    pub fn new(a: CharacterId, b: CharacterId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lexicographically smaller endpoint
    pub fn low(&self) -> &CharacterId {
        &self.low
    }

    /// The lexicographically larger endpoint
    pub fn high(&self) -> &CharacterId {
        &self.high
    }

    /// Whether `id` is one of the endpoints
    pub fn touches(&self, id: &CharacterId) -> bool {
        &self.low == id || &self.high == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: &CharacterId) -> Option<&CharacterId> {
        if &self.low == id {
            Some(&self.high)
        } else if &self.high == id {
            Some(&self.low)
        } else {
            None
        }
    }
}

/// A relationship between two characters.
///
/// `weight` is the largest mention count seen in either direction and is
/// always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Lexicographically smaller endpoint
    pub source: CharacterId,
    /// Lexicographically larger endpoint
    pub target: CharacterId,
    /// Max-merged mention count
    pub weight: u64,
}

impl Edge {
    /// Canonical key of this edge
    pub fn key(&self) -> Option<EdgeKey> {
        EdgeKey::new(self.source.clone(), self.target.clone())
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: &CharacterId) -> Option<&CharacterId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

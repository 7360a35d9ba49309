//! CharacterGraph: the undirected co-occurrence network

use super::character::CharacterId;
use super::edge::{Edge, EdgeKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Neighbors of one character, keyed by id, valued by edge weight
pub type Neighbors = BTreeMap<CharacterId, u64>;

/// An undirected, simple, weighted graph of characters.
///
/// Stored as a symmetric adjacency map: if `b` is a neighbor of `a` with
/// weight `w`, then `a` is a neighbor of `b` with the same `w`. Every
/// mutation goes through [`add_character`](Self::add_character) or
/// [`merge_mention`](Self::merge_mention), which keep the graph free of
/// self-loops, parallel edges and zero-weight edges.
///
/// Isolated characters are kept as zero-degree nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GraphRecord", into = "GraphRecord")]
pub struct CharacterGraph {
    adjacency: BTreeMap<CharacterId, Neighbors>,
}

impl CharacterGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a character as a node. Returns false if it was already present.
    pub fn add_character(&mut self, id: CharacterId) -> bool {
        if self.adjacency.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id, Neighbors::new());
        true
    }

    /// Fold one observed mention count into the edge between `a` and `b`.
    ///
    /// The edge weight becomes `max(existing, count)`. Self pairs and zero
    /// counts are ignored and return `None`; otherwise the resulting weight
    /// is returned. Both endpoints are added as nodes if missing.
    pub fn merge_mention(&mut self, a: &CharacterId, b: &CharacterId, count: u64) -> Option<u64> {
        if count == 0 {
            return None;
        }
        let key = EdgeKey::new(a.clone(), b.clone())?;
        let merged = self
            .weight(key.low(), key.high())
            .map_or(count, |existing| existing.max(count));

        self.adjacency
            .entry(key.low().clone())
            .or_default()
            .insert(key.high().clone(), merged);
        self.adjacency
            .entry(key.high().clone())
            .or_default()
            .insert(key.low().clone(), merged);
        Some(merged)
    }

    /// Weight of the edge between `a` and `b`, if any
    pub fn weight(&self, a: &CharacterId, b: &CharacterId) -> Option<u64> {
        self.adjacency.get(a).and_then(|n| n.get(b)).copied()
    }

    /// Check if a character is a node of this graph
    pub fn contains(&self, id: &CharacterId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Neighbors of a character, or `None` if it is not a node
    pub fn neighbors(&self, id: &CharacterId) -> Option<&Neighbors> {
        self.adjacency.get(id)
    }

    /// Number of distinct incident edges, or `None` if not a node
    pub fn degree(&self, id: &CharacterId) -> Option<usize> {
        self.adjacency.get(id).map(|n| n.len())
    }

    /// All characters in lexicographic order
    pub fn characters(&self) -> impl Iterator<Item = &CharacterId> {
        self.adjacency.keys()
    }

    /// All edges in canonical orientation, ordered by (source, target)
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(source, neighbors)| {
            neighbors
                .range::<CharacterId, _>((
                    std::ops::Bound::Excluded(source),
                    std::ops::Bound::Unbounded,
                ))
                .map(move |(target, &weight)| Edge {
                    source: source.clone(),
                    target: target.clone(),
                    weight,
                })
        })
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Largest edge weight, or `None` when there are no edges
    pub fn max_weight(&self) -> Option<u64> {
        self.adjacency
            .values()
            .flat_map(|n| n.values().copied())
            .max()
    }
}

/// Flat persisted form: node list plus canonical edge list.
///
/// Loading goes back through the mutators, so a hand-edited or stale file
/// with self-loops, zero weights or duplicate pairs still yields a valid graph.
#[derive(Serialize, Deserialize)]
struct GraphRecord {
    #[serde(default)]
    nodes: Vec<CharacterId>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl From<GraphRecord> for CharacterGraph {
    fn from(record: GraphRecord) -> Self {
        let mut graph = CharacterGraph::new();
        for id in record.nodes {
            graph.add_character(id);
        }
        for edge in record.edges {
            graph.merge_mention(&edge.source, &edge.target, edge.weight);
        }
        graph
    }
}

impl From<CharacterGraph> for GraphRecord {
    fn from(graph: CharacterGraph) -> Self {
        let edges = graph.edges().collect();
        Self {
            nodes: graph.adjacency.into_keys().collect(),
            edges,
        }
    }
}

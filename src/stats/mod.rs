//! Derived statistics over a built network
//!
//! Everything here is a pure function of a `CharacterGraph`: no caching,
//! no state carried between graphs. Queries about characters that are not
//! in the graph return `None` rather than panicking.

mod normalize;

pub use normalize::{normalize_edge_weights, NormalizedEdge};

use crate::graph::{CharacterGraph, CharacterId};
use serde::Serialize;
use std::collections::BTreeMap;

/// The heaviest edge incident to a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrongestConnection {
    pub character: CharacterId,
    pub weight: u64,
}

/// Per-character summary shown alongside each node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterStats {
    /// Number of distinct neighbors (degree)
    pub connections: usize,
    /// Sum of incident edge weights
    pub total_mentions: u64,
    /// Heaviest incident edge; ties go to the lexicographically smallest neighbor
    pub strongest_connection: Option<StrongestConnection>,
    /// `degree / (nodes - 1)`, or 0 with fewer than two nodes
    pub centrality: f64,
}

/// Visual weight of a node: `sqrt(degree * total_mentions)`.
///
/// Zero for an isolated node; `None` if the character is not in the graph.
pub fn node_size(graph: &CharacterGraph, id: &CharacterId) -> Option<f64> {
    let neighbors = graph.neighbors(id)?;
    let degree = neighbors.len() as f64;
    let total: u64 = neighbors.values().sum();
    Some((degree * total as f64).sqrt())
}

/// Node sizes for every character in the graph
pub fn node_sizes(graph: &CharacterGraph) -> BTreeMap<CharacterId, f64> {
    graph
        .characters()
        .filter_map(|id| node_size(graph, id).map(|size| (id.clone(), size)))
        .collect()
}

/// Fraction of the other nodes a character is directly connected to.
pub fn degree_centrality(graph: &CharacterGraph, id: &CharacterId) -> Option<f64> {
    let degree = graph.degree(id)?;
    let others = graph.node_count().saturating_sub(1);
    if others == 0 {
        return Some(0.0);
    }
    Some(degree as f64 / others as f64)
}

/// Connection summary for one character.
pub fn character_stats(graph: &CharacterGraph, id: &CharacterId) -> Option<CharacterStats> {
    let neighbors = graph.neighbors(id)?;

    // Neighbors iterate in lexicographic order, so keeping the first
    // strictly heavier edge resolves ties to the smallest id.
    let mut strongest: Option<StrongestConnection> = None;
    for (neighbor, &weight) in neighbors {
        if strongest.as_ref().map_or(true, |s| weight > s.weight) {
            strongest = Some(StrongestConnection {
                character: neighbor.clone(),
                weight,
            });
        }
    }

    Some(CharacterStats {
        connections: neighbors.len(),
        total_mentions: neighbors.values().sum(),
        strongest_connection: strongest,
        centrality: degree_centrality(graph, id)?,
    })
}

/// All derived metrics for a graph, as consumed by rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub node_sizes: BTreeMap<CharacterId, f64>,
    pub characters: BTreeMap<CharacterId, CharacterStats>,
    pub edges: Vec<NormalizedEdge>,
}

impl NetworkSummary {
    /// Compute every metric from the graph
    pub fn of(graph: &CharacterGraph) -> Self {
        let characters = graph
            .characters()
            .filter_map(|id| character_stats(graph, id).map(|s| (id.clone(), s)))
            .collect();
        Self {
            node_sizes: node_sizes(graph),
            characters,
            edges: normalize_edge_weights(graph),
        }
    }
}

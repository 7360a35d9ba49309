//! Edge weight normalization for rendering
//!
//! Raw weights are what the graph stores. Normalized weights are computed
//! on demand, relative to the heaviest edge, and never written back.

use crate::graph::{CharacterGraph, Edge};
use serde::Serialize;

/// An edge with its weight relative to the heaviest edge in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEdge {
    #[serde(flatten)]
    pub edge: Edge,
    /// `weight / max_weight`, in `(0, 1]`
    pub normalized_weight: f64,
}

/// Divide every edge weight by the graph's maximum edge weight.
///
/// A graph without edges yields an empty list; there is no division.
pub fn normalize_edge_weights(graph: &CharacterGraph) -> Vec<NormalizedEdge> {
    let max = match graph.max_weight() {
        Some(max) if max > 0 => max as f64,
        _ => return Vec::new(),
    };

    graph
        .edges()
        .map(|edge| NormalizedEdge {
            normalized_weight: edge.weight as f64 / max,
            edge,
        })
        .collect()
}

//! Layout-agnostic network view for rendering
//!
//! Bundles the graph, its derived statistics and the character thumbnails
//! into one JSON document. A renderer positions and draws nodes; nothing
//! here depends on a layout.

use crate::graph::{CharacterGraph, CharacterId};
use crate::stats::{CharacterStats, NetworkSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Default document title
pub const DEFAULT_TITLE: &str = "Character Network";

/// Marker diameter per unit of node size
const MARKER_SCALE: f64 = 10.0;

/// Line width of the heaviest edge
const MAX_EDGE_WIDTH: f64 = 5.0;

/// Errors that can occur while writing a view
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// One character, ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: CharacterId,
    /// `sqrt(degree * total_mentions)`
    pub size: f64,
    /// Suggested marker diameter
    pub marker_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub stats: CharacterStats,
    pub hover_text: String,
}

/// One relationship, ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub source: CharacterId,
    pub target: CharacterId,
    pub weight: u64,
    pub normalized_weight: f64,
    /// Suggested line width, proportional to the normalized weight
    pub width: f64,
}

/// The whole network as handed to a renderer
#[derive(Debug, Clone, Serialize)]
pub struct NetworkView {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl NetworkView {
    /// Assemble the view. Empty image URLs are treated as "no image".
    pub fn from_graph(graph: &CharacterGraph, images: &BTreeMap<CharacterId, String>) -> Self {
        let summary = NetworkSummary::of(graph);

        let nodes: Vec<NodeView> = summary
            .characters
            .into_iter()
            .map(|(id, stats)| {
                let size = summary.node_sizes.get(&id).copied().unwrap_or(0.0);
                let image_url = images.get(&id).filter(|url| !url.is_empty()).cloned();
                NodeView {
                    hover_text: hover_text(&id, &stats),
                    marker_size: size * MARKER_SCALE,
                    size,
                    image_url,
                    stats,
                    id,
                }
            })
            .collect();

        let edges: Vec<EdgeView> = summary
            .edges
            .into_iter()
            .map(|ne| EdgeView {
                width: ne.normalized_weight * MAX_EDGE_WIDTH,
                normalized_weight: ne.normalized_weight,
                weight: ne.edge.weight,
                source: ne.edge.source,
                target: ne.edge.target,
            })
            .collect();

        Self {
            title: DEFAULT_TITLE.to_string(),
            generated_at: Utc::now(),
            node_count: nodes.len(),
            edge_count: edges.len(),
            nodes,
            edges,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the view to `path`, creating parent directories
    pub fn write_to(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), nodes = self.node_count, edges = self.edge_count, "view written");
        Ok(())
    }
}

/// Hover text for a node
pub fn hover_text(id: &CharacterId, stats: &CharacterStats) -> String {
    let (strongest, strongest_weight) = match &stats.strongest_connection {
        Some(s) => (s.character.as_str(), s.weight),
        None => ("None", 0),
    };
    format!(
        "{}\nConnections: {}\nTotal Mentions: {}\nStrongest Connection: {} ({} mentions)\nCentrality: {:.3}",
        id, stats.connections, stats.total_mentions, strongest, strongest_weight, stats.centrality
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(s: &str) -> CharacterId {
        CharacterId::new(s)
    }

    fn scenario_graph() -> CharacterGraph {
        let mut graph = CharacterGraph::new();
        graph.add_character(id("Carol"));
        graph.merge_mention(&id("Alice"), &id("Bob"), 2);
        graph.merge_mention(&id("Alice"), &id("Dave"), 1);
        graph
    }

    #[test]
    fn view_contains_every_node_and_edge() {
        let view = NetworkView::from_graph(&scenario_graph(), &BTreeMap::new());
        assert_eq!(view.node_count, 4);
        assert_eq!(view.edge_count, 2);
        assert_eq!(view.title, DEFAULT_TITLE);
    }

    #[test]
    fn sizes_and_widths_are_scaled() {
        let view = NetworkView::from_graph(&scenario_graph(), &BTreeMap::new());

        let alice = view.nodes.iter().find(|n| n.id == id("Alice")).unwrap();
        // degree 2, total 3
        assert!((alice.size - 6f64.sqrt()).abs() < 1e-9);
        assert!((alice.marker_size - 10.0 * 6f64.sqrt()).abs() < 1e-9);

        let heavy = view.edges.iter().find(|e| e.weight == 2).unwrap();
        let light = view.edges.iter().find(|e| e.weight == 1).unwrap();
        assert!((heavy.width - 5.0).abs() < 1e-9);
        assert!((light.width - 2.5).abs() < 1e-9);
    }

    #[test]
    fn empty_image_urls_are_omitted() {
        let mut images = BTreeMap::new();
        images.insert(id("Alice"), "https://img/alice.png".to_string());
        images.insert(id("Bob"), String::new());

        let view = NetworkView::from_graph(&scenario_graph(), &images);
        let json = serde_json::to_value(&view).unwrap();
        let nodes = json["nodes"].as_array().unwrap();

        let alice = nodes.iter().find(|n| n["id"] == "Alice").unwrap();
        let bob = nodes.iter().find(|n| n["id"] == "Bob").unwrap();
        assert_eq!(alice["image_url"], "https://img/alice.png");
        assert!(bob.get("image_url").is_none());
    }

    #[test]
    fn hover_text_for_isolated_node() {
        let view = NetworkView::from_graph(&scenario_graph(), &BTreeMap::new());
        let carol = view.nodes.iter().find(|n| n.id == id("Carol")).unwrap();
        assert_eq!(
            carol.hover_text,
            "Carol\nConnections: 0\nTotal Mentions: 0\nStrongest Connection: None (0 mentions)\nCentrality: 0.000"
        );
    }

    #[test]
    fn hover_text_for_connected_node() {
        let view = NetworkView::from_graph(&scenario_graph(), &BTreeMap::new());
        let alice = view.nodes.iter().find(|n| n.id == id("Alice")).unwrap();
        assert_eq!(
            alice.hover_text,
            "Alice\nConnections: 2\nTotal Mentions: 3\nStrongest Connection: Bob (2 mentions)\nCentrality: 0.667"
        );
    }

    #[test]
    fn empty_graph_renders_empty_view() {
        let view = NetworkView::from_graph(&CharacterGraph::new(), &BTreeMap::new());
        assert!(view.nodes.is_empty());
        assert!(view.edges.is_empty());
        assert!(view.to_json_pretty().unwrap().contains("\"nodes\": []"));
    }

    #[test]
    fn write_to_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("network.json");
        NetworkView::from_graph(&scenario_graph(), &BTreeMap::new())
            .with_title("Test")
            .write_to(&path)
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["title"], "Test");
        assert_eq!(written["edge_count"], 2);
    }
}

//! Charnet: character co-occurrence networks mined from wiki biographies
//!
//! Every character listed in a wiki category becomes a node. Two characters
//! are linked when one's biography mentions the other, weighted by how
//! often, and the network is decorated with per-character statistics for
//! rendering.
//!
//! # Core Concepts
//!
//! - **Source**: where characters, biographies and thumbnails come from
//! - **Mentions**: case-insensitive, whole-word occurrence counts
//! - **Network**: an undirected, weighted graph built by max-merging the
//!   two directional counts of each pair
//! - **Cache**: a durable JSON memo table so reruns avoid remote calls
//!
//! # Example
//!
//! ```
//! use charnet::{MemoryCache, PipelineConfig, StaticSource};
//! use std::time::Duration;
//!
//! let source = StaticSource::new()
//!     .with_character("Alice", "Alice met Bob twice. Bob waved.")
//!     .with_character("Bob", "Bob knows Alice");
//! let config = PipelineConfig::default().with_delay(Duration::ZERO);
//!
//! let view = charnet::run(&MemoryCache::new(), &source, &config).unwrap();
//! assert_eq!(view.edge_count, 1);
//! assert_eq!(view.edges[0].weight, 2);
//! ```

pub mod builder;
pub mod cache;
mod error;
pub mod graph;
pub mod mentions;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod stats;
pub mod wiki;

pub use builder::{BuildOutcome, CancellationToken, FixedDelay, NetworkBuilder, NoPacing, Pacer};
pub use cache::{Cache, CacheError, JsonFileCache, MemoryCache, OpenCache};
pub use error::{CharnetError, CharnetResult};
pub use graph::{CharacterGraph, CharacterId, Edge};
pub use mentions::{count_mentions, MentionCounter};
pub use pipeline::{load_or_build_network, resolve_image_urls, run, PipelineConfig};
pub use render::{NetworkView, RenderError};
pub use source::{CharacterSource, StaticSource};
pub use stats::{character_stats, node_size, normalize_edge_weights, CharacterStats, NetworkSummary};
pub use wiki::{WikiClient, WikiConfig, WikiError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

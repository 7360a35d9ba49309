//! Run orchestration: cache-or-build the network, resolve images, assemble the view

use crate::builder::{CancellationToken, FixedDelay, NetworkBuilder, Pacer, DEFAULT_DELAY};
use crate::cache::{image_key, Cache, NETWORK_KEY};
use crate::error::CharnetResult;
use crate::graph::{CharacterGraph, CharacterId};
use crate::render::{NetworkView, DEFAULT_TITLE};
use crate::source::CharacterSource;
use std::collections::BTreeMap;
use std::time::Duration;

/// Settings for one run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Remove every cache entry before starting
    pub clear_cache: bool,
    /// Spacing between successive remote fetches
    pub delay: Duration,
    /// Title of the rendered view
    pub title: String,
    /// Checked between characters during the build
    pub cancel: CancellationToken,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clear_cache: false,
            delay: DEFAULT_DELAY,
            title: DEFAULT_TITLE.to_string(),
            cancel: CancellationToken::new(),
        }
    }
}

impl PipelineConfig {
    pub fn with_clear_cache(mut self, clear: bool) -> Self {
        self.clear_cache = clear;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }
}

/// Where the network came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOrigin {
    Cache,
    Built,
}

/// A network plus its provenance
#[derive(Debug, Clone)]
pub struct LoadedNetwork {
    pub graph: CharacterGraph,
    pub origin: NetworkOrigin,
}

/// Load the network from the cache, or build and cache it.
///
/// Only a complete, non-empty build is cached: a cancelled run or an
/// empty enumeration (usually an unreachable wiki) would otherwise pin a
/// bad result until the cache is cleared.
pub fn load_or_build_network<C, S>(
    cache: &C,
    source: &S,
    builder: &NetworkBuilder,
) -> CharnetResult<LoadedNetwork>
where
    C: Cache,
    S: CharacterSource,
{
    if let Some(graph) = cache.get::<CharacterGraph>(NETWORK_KEY) {
        tracing::info!(nodes = graph.node_count(), edges = graph.edge_count(), "loaded network from cache");
        return Ok(LoadedNetwork {
            graph,
            origin: NetworkOrigin::Cache,
        });
    }

    tracing::info!("building network");
    let outcome = builder.build_from_source(source);
    if outcome.is_complete() && !outcome.graph.is_empty() {
        cache.set(NETWORK_KEY, &outcome.graph)?;
    } else {
        tracing::warn!(
            processed = outcome.processed,
            total = outcome.total,
            "network not cached"
        );
    }

    Ok(LoadedNetwork {
        graph: outcome.graph,
        origin: NetworkOrigin::Built,
    })
}

/// Thumbnail URL for every character in the graph, through the cache.
///
/// Only non-empty URLs are stored, and an empty cached URL is a miss: the
/// source returns empty both for "no image" and for a failed fetch, so
/// imageless characters are looked up again on every run. Remote lookups
/// are spaced by `pacer`.
pub fn resolve_image_urls<C, S>(
    cache: &C,
    source: &S,
    graph: &CharacterGraph,
    pacer: &dyn Pacer,
) -> CharnetResult<BTreeMap<CharacterId, String>>
where
    C: Cache,
    S: CharacterSource,
{
    let mut urls = BTreeMap::new();
    let mut fetched = 0usize;

    for character in graph.characters() {
        let key = image_key(character.as_str());
        let url = match cache.get::<String>(&key) {
            Some(url) if !url.is_empty() => url,
            _ => {
                if fetched > 0 {
                    pacer.pause();
                }
                let url = source.fetch_image_url(character);
                if !url.is_empty() {
                    cache.set(&key, &url)?;
                }
                fetched += 1;
                url
            }
        };
        urls.insert(character.clone(), url);
    }

    tracing::info!(characters = urls.len(), fetched, "resolved character images");
    Ok(urls)
}

/// Full run: optional cache reset, network, images, view.
pub fn run<C, S>(cache: &C, source: &S, config: &PipelineConfig) -> CharnetResult<NetworkView>
where
    C: Cache,
    S: CharacterSource,
{
    if config.clear_cache {
        cache.clear()?;
    }

    let builder = NetworkBuilder::new()
        .with_pacer(FixedDelay(config.delay))
        .with_cancellation(config.cancel.clone());
    let network = load_or_build_network(cache, source, &builder)?;

    tracing::info!("getting character images");
    let images = resolve_image_urls(cache, source, &network.graph, &FixedDelay(config.delay))?;

    tracing::info!("creating view");
    Ok(NetworkView::from_graph(&network.graph, &images).with_title(config.title.clone()))
}

//! Network construction: biographies in, co-occurrence graph out
//!
//! Each character's biography is scanned independently for mentions of
//! every known character. A pair's edge weight is the larger of the two
//! directional counts, so the result does not depend on the order in which
//! characters are processed.

mod cancel;
mod pacing;

pub use cancel::CancellationToken;
pub use pacing::{FixedDelay, NoPacing, Pacer, DEFAULT_DELAY};

use crate::graph::{CharacterGraph, CharacterId};
use crate::mentions::{MentionCounter, MentionCounts};
use crate::source::CharacterSource;
use std::collections::BTreeSet;

/// Result of a build run.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The folded graph; valid even when the run was cancelled
    pub graph: CharacterGraph,
    /// Characters whose biographies were scanned
    pub processed: usize,
    /// Distinct characters in the input
    pub total: usize,
    /// Whether the run stopped early on the cancellation token
    pub cancelled: bool,
}

impl BuildOutcome {
    /// True if every character was processed
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.processed == self.total
    }
}

/// Builds a [`CharacterGraph`] from a character set and a biography fetcher.
///
/// Every input character is materialized as a node, so characters nobody
/// mentions appear as isolated nodes. Characters are processed one at a
/// time, with the pacer called between successive fetches.
pub struct NetworkBuilder {
    pacer: Box<dyn Pacer>,
    cancel: CancellationToken,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    /// Builder with the default live-source pacing (one second)
    pub fn new() -> Self {
        Self {
            pacer: Box::new(FixedDelay::default()),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the pacing strategy
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    /// Stop between characters once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Build the network, returning only the graph.
    pub fn build<'a, F>(
        &self,
        characters: impl IntoIterator<Item = &'a CharacterId>,
        fetch_biography: F,
    ) -> CharacterGraph
    where
        F: FnMut(&CharacterId) -> String,
    {
        self.run(characters, fetch_biography).graph
    }

    /// Enumerate a source's characters and build from its biographies.
    pub fn build_from_source(&self, source: &impl CharacterSource) -> BuildOutcome {
        let characters = source.enumerate_characters();
        tracing::info!(characters = characters.len(), "enumerated characters");
        self.run(&characters, |c| source.fetch_biography(c))
    }

    /// Build the network, reporting progress and cancellation.
    ///
    /// Characters are processed in the given order; duplicates are
    /// processed once. An empty or failed biography contributes nothing.
    pub fn run<'a, F>(
        &self,
        characters: impl IntoIterator<Item = &'a CharacterId>,
        mut fetch_biography: F,
    ) -> BuildOutcome
    where
        F: FnMut(&CharacterId) -> String,
    {
        let mut seen = BTreeSet::new();
        let order: Vec<&CharacterId> = characters
            .into_iter()
            .filter(|c| seen.insert(*c))
            .collect();

        let counter = MentionCounter::new(order.iter().copied());
        let mut graph = CharacterGraph::new();
        for character in &order {
            graph.add_character((*character).clone());
        }

        let mut processed = 0;
        let mut cancelled = false;
        for (i, character) in order.iter().enumerate() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            if i > 0 {
                self.pacer.pause();
                if self.cancel.is_cancelled() {
                    cancelled = true;
                    break;
                }
            }

            tracing::info!(character = %character, "processing character");
            let text = fetch_biography(character);
            let counts = counter.count(&text);
            let touched = fold_mentions(&mut graph, character, &counts);
            tracing::debug!(character = %character, edges = touched, "folded mentions");
            processed += 1;
        }

        if cancelled {
            tracing::warn!(processed, total = order.len(), "build cancelled");
        } else {
            tracing::info!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "network built"
            );
        }

        BuildOutcome {
            graph,
            processed,
            total: order.len(),
            cancelled,
        }
    }
}

/// Fold one character's mention counts into the graph.
///
/// Self mentions and zero counts are skipped; every other count is
/// max-merged into the edge with that character. Returns the number of
/// edges created or updated.
pub fn fold_mentions(graph: &mut CharacterGraph, source: &CharacterId, counts: &MentionCounts) -> usize {
    counts
        .iter()
        .filter(|&(mentioned, &count)| mentioned != source && count > 0)
        .filter_map(|(mentioned, &count)| graph.merge_mention(source, mentioned, count))
        .count()
}

//! The retrieval facade: owns the index lifecycle and ties query analysis,
//! candidate narrowing, scoring and fusion together.
//!
//! Builds follow the swap pattern: a new [`ChunkIndex`] is assembled off to
//! the side and the current `Arc` is replaced only after the build
//! succeeds, so in-flight searches finish against the old index and a
//! failed build leaves the previous collection active.

use crate::config::RankingConfig;
use crate::fusion::fuse;
use crate::scoring::{score_candidates, QuerySignals};
use docqa_core::encode::{SemanticEncoder, TermFrequencyEncoder};
use docqa_core::error::{Error, Result};
use docqa_core::types::{Chunk, ChunkId, RankedResult, SearchFilters};
use docqa_index::{ChunkIndex, IndexStats};
use docqa_query::{Lexicon, QueryAnalysis, QueryAnalyzer};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Per-call knobs. `max_results` falls back to the configured default and
/// is always clamped to the configured cap; `filters` are explicit hard
/// constraints that take precedence over analyzer-derived ones, dimension
/// by dimension.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub max_results: Option<usize>,
    pub filters: SearchFilters,
}

pub struct Retriever {
    analyzer: QueryAnalyzer,
    encoder: Box<dyn SemanticEncoder>,
    config: RankingConfig,
    index: RwLock<Option<Arc<ChunkIndex>>>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Retriever {
    /// Facade with the default bag-of-words encoder.
    pub fn new(lexicon: &Lexicon, config: RankingConfig) -> Result<Self> {
        Self::with_encoder(lexicon, config, Box::new(TermFrequencyEncoder))
    }

    /// Facade with a caller-supplied encoder, e.g. a model-backed one.
    pub fn with_encoder(
        lexicon: &Lexicon,
        config: RankingConfig,
        encoder: Box<dyn SemanticEncoder>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: QueryAnalyzer::new(lexicon)?,
            encoder,
            config,
            index: RwLock::new(None),
        })
    }

    /// Validate and index a collection, then swap it in as current. On
    /// error the previous index, if any, stays active.
    pub fn build(&self, chunks: Vec<Chunk>) -> Result<()> {
        let built = Arc::new(ChunkIndex::build(chunks, self.encoder.as_ref())?);
        let mut guard = self
            .index
            .write()
            .map_err(|e| Error::Operation(format!("index lock poisoned: {e}")))?;
        *guard = Some(built);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.index.read().is_ok_and(|guard| guard.is_some())
    }

    /// The query analysis alone, for diagnostics and prompt assembly.
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        self.analyzer.analyze(query)
    }

    /// Index sizes of the current collection; `NotReady` before the first
    /// successful build.
    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.snapshot()?.stats())
    }

    /// Analyze, narrow, score and rank. Zero matches yield an empty list,
    /// never an error; searching before the first build is `NotReady`.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<RankedResult>> {
        let index = self.snapshot()?;
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let analysis = self.analyzer.analyze(query);
        let filters = merge_filters(&options.filters, &analysis);
        let candidates = narrow(&index, &filters);

        let vector = self.encoder.encode(query);
        let lowered = query.to_lowercase();
        let signals = QuerySignals {
            vector: &vector,
            terms: &analysis.keywords,
            lowered: &lowered,
            filters: &filters,
        };
        let scored = score_candidates(&index, &candidates, &signals);

        let limit = options
            .max_results
            .unwrap_or(self.config.max_results)
            .min(self.config.max_results_cap);
        let fused = fuse(scored, &self.config, limit);

        debug!(
            candidates = candidates.len(),
            returned = fused.len(),
            strategy = ?self.config.strategy,
            "search ranked"
        );

        Ok(fused
            .into_iter()
            .filter_map(|result| {
                index.chunk(result.id).map(|chunk| RankedResult {
                    chunk: chunk.clone(),
                    score: result.score,
                    components: result.components,
                })
            })
            .collect())
    }

    fn snapshot(&self) -> Result<Arc<ChunkIndex>> {
        let guard = self
            .index
            .read()
            .map_err(|e| Error::Operation(format!("index lock poisoned: {e}")))?;
        guard.clone().ok_or(Error::NotReady)
    }
}

/// Explicit filters win per dimension; the analysis fills only dimensions
/// the caller left unconstrained. Sections are never analyzer-derived, and
/// image intent only ever narrows toward chunks that have images.
fn merge_filters(explicit: &SearchFilters, analysis: &QueryAnalysis) -> SearchFilters {
    let mut merged = explicit.clone();
    if merged.states.is_empty() {
        if let Some(state) = &analysis.state {
            merged.states.insert(state.clone());
        }
    }
    if merged.topics.is_empty() {
        merged.topics.extend(analysis.topics.iter().cloned());
    }
    if merged.has_images.is_none() && analysis.requires_image {
        merged.has_images = Some(true);
    }
    merged
}

/// Metadata narrowing with the documented fallback: when the filters leave
/// no candidates but the collection is non-empty, search the whole
/// collection rather than silently returning nothing.
fn narrow(index: &ChunkIndex, filters: &SearchFilters) -> Vec<ChunkId> {
    let narrowed = index.metadata.narrow(filters);
    if narrowed.is_empty() && !index.is_empty() {
        warn!(?filters, "filters matched no chunks, widening to full collection");
        return index.chunk_ids().collect();
    }
    narrowed
}

//! Domain types shared by the query analyzer, indexer and retrieval engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type ChunkId = u32;

/// A visual reference attached to a chunk by the upstream chunker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub filename: String,
    pub label: String,
}

/// Tags derived from chunk text at chunk-creation time, never mutated after
/// indexing. The tag sets use B-tree sets so iteration order is stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub states: BTreeSet<String>,
    pub sections: BTreeSet<String>,
    pub topics: BTreeSet<String>,
    pub has_images: bool,
    pub image_count: usize,
    pub word_count: usize,
}

/// A chunk of a source document that is independently indexed.
///
/// - `id`: unique identifier, stable within one collection build
/// - `text`: normalized text payload
/// - `images`: visual references in document order (possibly empty)
/// - `metadata`: tags carried over from chunking; `has_images` must agree
///   with `image_count` and with `images` being non-empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub metadata: ChunkMetadata,
}

/// Hard constraints on chunk tags, supplied by the caller or derived from
/// query analysis. An empty dimension places no constraint; several values
/// within one dimension are alternatives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub states: BTreeSet<String>,
    #[serde(default)]
    pub sections: BTreeSet<String>,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub has_images: Option<bool>,
}

impl SearchFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
            && self.sections.is_empty()
            && self.topics.is_empty()
            && self.has_images.is_none()
    }
}

/// Per-index scores carried on every result for explainability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub semantic: f32,
    pub keyword: f32,
    pub metadata: f32,
    pub image: f32,
}

/// The surface returned by retrieval.
///
/// `score` is the fused score; higher is always better, and ties resolve
/// toward the lower chunk id. `components` holds the per-index scores that
/// went into the fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub chunk: Chunk,
    pub score: f32,
    pub components: ComponentScores,
}

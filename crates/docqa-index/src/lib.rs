//! In-memory retrieval indices over one chunk collection.
//!
//! [`ChunkIndex`] is an immutable value: build one from a finalized
//! collection, swap it in behind the facade, never mutate it. The four
//! strategy indices (semantic, keyword, metadata, image) are internal
//! fields of the one index value, and a rebuild is always a full replace.

pub mod image;
pub mod keyword;
pub mod metadata;
pub mod semantic;

pub use image::{ImageEntry, ImageIndex};
pub use keyword::{KeywordIndex, DIAGNOSTIC_TERMS};
pub use metadata::MetadataIndex;
pub use semantic::SemanticIndex;

use docqa_core::encode::SemanticEncoder;
use docqa_core::error::{Error, Result};
use docqa_core::types::{Chunk, ChunkId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Size summary surfaced for status output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexStats {
    pub chunks: usize,
    pub vocabulary: usize,
    pub tagged_states: usize,
    pub tagged_sections: usize,
    pub tagged_topics: usize,
    pub chunks_with_images: usize,
}

#[derive(Debug)]
pub struct ChunkIndex {
    chunks: Vec<Chunk>,
    positions: HashMap<ChunkId, usize>,
    pub semantic: SemanticIndex,
    pub keyword: KeywordIndex,
    pub metadata: MetadataIndex,
    pub image: ImageIndex,
}

impl ChunkIndex {
    /// Validate and index a collection. An empty collection is legal and
    /// yields a ready index that answers every search with no results.
    pub fn build(chunks: Vec<Chunk>, encoder: &dyn SemanticEncoder) -> Result<Self> {
        validate(&chunks)?;

        let semantic = SemanticIndex::build(&chunks, encoder);
        let keyword = KeywordIndex::build(&chunks);
        let metadata = MetadataIndex::build(&chunks);
        let image = ImageIndex::build(&chunks);
        let positions = chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| (chunk.id, position))
            .collect();

        info!(
            chunks = chunks.len(),
            vocabulary = keyword.vocabulary_len(),
            with_images = image.len(),
            "chunk index built"
        );

        Ok(Self {
            chunks,
            positions,
            semantic,
            keyword,
            metadata,
            image,
        })
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.positions.get(&id).map(|&position| &self.chunks[position])
    }

    /// Chunk ids in processing order.
    pub fn chunk_ids(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.chunks.iter().map(|chunk| chunk.id)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            chunks: self.chunks.len(),
            vocabulary: self.keyword.vocabulary_len(),
            tagged_states: self.metadata.state_count(),
            tagged_sections: self.metadata.section_count(),
            tagged_topics: self.metadata.topic_count(),
            chunks_with_images: self.image.len(),
        }
    }
}

/// The whole build fails on the first malformed record; partial indices
/// never become current.
fn validate(chunks: &[Chunk]) -> Result<()> {
    let mut seen: HashSet<ChunkId> = HashSet::with_capacity(chunks.len());
    for chunk in chunks {
        if !seen.insert(chunk.id) {
            return Err(Error::InvalidChunk {
                id: chunk.id,
                reason: "duplicate chunk id".to_string(),
            });
        }
        let meta = &chunk.metadata;
        let attached = !chunk.images.is_empty();
        if meta.has_images != attached || (meta.image_count > 0) != attached {
            return Err(Error::InvalidChunk {
                id: chunk.id,
                reason: format!(
                    "has_images={} and image_count={} disagree with {} attached image(s)",
                    meta.has_images,
                    meta.image_count,
                    chunk.images.len()
                ),
            });
        }
    }
    Ok(())
}

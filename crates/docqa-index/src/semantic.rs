//! Bag-of-words vectors per chunk.

use docqa_core::encode::{cosine, SemanticEncoder, SparseVector};
use docqa_core::types::{Chunk, ChunkId};
use std::collections::HashMap;

#[derive(Debug)]
pub struct SemanticIndex {
    vectors: HashMap<ChunkId, SparseVector>,
}

impl SemanticIndex {
    pub fn build(chunks: &[Chunk], encoder: &dyn SemanticEncoder) -> Self {
        let vectors = chunks
            .iter()
            .map(|chunk| (chunk.id, encoder.encode(&chunk.text)))
            .collect();
        Self { vectors }
    }

    pub fn vector(&self, id: ChunkId) -> Option<&SparseVector> {
        self.vectors.get(&id)
    }

    /// Cosine of the query vector against one chunk; 0 for unknown chunks
    /// and for chunks that encoded to the zero vector.
    pub fn score(&self, query: &SparseVector, id: ChunkId) -> f32 {
        self.vector(id).map_or(0.0, |vector| cosine(query, vector))
    }
}

//! Inverted tag lists for candidate narrowing.

use docqa_core::types::{Chunk, ChunkId, SearchFilters};
use std::collections::{BTreeMap, HashSet};

/// Inverted maps per tag dimension. Every list keeps chunk processing
/// order; duplicates cannot occur because tags are sets per chunk.
#[derive(Debug)]
pub struct MetadataIndex {
    states: BTreeMap<String, Vec<ChunkId>>,
    sections: BTreeMap<String, Vec<ChunkId>>,
    topics: BTreeMap<String, Vec<ChunkId>>,
    with_images: Vec<ChunkId>,
    without_images: Vec<ChunkId>,
    all: Vec<ChunkId>,
}

impl MetadataIndex {
    pub fn build(chunks: &[Chunk]) -> Self {
        let mut states: BTreeMap<String, Vec<ChunkId>> = BTreeMap::new();
        let mut sections: BTreeMap<String, Vec<ChunkId>> = BTreeMap::new();
        let mut topics: BTreeMap<String, Vec<ChunkId>> = BTreeMap::new();
        let mut with_images = Vec::new();
        let mut without_images = Vec::new();
        let mut all = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let meta = &chunk.metadata;
            for value in &meta.states {
                states.entry(value.clone()).or_default().push(chunk.id);
            }
            for value in &meta.sections {
                sections.entry(value.clone()).or_default().push(chunk.id);
            }
            for value in &meta.topics {
                topics.entry(value.clone()).or_default().push(chunk.id);
            }
            if meta.has_images {
                with_images.push(chunk.id);
            } else {
                without_images.push(chunk.id);
            }
            all.push(chunk.id);
        }

        Self {
            states,
            sections,
            topics,
            with_images,
            without_images,
            all,
        }
    }

    pub fn chunks_for_state(&self, value: &str) -> &[ChunkId] {
        self.states.get(value).map_or(&[], Vec::as_slice)
    }

    pub fn chunks_for_section(&self, value: &str) -> &[ChunkId] {
        self.sections.get(value).map_or(&[], Vec::as_slice)
    }

    pub fn chunks_for_topic(&self, value: &str) -> &[ChunkId] {
        self.topics.get(value).map_or(&[], Vec::as_slice)
    }

    pub fn chunks_with_images(&self) -> &[ChunkId] {
        &self.with_images
    }

    /// Intersect the inverted lists selected by the active filter
    /// dimensions; within one dimension several values union. The result
    /// keeps chunk processing order. Empty filters select everything; the
    /// empty-result fallback is the ranking engine's policy, not ours.
    pub fn narrow(&self, filters: &SearchFilters) -> Vec<ChunkId> {
        if filters.is_empty() {
            return self.all.clone();
        }

        let mut allowed: Vec<HashSet<ChunkId>> = Vec::new();
        if !filters.states.is_empty() {
            allowed.push(
                filters
                    .states
                    .iter()
                    .flat_map(|value| self.chunks_for_state(value))
                    .copied()
                    .collect(),
            );
        }
        if !filters.sections.is_empty() {
            allowed.push(
                filters
                    .sections
                    .iter()
                    .flat_map(|value| self.chunks_for_section(value))
                    .copied()
                    .collect(),
            );
        }
        if !filters.topics.is_empty() {
            allowed.push(
                filters
                    .topics
                    .iter()
                    .flat_map(|value| self.chunks_for_topic(value))
                    .copied()
                    .collect(),
            );
        }
        if let Some(flag) = filters.has_images {
            let list = if flag {
                &self.with_images
            } else {
                &self.without_images
            };
            allowed.push(list.iter().copied().collect());
        }

        self.all
            .iter()
            .copied()
            .filter(|id| allowed.iter().all(|set| set.contains(id)))
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

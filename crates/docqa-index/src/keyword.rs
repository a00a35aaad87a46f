//! TF-IDF keyword index.
//!
//! Vocabulary comes from the corpus alone; weights are raw term frequency
//! times `ln(N / df)`. A term present in every chunk therefore weighs zero
//! no matter how often it repeats.

use docqa_core::tokenize::tokenize;
use docqa_core::types::{Chunk, ChunkId};
use std::collections::{BTreeMap, HashMap};

/// How many of the heaviest terms per chunk are kept for diagnostics.
pub const DIAGNOSTIC_TERMS: usize = 20;

#[derive(Debug)]
pub struct KeywordIndex {
    weights: HashMap<ChunkId, HashMap<String, f32>>,
    document_frequency: BTreeMap<String, usize>,
    top_terms: HashMap<ChunkId, Vec<(String, f32)>>,
    chunk_count: usize,
}

impl KeywordIndex {
    pub fn build(chunks: &[Chunk]) -> Self {
        let chunk_count = chunks.len();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut term_counts: Vec<(ChunkId, HashMap<String, usize>)> =
            Vec::with_capacity(chunk_count);
        for chunk in chunks {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for term in tokenize(&chunk.text) {
                *counts.entry(term).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            term_counts.push((chunk.id, counts));
        }

        let mut weights = HashMap::with_capacity(chunk_count);
        let mut top_terms = HashMap::with_capacity(chunk_count);
        for (id, counts) in term_counts {
            let mut vector: HashMap<String, f32> = HashMap::with_capacity(counts.len());
            for (term, tf) in counts {
                let df = document_frequency[&term];
                let idf = (chunk_count as f32 / df as f32).ln();
                vector.insert(term, tf as f32 * idf);
            }
            let mut ranked: Vec<(String, f32)> =
                vector.iter().map(|(term, w)| (term.clone(), *w)).collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(DIAGNOSTIC_TERMS);
            top_terms.insert(id, ranked);
            weights.insert(id, vector);
        }

        Self {
            weights,
            document_frequency,
            top_terms,
            chunk_count,
        }
    }

    /// Mean TF-IDF weight of the query terms within one chunk. Terms the
    /// chunk does not carry contribute 0; an empty term list scores 0.
    pub fn query_score(&self, terms: &[String], id: ChunkId) -> f32 {
        if terms.is_empty() {
            return 0.0;
        }
        let Some(vector) = self.weights.get(&id) else {
            return 0.0;
        };
        let sum: f32 = terms
            .iter()
            .map(|term| vector.get(term).copied().unwrap_or(0.0))
            .sum();
        sum / terms.len() as f32
    }

    pub fn weight(&self, id: ChunkId, term: &str) -> f32 {
        self.weights
            .get(&id)
            .and_then(|vector| vector.get(term).copied())
            .unwrap_or(0.0)
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// The heaviest terms of one chunk, weight-descending.
    pub fn top_terms(&self, id: ChunkId) -> &[(String, f32)] {
        self.top_terms.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }
}

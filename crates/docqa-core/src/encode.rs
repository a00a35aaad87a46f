//! Semantic vectors for chunks and queries.
//!
//! The encoder here is a deterministic bag-of-words stand-in for a real
//! embedding model. Production deployments swap a model-backed
//! implementation in behind [`SemanticEncoder`]; the cosine contract stays
//! the same either way.

use crate::tokenize::tokenize;
use std::collections::BTreeMap;

/// Sparse term-to-weight vector. [`TermFrequencyEncoder`] produces these
/// unit-L2-normalized, or empty when the text has no qualifying terms.
pub type SparseVector = BTreeMap<String, f32>;

/// Seam between the retrieval engine and whatever produces semantic
/// vectors. Implementations must be deterministic for a fixed input.
pub trait SemanticEncoder: Send + Sync {
    fn encode(&self, text: &str) -> SparseVector;
}

/// Counts tokenizer terms and scales the counts to unit L2 norm. Texts with
/// no qualifying terms encode to the empty vector, which scores 0 against
/// everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequencyEncoder;

impl SemanticEncoder for TermFrequencyEncoder {
    fn encode(&self, text: &str) -> SparseVector {
        let mut vector = SparseVector::new();
        for term in tokenize(text) {
            *vector.entry(term).or_insert(0.0) += 1.0;
        }
        let norm = vector.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity with a zero-vector guard: anything scored against an
/// empty or zero vector is 0.
#[must_use]
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f32 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f32>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

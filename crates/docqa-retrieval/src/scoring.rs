//! Per-candidate component scoring.
//!
//! Each of the four indices scores a candidate independently; fusion is a
//! separate step so the strategies stay interchangeable.

use docqa_core::encode::SparseVector;
use docqa_core::types::{Chunk, ChunkId, ComponentScores, SearchFilters};
use docqa_index::ChunkIndex;

/// A candidate chunk with its four component scores, before fusion.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate {
    pub id: ChunkId,
    pub components: ComponentScores,
}

/// Everything a scoring pass needs about the query, computed once per
/// search rather than per candidate.
pub struct QuerySignals<'a> {
    pub vector: &'a SparseVector,
    pub terms: &'a [String],
    pub lowered: &'a str,
    pub filters: &'a SearchFilters,
}

pub fn score_candidates(
    index: &ChunkIndex,
    candidates: &[ChunkId],
    signals: &QuerySignals<'_>,
) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .map(|&id| ScoredCandidate {
            id,
            components: ComponentScores {
                semantic: index.semantic.score(signals.vector, id),
                keyword: index.keyword.query_score(signals.terms, id),
                metadata: index
                    .chunk(id)
                    .map_or(0.0, |chunk| metadata_score(chunk, signals.filters)),
                image: index.image.score(id, signals.lowered),
            },
        })
        .collect()
}

/// Fraction of active filter dimensions (state, section, topic) the chunk
/// matches; a neutral 0.5 when no dimension is active. `has_images` is a
/// hard narrowing constraint, not a soft signal, so it does not count here.
fn metadata_score(chunk: &Chunk, filters: &SearchFilters) -> f32 {
    let meta = &chunk.metadata;
    let mut active = 0usize;
    let mut matched = 0usize;

    let dims = [
        (&filters.states, &meta.states),
        (&filters.sections, &meta.sections),
        (&filters.topics, &meta.topics),
    ];
    for (requested, tagged) in dims {
        if requested.is_empty() {
            continue;
        }
        active += 1;
        if requested.iter().any(|value| tagged.contains(value)) {
            matched += 1;
        }
    }

    if active == 0 {
        0.5
    } else {
        matched as f32 / active as f32
    }
}

#[cfg(test)]
mod tests {
    use super::metadata_score;
    use docqa_core::types::{Chunk, ChunkMetadata, SearchFilters};

    fn tagged_chunk(states: &[&str], topics: &[&str]) -> Chunk {
        Chunk {
            id: 1,
            text: String::new(),
            images: Vec::new(),
            metadata: ChunkMetadata {
                states: states.iter().map(|s| (*s).to_string()).collect(),
                topics: topics.iter().map(|s| (*s).to_string()).collect(),
                ..ChunkMetadata::default()
            },
        }
    }

    #[test]
    fn neutral_when_no_dimension_is_active() {
        let chunk = tagged_chunk(&["OH"], &[]);
        let score = metadata_score(&chunk, &SearchFilters::default());
        assert!((score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fraction_of_active_dimensions() {
        let chunk = tagged_chunk(&["OH"], &["delivery"]);
        let filters = SearchFilters {
            states: ["OH".to_string()].into(),
            topics: ["ordering".to_string()].into(),
            ..SearchFilters::default()
        };
        let score = metadata_score(&chunk, &filters);
        assert!((score - 0.5).abs() < f32::EPSILON, "one of two dims matches");
    }

    #[test]
    fn any_value_within_a_dimension_counts() {
        let chunk = tagged_chunk(&["MD"], &[]);
        let filters = SearchFilters {
            states: ["OH".to_string(), "MD".to_string()].into(),
            ..SearchFilters::default()
        };
        assert!((metadata_score(&chunk, &filters) - 1.0).abs() < f32::EPSILON);
    }
}

//! Score fusion: weighted sum or reciprocal-rank fusion over the four
//! component scores. Both strategies are deterministic; ties resolve toward
//! the lower chunk id, inside the per-index rankings as well as in the
//! fused order.

use crate::config::{FusionStrategy, RankingConfig};
use crate::scoring::ScoredCandidate;
use docqa_core::types::{ChunkId, ComponentScores};

/// A candidate after fusion, carrying the fused score and the component
/// scores that produced it.
#[derive(Debug, Clone, Copy)]
pub struct FusedCandidate {
    pub id: ChunkId,
    pub score: f32,
    pub components: ComponentScores,
}

/// Fuse, sort descending by fused score, and truncate to `limit`.
pub fn fuse(
    candidates: Vec<ScoredCandidate>,
    config: &RankingConfig,
    limit: usize,
) -> Vec<FusedCandidate> {
    let scores = match config.strategy {
        FusionStrategy::WeightedSum => weighted_sum(&candidates, config),
        FusionStrategy::ReciprocalRank => reciprocal_rank(&candidates, config.rrf_k),
    };

    let mut fused: Vec<FusedCandidate> = candidates
        .iter()
        .zip(scores)
        .map(|(candidate, score)| FusedCandidate {
            id: candidate.id,
            score,
            components: candidate.components,
        })
        .collect();
    fused.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    fused.truncate(limit);
    fused
}

fn weighted_sum(candidates: &[ScoredCandidate], config: &RankingConfig) -> Vec<f32> {
    let w = &config.weights;
    candidates
        .iter()
        .map(|candidate| {
            let c = &candidate.components;
            w.semantic * c.semantic
                + w.keyword * c.keyword
                + w.metadata * c.metadata
                + w.image * c.image
        })
        .collect()
}

/// `Σ 1/(k + rank)` over the four per-index rankings, rank starting at 1.
/// Every candidate appears in every ranking, so the fused order is total
/// even when whole components are zero across the board.
fn reciprocal_rank(candidates: &[ScoredCandidate], k: f32) -> Vec<f32> {
    type Component = fn(&ComponentScores) -> f32;
    const COMPONENTS: [Component; 4] = [
        |c| c.semantic,
        |c| c.keyword,
        |c| c.metadata,
        |c| c.image,
    ];

    let mut totals = vec![0.0f32; candidates.len()];
    for component in COMPONENTS {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            component(&candidates[b].components)
                .total_cmp(&component(&candidates[a].components))
                .then_with(|| candidates[a].id.cmp(&candidates[b].id))
        });
        for (rank, &position) in order.iter().enumerate() {
            totals[position] += 1.0 / (k + rank as f32 + 1.0);
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: ChunkId, semantic: f32, keyword: f32) -> ScoredCandidate {
        ScoredCandidate {
            id,
            components: ComponentScores {
                semantic,
                keyword,
                metadata: 0.5,
                image: 0.0,
            },
        }
    }

    #[test]
    fn weighted_sum_orders_by_combined_score() {
        let fused = fuse(
            vec![candidate(1, 0.2, 0.1), candidate(2, 0.9, 0.8)],
            &RankingConfig::default(),
            10,
        );
        assert_eq!(fused[0].id, 2);
        assert!(fused[0].score > fused[1].score);
    }

    #[test]
    fn rrf_agrees_with_weighted_sum_on_a_dominant_candidate() {
        let candidates = vec![candidate(1, 0.1, 0.0), candidate(2, 0.9, 0.9)];
        let weighted = fuse(candidates.clone(), &RankingConfig::default(), 10);
        let rrf_config = RankingConfig {
            strategy: FusionStrategy::ReciprocalRank,
            ..RankingConfig::default()
        };
        let rrf = fuse(candidates, &rrf_config, 10);
        assert_eq!(weighted[0].id, rrf[0].id);
    }

    #[test]
    fn ties_resolve_toward_the_lower_chunk_id() {
        let fused = fuse(
            vec![candidate(7, 0.5, 0.5), candidate(3, 0.5, 0.5)],
            &RankingConfig::default(),
            10,
        );
        assert_eq!(fused[0].id, 3);
    }

    #[test]
    fn fused_scores_are_finite_and_non_negative() {
        for strategy in [FusionStrategy::WeightedSum, FusionStrategy::ReciprocalRank] {
            let config = RankingConfig {
                strategy,
                ..RankingConfig::default()
            };
            let fused = fuse(
                vec![candidate(1, 0.0, 0.0), candidate(2, 1.0, 0.0)],
                &config,
                10,
            );
            for result in &fused {
                assert!(result.score.is_finite());
                assert!(result.score >= 0.0);
            }
        }
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let fused = fuse(
            vec![candidate(1, 0.1, 0.1), candidate(2, 0.9, 0.9), candidate(3, 0.5, 0.5)],
            &RankingConfig::default(),
            2,
        );
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].id, 2);
        assert_eq!(fused[1].id, 3);
    }
}

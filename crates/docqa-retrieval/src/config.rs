//! Ranking configuration with serde defaults, loadable through the figment
//! stack in `docqa-core` or constructed in code.

use docqa_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How component scores become one fused score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionStrategy {
    /// Fixed-weight linear combination of the four component scores.
    #[default]
    WeightedSum,
    /// Reciprocal-rank fusion over the four per-index rankings.
    ReciprocalRank,
}

/// Weights for the weighted-sum strategy. The defaults weight the three
/// text/metadata signals to 1.0 and treat image affinity as a bonus, so a
/// fused score may slightly exceed 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub semantic: f32,
    pub keyword: f32,
    pub metadata: f32,
    pub image: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            keyword: 0.3,
            metadata: 0.3,
            image: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub strategy: FusionStrategy,
    pub weights: FusionWeights,
    /// RRF constant; higher flattens the emphasis on top ranks.
    pub rrf_k: f32,
    /// Results returned when the caller does not ask for a count.
    pub max_results: usize,
    /// Hard cap on any requested result count.
    pub max_results_cap: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            strategy: FusionStrategy::default(),
            weights: FusionWeights::default(),
            rrf_k: 60.0,
            max_results: 5,
            max_results_cap: 50,
        }
    }
}

impl RankingConfig {
    /// Reject configurations that cannot produce a sane ranking.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (name, value) in [
            ("semantic", w.semantic),
            ("keyword", w.keyword),
            ("metadata", w.metadata),
            ("image", w.image),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "fusion weight '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }
        if w.semantic + w.keyword + w.metadata + w.image <= 0.0 {
            return Err(Error::InvalidConfig(
                "at least one fusion weight must be positive".to_string(),
            ));
        }
        if !self.rrf_k.is_finite() || self.rrf_k <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "rrf_k must be positive, got {}",
                self.rrf_k
            )));
        }
        if self.max_results_cap == 0 {
            return Err(Error::InvalidConfig(
                "max_results_cap must be at least 1".to_string(),
            ));
        }
        if self.max_results == 0 || self.max_results > self.max_results_cap {
            return Err(Error::InvalidConfig(format!(
                "max_results must be in 1..={}, got {}",
                self.max_results_cap, self.max_results
            )));
        }
        Ok(())
    }
}

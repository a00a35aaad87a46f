//! The analyzer's output type and its enums.

use serde::{Deserialize, Serialize};

/// Order programs recognized in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Rise,
    Regular,
}

impl OrderType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rise => "RISE",
            Self::Regular => "REGULAR",
        }
    }
}

/// Broad question intents, tested in declaration order; `General` is the
/// fallback when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    Procedural,
    Policy,
    Location,
    Definition,
    Comparison,
    General,
}

/// Structured signals extracted from one query.
///
/// Recomputed per search call and never persisted; only the filter-relevant
/// fields flow downstream into candidate narrowing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    /// Two-letter state code, at most one per query.
    pub state: Option<String>,
    pub order_type: Option<OrderType>,
    /// Matched topic categories in lexicon declaration order.
    pub topics: Vec<String>,
    pub requires_image: bool,
    pub question_type: QuestionType,
    /// Up to ten content terms in extraction order.
    pub keywords: Vec<String>,
    /// 0.5 base, raised by recognized signals, clamped to [0, 1].
    pub confidence: f32,
}

//! Free-text query analysis: structured filter signals extracted from a
//! question before retrieval.

pub mod analysis;
pub mod analyzer;
pub mod lexicon;

pub use analysis::{OrderType, QueryAnalysis, QuestionType};
pub use analyzer::QueryAnalyzer;
pub use lexicon::Lexicon;

//! Ranking engine and retrieval facade.
//!
//! [`Retriever`] is the public entry point: feed it a chunk collection once,
//! then search it with free-text questions. Each search analyzes the query,
//! narrows candidates through the metadata index, scores every candidate
//! against the four indices independently, and fuses the component scores
//! into one ranked list.

pub mod config;
pub mod fusion;
pub mod retriever;
pub mod scoring;

pub use config::{FusionStrategy, FusionWeights, RankingConfig};
pub use retriever::{Retriever, SearchOptions};

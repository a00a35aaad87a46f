use crate::types::ChunkId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Index not ready: no chunk collection has been built")]
    NotReady,

    #[error("Invalid chunk {id}: {reason}")]
    InvalidChunk { id: ChunkId, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use mapek_core::error::InvalidEventError;
use mapek_storage::StorageError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] InvalidEventError),

    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),
}

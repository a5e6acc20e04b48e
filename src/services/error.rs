use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("garden with id {0} does not exist")]
    GardenNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("background load failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

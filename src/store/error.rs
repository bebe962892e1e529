use thiserror::Error;

use crate::store::validation::ValidationError;

/// Errors returned by [`Store`](crate::store::Store) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("card with id {0} not found")]
    CardNotFound(String),

    #[error("list with id {0} not found")]
    ListNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A writer panicked while holding the collections lock.
    #[error("store lock poisoned")]
    Poisoned,
}

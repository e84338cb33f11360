//! Repository error types.

use thiserror::Error;

/// Errors reported by repository implementations.
///
/// Storage technology errors are boxed into `Backend` so the domain layer
/// stays independent of any particular driver.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The record to update does not exist.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps any backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        RepositoryError::Backend(Box::new(err))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

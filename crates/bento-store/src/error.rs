//! Store and repository errors.

use bento_core::ContentError;
use thiserror::Error;

/// Failures of the persistence collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No profile is stored under the owner key.
    #[error("profile '{0}' not found")]
    NotFound(String),

    /// IO error reading or writing storage.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document is not a valid profile.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`crate::ProfileStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Content does not match its declared widget type.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] ContentError),

    /// A reorder did not name exactly the current widgets.
    #[error("invalid permutation: expected the {expected} current widget ids, got {found}")]
    InvalidPermutation {
        /// Number of widgets in the collection
        expected: usize,
        /// Number of ids supplied
        found: usize,
    },

    /// The requested profile does not exist.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// A widget operation was called before any profile was loaded.
    #[error("no profile is loaded")]
    NotLoaded,

    /// Reading the profile from storage failed.
    #[error("persistence failure: {0}")]
    Persistence(#[source] RepositoryError),
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(owner) => Self::ProfileNotFound(owner),
            other => Self::Persistence(other),
        }
    }
}

//! Registry error type.

use taskman_core::ValidationError;
use taskman_storage::StorageError;

/// Errors returned by registry operations.
///
/// None of these leave the registry partially mutated.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Task inputs failed validation; nothing was added
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No task matches the given name
    #[error("task not found: {0}")]
    NotFound(String),

    /// The task has dependencies that are not completed yet
    #[error("task '{name}' is blocked by unfinished dependencies: {}", unsatisfied.join(", "))]
    Blocked {
        /// Name of the blocked task
        name: String,
        /// Dependency names without a completed match
        unsatisfied: Vec<String>,
    },

    /// The storage backend failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

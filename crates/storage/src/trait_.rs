//! Storage trait abstraction.

use async_trait::async_trait;
use taskman_core::Task;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for the task list.
///
/// The whole collection is loaded and saved at once, in order.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load every stored task. A store that does not exist yet holds no tasks.
    async fn load(&self) -> Result<Vec<Task>>;

    /// Replace the stored collection with `tasks`.
    async fn save(&mut self, tasks: &[Task]) -> Result<()>;
}

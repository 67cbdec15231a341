//! In-memory storage, shared between clones.

use std::sync::Arc;

use taskman_core::Task;
use tokio::sync::Mutex;

use super::{Result, Storage};

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    saves: usize,
}

/// Storage that keeps the task list in memory.
///
/// Clones share the same contents, so a caller can hand one clone to a
/// registry and inspect what it flushed through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `tasks`.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { tasks, saves: 0 })),
        }
    }

    /// Current stored contents.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.inner.lock().await.tasks.clone()
    }

    /// Number of saves performed so far.
    pub async fn save_count(&self) -> usize {
        self.inner.lock().await.saves
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Task>> {
        Ok(self.snapshot().await)
    }

    async fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.tasks = tasks.to_vec();
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_contents() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();

        let tasks = vec![Task::new("A", 1, "2024-01-10", vec![]).unwrap()];
        writer.save(&tasks).await.unwrap();

        assert_eq!(storage.load().await.unwrap(), tasks);
        assert_eq!(storage.save_count().await, 1);
    }

    #[tokio::test]
    async fn test_with_tasks() {
        let tasks = vec![Task::new("A", 1, "2024-01-10", vec![]).unwrap()];
        let storage = MemoryStorage::with_tasks(tasks.clone());
        assert_eq!(storage.snapshot().await, tasks);
        assert_eq!(storage.save_count().await, 0);
    }
}

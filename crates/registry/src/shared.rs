//! Registry handle for concurrent callers.

use std::sync::Arc;

use crate::error::{RegistryError, Result};
use crate::TaskRegistry;
use taskman_core::Task;
use taskman_storage::Storage;
use tokio::sync::RwLock;

/// Cloneable handle to a [`TaskRegistry`] behind a read/write lock.
///
/// `add` and `complete` hold the write lock for the whole mutation including
/// the flush; queries share the read lock. Results are returned as owned
/// clones so no lock outlives the call.
pub struct SharedRegistry<S: Storage> {
    inner: Arc<RwLock<TaskRegistry<S>>>,
}

impl<S: Storage> Clone for SharedRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage> SharedRegistry<S> {
    /// Wrap a registry.
    pub fn new(registry: TaskRegistry<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// See [`TaskRegistry::add`].
    pub async fn add(
        &self,
        name: impl Into<String>,
        priority: i64,
        due_date: &str,
        dependencies: Vec<String>,
    ) -> Result<Task> {
        let mut registry = self.inner.write().await;
        registry
            .add(name, priority, due_date, dependencies)
            .await
            .cloned()
    }

    /// See [`TaskRegistry::complete`].
    pub async fn complete(&self, name: &str) -> Result<Task> {
        let mut registry = self.inner.write().await;
        registry.complete(name).await.cloned()
    }

    /// See [`TaskRegistry::list_pending`].
    pub async fn list_pending(&self) -> Vec<Task> {
        let registry = self.inner.read().await;
        registry.list_pending().into_iter().cloned().collect()
    }

    /// See [`TaskRegistry::next_executable`].
    pub async fn next_executable(&self) -> Option<Task> {
        let registry = self.inner.read().await;
        registry.next_executable().cloned()
    }

    /// Whether the task named `name` is executable right now.
    pub async fn is_executable(&self, name: &str) -> Result<bool> {
        let registry = self.inner.read().await;
        let task = registry
            .find(name)
            .ok_or_else(|| RegistryError::NotFound(name.trim().to_string()))?;
        Ok(registry.is_executable(task))
    }

    /// Snapshot of every task in insertion order.
    pub async fn tasks(&self) -> Vec<Task> {
        self.inner.read().await.tasks().to_vec()
    }

    /// See [`TaskRegistry::flush`].
    pub async fn flush(&self) -> Result<()> {
        self.inner.write().await.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskman_storage::MemoryStorage;

    #[tokio::test]
    async fn test_shared_operations() {
        let shared = SharedRegistry::new(TaskRegistry::new(MemoryStorage::new()));
        shared.add("A", 2, "2024-01-10", vec![]).await.unwrap();
        shared.add("B", 1, "2024-01-05", vec!["A".into()]).await.unwrap();

        assert!(!shared.is_executable("b").await.unwrap());
        assert_eq!(shared.next_executable().await.unwrap().name(), "A");

        let done = shared.complete("A").await.unwrap();
        assert!(done.is_completed());
        assert!(shared.is_executable("B").await.unwrap());

        let pending = shared.list_pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name(), "B");

        assert!(matches!(
            shared.is_executable("missing").await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_serialized() {
        let storage = MemoryStorage::new();
        let shared = SharedRegistry::new(TaskRegistry::new(storage.clone()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let shared = shared.clone();
                tokio::spawn(async move {
                    shared
                        .add(format!("task-{i}"), i, "2024-01-10", vec![])
                        .await
                        .map(|_| ())
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(shared.tasks().await.len(), 16);
        assert_eq!(storage.save_count().await, 16);
        assert_eq!(storage.snapshot().await.len(), 16);
        assert_eq!(shared.next_executable().await.unwrap().name(), "task-0");
    }
}

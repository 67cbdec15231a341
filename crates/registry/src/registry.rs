//! The task registry - owns the task list and answers scheduling queries.

use crate::error::{RegistryError, Result};
use crate::{DefaultSelector, DependencyResolver, Resolution, TaskSelector};
use taskman_core::Task;
use taskman_storage::Storage;
use tracing::{debug, info, warn};

/// Owns the ordered task collection and the storage it is flushed to.
///
/// Every successful mutation saves the full collection. If that save fails
/// the mutation is undone before the error is returned, so the in-memory
/// list always matches the last successful flush plus nothing else.
///
/// ```text
/// open → add / complete / list_pending / next_executable → close
/// ```
pub struct TaskRegistry<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
    selector: Box<dyn TaskSelector>,
    resolver: DependencyResolver,
}

impl<S: Storage> TaskRegistry<S> {
    /// Create an empty registry without reading from storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
            selector: Box::new(DefaultSelector::new()),
            resolver: DependencyResolver::new(),
        }
    }

    /// Create a registry holding whatever `storage` currently contains.
    pub async fn open(storage: S) -> Result<Self> {
        let tasks = storage.load().await?;
        info!("Opened task registry with {} tasks", tasks.len());

        let mut registry = Self::new(storage);
        registry.tasks = tasks;
        Ok(registry)
    }

    /// Set the task selector strategy.
    pub fn with_selector(mut self, selector: Box<dyn TaskSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Validate and append a new pending task, then flush.
    pub async fn add(
        &mut self,
        name: impl Into<String>,
        priority: i64,
        due_date: &str,
        dependencies: Vec<String>,
    ) -> Result<&Task> {
        let task = Task::new(name, priority, due_date, dependencies).map_err(|e| {
            warn!("Rejected new task: {}", e);
            e
        })?;

        self.tasks.push(task);
        if let Err(e) = self.storage.save(&self.tasks).await {
            let task = self.tasks.pop();
            warn!(
                "Save failed, dropped new task {:?}: {}",
                task.as_ref().map(Task::name),
                e
            );
            return Err(e.into());
        }

        let task = &self.tasks[self.tasks.len() - 1];
        info!("Added task: {}", task);
        Ok(task)
    }

    /// Whether every dependency of `task` has a completed match.
    ///
    /// Recomputed on every call.
    pub fn is_executable(&self, task: &Task) -> bool {
        self.resolver.is_executable(&self.tasks, task)
    }

    /// Dependency names of `task` that have no completed match.
    pub fn unsatisfied_dependencies(&self, task: &Task) -> Vec<String> {
        self.resolver.unsatisfied(&self.tasks, task)
    }

    /// Pending tasks ordered by priority; equal priorities keep insertion order.
    pub fn list_pending(&self) -> Vec<&Task> {
        let mut pending: Vec<&Task> = self.tasks.iter().filter(|t| !t.is_completed()).collect();
        pending.sort_by_key(|t| t.priority());
        pending
    }

    /// Mark the first task matching `name` as completed, then flush.
    ///
    /// Fails with [`RegistryError::Blocked`] when the task still has
    /// unfinished dependencies. Completing an already completed task succeeds.
    pub async fn complete(&mut self, name: &str) -> Result<&Task> {
        let Some(index) = self.tasks.iter().position(|t| t.matches_name(name)) else {
            warn!("No task named {:?}", name);
            return Err(RegistryError::NotFound(name.trim().to_string()));
        };

        let task = &self.tasks[index];
        if !task.dependencies().is_empty() {
            if let Resolution::Blocked(unsatisfied) = self.resolver.check(&self.tasks, task) {
                warn!("Task {} blocked by {:?}", task.name(), unsatisfied);
                return Err(RegistryError::Blocked {
                    name: task.name().to_string(),
                    unsatisfied,
                });
            }
        }

        let previous = task.clone();
        self.tasks[index].mark_completed();
        if let Err(e) = self.storage.save(&self.tasks).await {
            warn!("Save failed, task {} left pending: {}", previous.name(), e);
            self.tasks[index] = previous;
            return Err(e.into());
        }

        let task = &self.tasks[index];
        info!("Completed task: {}", task.name());
        Ok(task)
    }

    /// The best pending, executable task, without consuming it.
    pub fn next_executable(&self) -> Option<&Task> {
        let candidates: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| !t.is_completed() && self.is_executable(t))
            .collect();

        let next = self.selector.select(&candidates);
        debug!(
            "Selected {:?} from {} executable tasks",
            next.map(Task::name),
            candidates.len()
        );
        next
    }

    /// First task matching `name`, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.matches_name(name))
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks, completed or not.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the registry holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a reference to the storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save the full collection now.
    pub async fn flush(&mut self) -> Result<()> {
        self.storage.save(&self.tasks).await?;
        debug!("Flushed {} tasks", self.tasks.len());
        Ok(())
    }

    /// Flush and hand back the storage.
    pub async fn close(mut self) -> Result<S> {
        self.flush().await?;
        Ok(self.storage)
    }
}

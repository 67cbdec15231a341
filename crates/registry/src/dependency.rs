//! Dependency resolution for tasks.
//!
//! Dependencies are name references. A name is satisfied when some task in
//! the collection matches it (case-insensitively) and is completed; a name
//! with no matching task is simply unsatisfied.

use taskman_core::Task;

/// Result of dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// All dependencies satisfied, ready to execute
    Ready,
    /// Blocked by these dependency names
    Blocked(Vec<String>),
}

impl Resolution {
    /// Whether the task can be executed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Resolves task dependencies against a task collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyResolver;

impl DependencyResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Check whether `task`'s dependencies are satisfied within `tasks`.
    pub fn check(&self, tasks: &[Task], task: &Task) -> Resolution {
        let blocked = self.unsatisfied(tasks, task);
        if blocked.is_empty() {
            Resolution::Ready
        } else {
            Resolution::Blocked(blocked)
        }
    }

    /// Dependency names of `task` with no completed match, in declared order.
    pub fn unsatisfied(&self, tasks: &[Task], task: &Task) -> Vec<String> {
        task.dependencies()
            .iter()
            .filter(|dep| !is_satisfied(tasks, dep))
            .cloned()
            .collect()
    }

    /// True when `task` has no dependencies or all of them are satisfied.
    pub fn is_executable(&self, tasks: &[Task], task: &Task) -> bool {
        task.dependencies().iter().all(|dep| is_satisfied(tasks, dep))
    }
}

fn is_satisfied(tasks: &[Task], dependency: &str) -> bool {
    tasks
        .iter()
        .any(|t| t.is_completed() && t.matches_name(dependency))
}
